/// Liveness endpoint
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct RootResponse {
    status: &'static str,
    message: &'static str,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "ok",
        message: "Music API running",
    })
}
