/// Server configuration
use crate::error::{Result, ServerError};
use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Environment variable naming the store location
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_cors")]
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Directory relative `music_file` references resolve against. When set,
    /// resolved files must stay inside it.
    #[serde(default)]
    pub media_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsSettings {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load configuration, reading variables from `env` instead of the
    /// process environment when given
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        // An explicit path must exist; the default one is optional
        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (e.g. MUSICDB_SERVER__PORT)
        let database_url = match &env {
            Some(vars) => vars.get(DATABASE_URL_ENV).cloned(),
            None => std::env::var(DATABASE_URL_ENV).ok(),
        };

        settings = settings
            .add_source(
                config::Environment::with_prefix("MUSICDB")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true)
                    .source(env),
            )
            .set_override_option("storage.database_url", database_url)?;

        let config = settings.build()?;

        config.try_deserialize().map_err(ServerError::from)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.trim().is_empty() {
            return Err(ServerError::Config(format!(
                "Database URL is required (set {})",
                DATABASE_URL_ENV
            )));
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(ServerError::Config(
                "At least one CORS origin is required".to_string(),
            ));
        }

        self.cors.origin_header_values()?;
        self.bind_address()?;

        Ok(())
    }

    /// Socket address the server listens on
    pub fn bind_address(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.server.host.parse().map_err(|e| {
            ServerError::Config(format!("Invalid host {:?}: {}", self.server.host, e))
        })?;
        Ok(SocketAddr::from((ip, self.server.port)))
    }
}

impl CorsSettings {
    /// Allowed origins as header values
    pub fn origin_header_values(&self) -> Result<Vec<HeaderValue>> {
        self.allowed_origins
            .iter()
            .map(|origin| {
                if origin == "*" {
                    return Err(ServerError::Config(
                        "Wildcard origin cannot be combined with credentials".to_string(),
                    ));
                }
                HeaderValue::from_str(origin).map_err(|e| {
                    ServerError::Config(format!("Invalid CORS origin {:?}: {}", origin, e))
                })
            })
            .collect()
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        media_root: None,
    }
}

fn default_database_url() -> String {
    "sqlite://./data/musicdb.db".to_string()
}

fn default_cors() -> CorsSettings {
    CorsSettings {
        allowed_origins: default_allowed_origins(),
    }
}

fn default_allowed_origins() -> Vec<String> {
    ["localhost", "127.0.0.1", "music-frontend"]
        .iter()
        .flat_map(|host| {
            // Vite dev server and preview ports
            [5173, 4173]
                .iter()
                .map(move |port| format!("http://{}:{}", host, port))
        })
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            cors: default_cors(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::load_with_env(None, env(&[])).unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.storage.database_url, "sqlite://./data/musicdb.db");
        assert_eq!(config.storage.media_root, None);
        assert_eq!(config.cors.allowed_origins.len(), 6);
        assert!(config
            .cors
            .allowed_origins
            .contains(&"http://music-frontend:4173".to_string()));
        config.validate().unwrap();
    }

    #[test]
    fn test_database_url_env_overrides() {
        let config = ServerConfig::load_with_env(
            None,
            env(&[("DATABASE_URL", "sqlite:///srv/musicdb.db")]),
        )
        .unwrap();

        assert_eq!(config.storage.database_url, "sqlite:///srv/musicdb.db");
    }

    #[test]
    fn test_prefixed_env_overrides() {
        let config = ServerConfig::load_with_env(
            None,
            env(&[
                ("MUSICDB_SERVER__PORT", "9100"),
                ("MUSICDB_STORAGE__MEDIA_ROOT", "/srv/music"),
                (
                    "MUSICDB_CORS__ALLOWED_ORIGINS",
                    "https://music.example.com,https://admin.example.com",
                ),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.storage.media_root, Some(PathBuf::from("/srv/music")));
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://music.example.com", "https://admin.example.com"]
        );
    }

    #[test]
    fn test_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nhost = \"127.0.0.1\"\nport = 8123\n\n[storage]\ndatabase_url = \"sqlite://file.db\"\n"
        )
        .unwrap();

        let config = ServerConfig::load_with_env(Some(file.path()), env(&[])).unwrap();

        let expected: SocketAddr = "127.0.0.1:8123".parse().unwrap();
        assert_eq!(config.bind_address().unwrap(), expected);
        assert_eq!(config.storage.database_url, "sqlite://file.db");
        assert_eq!(config.cors.allowed_origins.len(), 6);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result =
            ServerConfig::load_with_env(Some(Path::new("/nonexistent/musicdb.toml")), env(&[]));
        assert!(matches!(result, Err(ServerError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ServerConfig::default();
        config.cors.allowed_origins = vec!["*".to_string()];
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.cors.allowed_origins.clear();
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.storage.database_url = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.server.host = "not-an-ip".to_string();
        assert!(config.validate().is_err());
    }
}
