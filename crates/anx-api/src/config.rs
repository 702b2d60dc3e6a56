use anx_types::EngineConfig;
use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Directory served for paths no route matches
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_request_timeout() -> u64 {
    30
}

fn default_static_dir() -> String {
    "static".to_string()
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            request_timeout_secs: default_request_timeout(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            origins: vec!["*".to_string()],
        }
    }
}

/// Where the bot lines and flows are downloaded from
#[derive(Debug, Clone, Deserialize)]
pub struct SheetConfig {
    pub base_url: String,
    #[serde(default)]
    pub spreadsheet_id: String,
    pub lines_sheet: String,
    pub flows_sheet: String,
    pub timeout_secs: u64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            base_url: anx_loader::builder::DEFAULT_BASE_URL.to_string(),
            spreadsheet_id: String::new(),
            lines_sheet: "lines".to_string(),
            flows_sheet: "flows".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables prefixed with `ANX_`, sections split by `__`
    ///    (e.g. `ANX_SERVER__PORT`, `ANX_SHEET__SPREADSHEET_ID`)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            // 1. Load default config
            .add_source(File::with_name("config/default").required(false))
            // 2. Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // 3. Environment variables override everything
            .add_source(
                Environment::with_prefix("ANX")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [cors]
            enabled = true
            origins = ["http://localhost:3000"]

            [sheet]
            base_url = "https://docs.google.com"
            spreadsheet_id = "abc"
            lines_sheet = "lines"
            flows_sheet = "flows"
            timeout_secs = 10

            [logging]
            level = "debug"
            format = "json"

            [engine]
            default_session = "web"
            load_on_startup = true
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.server.static_dir, "static");
        assert_eq!(config.sheet.spreadsheet_id, "abc");
        assert_eq!(config.engine.default_session, "web");
        assert!(config.engine.load_on_startup);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.sheet.lines_sheet, "lines");
        assert_eq!(config.engine.default_session, "default");
        assert!(!config.engine.load_on_startup);
    }
}
