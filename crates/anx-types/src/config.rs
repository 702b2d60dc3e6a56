use serde::{Deserialize, Serialize};

pub const DEFAULT_SESSION: &str = "default";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Session used when a caller does not identify its conversation
    #[serde(default = "default_session")]
    pub default_session: String,
    /// Fetch and validate the dataset before serving
    #[serde(default)]
    pub load_on_startup: bool,
}

fn default_session() -> String {
    DEFAULT_SESSION.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_session: default_session(),
            load_on_startup: false,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_session(mut self, session: impl Into<String>) -> Self {
        self.default_session = session.into();
        self
    }

    pub fn with_load_on_startup(mut self, enabled: bool) -> Self {
        self.load_on_startup = enabled;
        self
    }
}
