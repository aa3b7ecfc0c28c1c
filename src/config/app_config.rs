use serde::Deserialize;

/// Environment variable read as the API key when set, overriding any layered value
pub const LEGACY_API_KEY_ENV: &str = "ApiKey";

const APP_API_KEY_ENV: &str = "APP__AUTH__API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Static API key settings for mutating requests
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret; when unset every protected request is rejected
    pub api_key: Option<String>,
    pub header_name: String,
    pub protected_methods: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Populate the store with the two default employees at start-up
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            header_name: "ApiKey".to_string(),
            protected_methods: vec!["POST".to_string(), "PUT".to_string()],
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { seed: true }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_env(None)
    }

    /// `env` replaces the process environment when given
    fn load_with_env(env: Option<config::Map<String, String>>) -> Result<Self, config::ConfigError> {
        let raw_var = |name: &str| match &env {
            Some(vars) => vars.get(name).cloned(),
            None => std::env::var(name).ok(),
        };

        // The key is compared byte for byte, so it skips `try_parsing` ("007" must not become 7)
        let app_api_key = raw_var(APP_API_KEY_ENV);
        let legacy_api_key = raw_var(LEGACY_API_KEY_ENV);

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("auth.protected_methods")
                    .try_parsing(true)
                    .source(env.clone()),
            )
            .set_override_option("auth.api_key", app_api_key)?
            .set_override_option("auth.api_key", legacy_api_key)?
            .build()?;

        config.try_deserialize()
    }

    /// Apply command line overrides on top of the loaded configuration
    pub fn with_server_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }

        if let Some(port) = port {
            self.server.port = port;
        }

        self
    }
}
