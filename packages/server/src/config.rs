use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_NAME: &str = "docsync.config.json";
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Server configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub port: u16,

    /// Key used to sign bearer credentials
    pub jwt_secret: String,

    /// Lifetime of issued bearer credentials
    pub token_ttl_secs: i64,

    pub google: GoogleConfig,

    /// Where the OAuth callback sends the browser afterwards
    pub frontend_url: String,

    /// Single origin allowed by CORS
    pub cors_origin: String,

    /// Largest accepted JSON body
    pub body_limit_bytes: usize,

    pub remote: RemoteConfig,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Endpoints of the remote identity and document services
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteConfig {
    pub docs_base_url: String,
    pub drive_base_url: String,
    pub userinfo_url: String,
    pub oauth_auth_url: String,
    pub oauth_token_url: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_secs: 3600,
            google: GoogleConfig::default(),
            frontend_url: "http://localhost:3000".to_string(),
            cors_origin: "http://localhost:3000".to_string(),
            body_limit_bytes: 10 * 1024 * 1024,
            remote: RemoteConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            docs_base_url: "https://docs.googleapis.com".to_string(),
            drive_base_url: "https://www.googleapis.com".to_string(),
            userinfo_url: "https://www.googleapis.com/oauth2/v3/userinfo".to_string(),
            oauth_auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            oauth_token_url: "https://oauth2.googleapis.com/token".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 200,
            max_backoff_ms: 2_000,
        }
    }
}

impl ServerConfig {
    /// Load config from a JSON file, falling back to defaults when it does not exist
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_NAME));

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config, then apply process environment overrides
    pub fn from_env(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields from environment-style lookups
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                value: port.clone(),
            })?;
        }

        let overrides: [(&str, &mut String); 6] = [
            ("JWT_SECRET", &mut self.jwt_secret),
            ("GOOGLE_CLIENT_ID", &mut self.google.client_id),
            ("GOOGLE_CLIENT_SECRET", &mut self.google.client_secret),
            ("REDIRECT_URI", &mut self.google.redirect_uri),
            ("FRONTEND_URL", &mut self.frontend_url),
            ("CORS_ORIGIN", &mut self.cors_origin),
        ];
        for (key, field) in overrides {
            if let Some(value) = lookup(key) {
                *field = value;
            }
        }

        Ok(())
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}
