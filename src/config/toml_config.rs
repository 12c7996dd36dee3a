use crate::core::ConfigProvider;
use crate::utils::error::{RelayError, Result};
use crate::utils::validation::{validate_provider, validate_required_field, Validate};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid placeholder pattern"));

#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub meta: MetaConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    pub bind_host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Clone, Deserialize)]
pub struct MetaConfig {
    pub access_token: Option<String>,
    pub graph_base_url: Option<String>,
    pub insights_api_version: Option<String>,
    pub accounts_api_version: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for MetaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaConfig")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("graph_base_url", &self.graph_base_url)
            .field("insights_api_version", &self.insights_api_version)
            .field("accounts_api_version", &self.accounts_api_version)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RelayError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML after replacing `${VAR}` with the variable's value.
    /// Unset variables are left in place and rejected by validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RelayError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        let token = validate_required_field("meta.access_token", &self.meta.access_token)?;
        if ENV_PLACEHOLDER.is_match(token) {
            return Err(RelayError::MissingConfigError {
                field: "meta.access_token".to_string(),
            });
        }
        validate_provider(self)
    }
}

impl ConfigProvider for TomlConfig {
    fn access_token(&self) -> &str {
        self.meta.access_token.as_deref().unwrap_or("")
    }

    fn graph_base_url(&self) -> &str {
        self.meta
            .graph_base_url
            .as_deref()
            .unwrap_or(super::DEFAULT_GRAPH_BASE_URL)
    }

    fn insights_api_version(&self) -> &str {
        self.meta
            .insights_api_version
            .as_deref()
            .unwrap_or(super::DEFAULT_INSIGHTS_API_VERSION)
    }

    fn accounts_api_version(&self) -> &str {
        self.meta
            .accounts_api_version
            .as_deref()
            .unwrap_or(super::DEFAULT_ACCOUNTS_API_VERSION)
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.meta
            .request_timeout_seconds
            .unwrap_or(super::DEFAULT_REQUEST_TIMEOUT_SECONDS)
    }

    fn bind_host(&self) -> &str {
        self.server
            .bind_host
            .as_deref()
            .unwrap_or(super::DEFAULT_BIND_HOST)
    }

    fn port(&self) -> u16 {
        self.server.port.unwrap_or(super::DEFAULT_PORT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
