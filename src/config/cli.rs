use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_provider, Validate};
use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone, Parser)]
#[command(name = "spend-relay")]
#[command(about = "Answers ad spend questions from the Meta insights API")]
pub struct CliConfig {
    #[arg(long, env = "METAAPI_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    #[arg(long, env = "META_GRAPH_BASE_URL", default_value = super::DEFAULT_GRAPH_BASE_URL)]
    pub graph_base_url: String,

    #[arg(long, env = "META_INSIGHTS_API_VERSION", default_value = super::DEFAULT_INSIGHTS_API_VERSION)]
    pub insights_api_version: String,

    #[arg(long, env = "META_ACCOUNTS_API_VERSION", default_value = super::DEFAULT_ACCOUNTS_API_VERSION)]
    pub accounts_api_version: String,

    #[arg(long, env = "META_REQUEST_TIMEOUT_SECONDS", default_value_t = super::DEFAULT_REQUEST_TIMEOUT_SECONDS)]
    pub request_timeout_seconds: u64,

    #[arg(long, env = "BIND_HOST", default_value = super::DEFAULT_BIND_HOST)]
    pub bind_host: String,

    #[arg(long, env = "PORT", default_value_t = super::DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, help = "Read settings from a TOML file instead of flags")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// The provider selected by the command line, already validated.
    pub fn load_provider(&self) -> Result<Arc<dyn ConfigProvider>> {
        match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                Ok(Arc::new(config))
            }
            None => {
                self.validate()?;
                Ok(Arc::new(self.clone()))
            }
        }
    }
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("graph_base_url", &self.graph_base_url)
            .field("insights_api_version", &self.insights_api_version)
            .field("accounts_api_version", &self.accounts_api_version)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("bind_host", &self.bind_host)
            .field("port", &self.port)
            .field("config", &self.config)
            .field("verbose", &self.verbose)
            .field("log_json", &self.log_json)
            .finish()
    }
}

impl ConfigProvider for CliConfig {
    fn access_token(&self) -> &str {
        self.access_token.as_deref().unwrap_or("")
    }

    fn graph_base_url(&self) -> &str {
        &self.graph_base_url
    }

    fn insights_api_version(&self) -> &str {
        &self.insights_api_version
    }

    fn accounts_api_version(&self) -> &str {
        &self.accounts_api_version
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds
    }

    fn bind_host(&self) -> &str {
        &self.bind_host
    }

    fn port(&self) -> u16 {
        self.port
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
