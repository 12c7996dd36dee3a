#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";
pub const DEFAULT_INSIGHTS_API_VERSION: &str = "v19.0";
pub const DEFAULT_ACCOUNTS_API_VERSION: &str = "v20.0";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
