use clap::Parser;
use spend_relay::utils::error::ErrorCategory;
use spend_relay::utils::logger;
use spend_relay::{rest, CliConfig, MetaAdsClient, RelayError, SpendRelay};
use std::sync::Arc;

async fn run(config: &CliConfig) -> Result<(), RelayError> {
    let provider = config.load_provider()?;
    let addr = rest::bind_addr(provider.as_ref())?;
    let client = MetaAdsClient::from_config(provider.as_ref())?;
    let relay = Arc::new(SpendRelay::new(client));

    rest::dispatch_server(relay, addr).await
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting spend-relay");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!("❌ spend-relay stopped: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Request | ErrorCategory::Upstream | ErrorCategory::System => 1,
        };
        std::process::exit(exit_code);
    }
}
