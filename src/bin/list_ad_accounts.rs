use clap::Parser;
use spend_relay::core::SpendFetcher;
use spend_relay::utils::{logger, report};
use spend_relay::{CliConfig, MetaAdsClient};

/// Prints the ad accounts visible to the configured access token.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = CliConfig::parse();
    logger::init_logger(config.verbose, config.log_json);

    let provider = config.load_provider()?;
    let client = MetaAdsClient::from_config(provider.as_ref())?;

    let result = client.list_ad_accounts().await;
    let listed = report::write_ad_accounts(
        &result,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )?;
    if !listed {
        std::process::exit(1);
    }
    Ok(())
}
