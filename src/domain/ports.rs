use crate::domain::model::DateRange;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn access_token(&self) -> &str;
    fn graph_base_url(&self) -> &str;
    fn insights_api_version(&self) -> &str;
    fn accounts_api_version(&self) -> &str;
    fn request_timeout_seconds(&self) -> u64;
    fn bind_host(&self) -> &str;
    fn port(&self) -> u16;
}

/// Source of spend totals and of the accounts a credential can see.
#[async_trait]
pub trait SpendFetcher: Send + Sync {
    /// Spend for `account_id` over the inclusive `range`, as reported upstream.
    async fn fetch_spend(&self, account_id: &str, range: &DateRange) -> Result<String>;

    async fn list_ad_accounts(&self) -> Result<serde_json::Value>;
}
