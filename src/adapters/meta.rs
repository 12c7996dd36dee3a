use crate::domain::model::DateRange;
use crate::domain::ports::{ConfigProvider, SpendFetcher};
use crate::utils::error::{RelayError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

/// Spend default when the insights payload carries no row.
pub const NO_SPEND: &str = "0";

/// Graph API client for ad insights and ad-account listing.
#[derive(Debug, Clone)]
pub struct MetaAdsClient {
    client: Client,
    base_url: String,
    insights_version: String,
    accounts_version: String,
    access_token: String,
}

impl MetaAdsClient {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            base_url: config.graph_base_url().trim_end_matches('/').to_string(),
            insights_version: config.insights_api_version().to_string(),
            accounts_version: config.accounts_api_version().to_string(),
            access_token: config.access_token().to_string(),
        })
    }

    fn insights_url(&self, account_id: &str) -> String {
        format!(
            "{}/{}/{}/insights",
            self.base_url, self.insights_version, account_id
        )
    }

    fn accounts_url(&self) -> String {
        format!("{}/{}/me/adaccounts", self.base_url, self.accounts_version)
    }

    /// Turns a non-2xx reply into an upstream error, keeping the body.
    async fn into_json(response: Response) -> Result<serde_json::Value> {
        let status = response.status();
        tracing::debug!("Meta API response status: {}", status);

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let details = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
        Err(RelayError::UpstreamError {
            status: Some(status.as_u16()),
            details,
        })
    }

    fn transport_error(err: reqwest::Error) -> RelayError {
        RelayError::UpstreamError {
            status: err.status().map(|s| s.as_u16()),
            details: serde_json::Value::String(err.to_string()),
        }
    }
}

/// First row's `spend`, or [`NO_SPEND`] when there is none.
pub fn extract_spend(payload: &serde_json::Value) -> String {
    match payload.pointer("/data/0/spend") {
        Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => NO_SPEND.to_string(),
    }
}

#[async_trait]
impl SpendFetcher for MetaAdsClient {
    async fn fetch_spend(&self, account_id: &str, range: &DateRange) -> Result<String> {
        let url = self.insights_url(account_id);
        tracing::debug!(
            "Requesting insights for {} from {} to {}",
            account_id,
            range.since(),
            range.until()
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("access_token", self.access_token.as_str()),
                ("fields", "spend"),
                ("time_range", range.to_time_range_json().as_str()),
            ])
            .send()
            .await
            .map_err(Self::transport_error)?;

        let payload = Self::into_json(response).await?;
        Ok(extract_spend(&payload))
    }

    async fn list_ad_accounts(&self) -> Result<serde_json::Value> {
        tracing::debug!("Requesting ad accounts visible to the configured token");

        let response = self
            .client
            .get(self.accounts_url())
            .query(&[("access_token", self.access_token.as_str())])
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::into_json(response).await
    }
}
