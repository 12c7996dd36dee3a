use crate::core::resolver;
use crate::domain::model::SpendReport;
use crate::domain::ports::SpendFetcher;
use crate::utils::error::{RelayError, Result};
use chrono::{Local, NaiveDate};

pub const REQUIRED_FIELDS_MESSAGE: &str = "adAccountId and question are required.";

/// Answers spend questions: resolve the range, fetch, summarise.
pub struct SpendRelay<F: SpendFetcher> {
    fetcher: F,
}

impl<F: SpendFetcher> SpendRelay<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub async fn query(
        &self,
        account_id: &str,
        question: &str,
        today: NaiveDate,
    ) -> Result<SpendReport> {
        if account_id.is_empty() || question.is_empty() {
            return Err(RelayError::ValidationError {
                message: REQUIRED_FIELDS_MESSAGE.to_string(),
            });
        }

        let resolution = resolver::classify(question, today);
        tracing::debug!(
            "Resolved question via {} rule: {} to {}",
            resolution.rule,
            resolution.range.since(),
            resolution.range.until()
        );

        let spend = self.fetcher.fetch_spend(account_id, &resolution.range).await?;
        let report = SpendReport::new(&resolution.range, spend);
        tracing::info!("{} (account {})", report.message, account_id);

        Ok(report)
    }

    /// Same as [`query`](Self::query) with today taken from the host clock.
    pub async fn query_now(&self, account_id: &str, question: &str) -> Result<SpendReport> {
        self.query(account_id, question, Local::now().date_naive()).await
    }

    pub async fn ad_accounts(&self) -> Result<serde_json::Value> {
        self.fetcher.list_ad_accounts().await
    }
}
