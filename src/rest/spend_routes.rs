use super::{build_passthrough_response, build_response, BodyTooLarge, MalformedBody};
use crate::core::relay::SpendRelay;
use crate::core::SpendFetcher;
use futures_util::{pin_mut, Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use warp::{Buf, Filter};

/// Request bodies above this size are rejected while streaming.
const MAX_BODY_BYTES: usize = 4096;

pub fn routes<F: SpendFetcher + 'static>(
    relay: &Arc<SpendRelay<F>>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    spend_query(relay.clone()).or(ad_accounts(relay.clone()))
}

/// POST /query
///
/// Answer a spend question for one ad account
///
/// Returns a `SpendReport` with the resolved `since`/`until`, the spend
/// and a summary sentence
fn spend_query<F: SpendFetcher + 'static>(
    relay: Arc<SpendRelay<F>>,
) -> impl Filter<Extract = (warp::reply::Response,), Error = warp::Rejection> + Clone {
    warp::path!("query")
        .and(warp::post())
        .and(json_body::<dto::QueryRequestDto>())
        .and(warp::any().map(move || relay.clone()))
        .and_then(
            |body: dto::QueryRequestDto, relay: Arc<SpendRelay<F>>| async move {
                let resp = relay
                    .query_now(
                        body.ad_account_id.as_deref().unwrap_or_default(),
                        body.question.as_deref().unwrap_or_default(),
                    )
                    .await;
                build_response(resp)
            },
        )
        .boxed()
}

/// Collects the body, chunked or not, up to `MAX_BODY_BYTES`.
async fn collect_capped<S, B>(stream: S) -> Result<Vec<u8>, warp::Rejection>
where
    S: Stream<Item = Result<B, warp::Error>>,
    B: Buf,
{
    pin_mut!(stream);
    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        let mut chunk = chunk.map_err(|e| {
            tracing::warn!("Failed reading request body: {}", e);
            warp::reject::custom(MalformedBody)
        })?;
        if body.len() + chunk.remaining() > MAX_BODY_BYTES {
            return Err(warp::reject::custom(BodyTooLarge));
        }
        while chunk.has_remaining() {
            let bytes = chunk.chunk();
            let len = bytes.len();
            body.extend_from_slice(bytes);
            chunk.advance(len);
        }
    }
    Ok(body)
}

/// JSON body that does not depend on a `Content-Length` header.
fn json_body<T: DeserializeOwned + Send>(
) -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::stream().and_then(|stream| async move {
        let body = collect_capped(stream).await?;
        serde_json::from_slice::<T>(&body).map_err(|_| warp::reject::custom(MalformedBody))
    })
}

/// GET /adaccounts
///
/// List the ad accounts visible to the configured access token
///
/// Returns the upstream document unchanged
fn ad_accounts<F: SpendFetcher + 'static>(
    relay: Arc<SpendRelay<F>>,
) -> impl Filter<Extract = (warp::reply::Response,), Error = warp::Rejection> + Clone {
    warp::path!("adaccounts")
        .and(warp::get())
        .and(warp::any().map(move || relay.clone()))
        .and_then(|relay: Arc<SpendRelay<F>>| async move {
            let resp = relay.ad_accounts().await;
            build_passthrough_response(resp)
        })
        .boxed()
}

///
/// DTO
///
pub mod dto {
    use serde::{Deserialize, Serialize};

    /// Both fields are optional on the wire so a missing one reaches
    /// validation instead of failing deserialization.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct QueryRequestDto {
        #[serde(rename = "adAccountId")]
        pub ad_account_id: Option<String>,
        pub question: Option<String>,
    }
}
