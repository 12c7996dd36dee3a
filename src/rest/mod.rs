mod spend_routes;

pub use spend_routes::dto;

use crate::core::relay::{SpendRelay, REQUIRED_FIELDS_MESSAGE};
use crate::core::{ConfigProvider, SpendFetcher};
use crate::utils::error::{RelayError, Result};
use serde_json::{json, Value};
use std::convert::Infallible;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Reply};

/// Request body that is not valid JSON for the route.
#[derive(Debug)]
pub(crate) struct MalformedBody;

impl warp::reject::Reject for MalformedBody {}

#[derive(Debug)]
pub(crate) struct BodyTooLarge;

impl warp::reject::Reject for BodyTooLarge {}

fn json_reply(body: &Value, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(body), status).into_response()
}

fn log_failure(err: &RelayError) -> StatusCode {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_client_error() {
        tracing::warn!("{}", err);
    } else {
        tracing::error!("{}", err);
    }
    status
}

/// Body for a failed spend query.
fn error_body(err: &RelayError) -> Value {
    match err {
        RelayError::ApiError(_) | RelayError::UpstreamError { .. } => json!({
            "error": err.user_friendly_message(),
            "details": err.details(),
        }),
        _ => json!({ "error": err.user_friendly_message() }),
    }
}

fn build_response<T: serde::Serialize>(
    resp: Result<T>,
) -> std::result::Result<Response, Infallible> {
    Ok(match resp {
        Ok(data) => warp::reply::json(&data).into_response(),
        Err(err) => {
            let status = log_failure(&err);
            json_reply(&error_body(&err), status)
        }
    })
}

/// Upstream errors that came with a body are relayed as-is.
fn build_passthrough_response(
    resp: Result<Value>,
) -> std::result::Result<Response, Infallible> {
    Ok(match resp {
        Ok(data) => warp::reply::json(&data).into_response(),
        Err(err) => {
            let status = log_failure(&err);
            let body = match &err {
                RelayError::UpstreamError {
                    status: Some(_),
                    details,
                } => details.clone(),
                RelayError::UpstreamError { details, .. } => json!({ "error": details }),
                other => json!({ "error": other.to_string() }),
            };
            json_reply(&body, status)
        }
    })
}

async fn handle_rejection(err: warp::Rejection) -> std::result::Result<Response, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found")
    } else if err.find::<MalformedBody>().is_some() {
        (StatusCode::BAD_REQUEST, REQUIRED_FIELDS_MESSAGE)
    } else if err.find::<BodyTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
    };

    tracing::warn!("Rejected request: {}", message);
    Ok(json_reply(&json!({ "error": message }), status))
}

/// All endpoints with rejection handling and request tracing.
pub fn api<F: SpendFetcher + 'static>(
    relay: Arc<SpendRelay<F>>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    spend_routes::routes(&relay)
        .recover(handle_rejection)
        .with(warp::trace::request())
}

/// Resolves the configured host, so names like `localhost` work too.
pub fn bind_addr<C: ConfigProvider + ?Sized>(config: &C) -> Result<SocketAddr> {
    let invalid = |reason: String| RelayError::InvalidConfigValueError {
        field: "server.bind_host".to_string(),
        value: config.bind_host().to_string(),
        reason,
    };

    (config.bind_host(), config.port())
        .to_socket_addrs()
        .map_err(|e| invalid(e.to_string()))?
        .next()
        .ok_or_else(|| invalid("Host resolved to no address".to_string()))
}

/// Serves until ctrl-c.
pub async fn dispatch_server<F: SpendFetcher + 'static>(
    relay: Arc<SpendRelay<F>>,
    addr: SocketAddr,
) -> Result<()> {
    let (bound, server) = warp::serve(api(relay))
        .try_bind_with_graceful_shutdown(addr, async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
            }
        })
        .map_err(|e| RelayError::ConfigError {
            message: format!("Cannot bind {}: {}", addr, e),
        })?;

    tracing::info!("Server running on {}", bound);
    server.await;
    Ok(())
}
