use crate::utils::error::{RelayError, Result};
use serde_json::Value;
use std::io::{self, Write};

/// Writes the ad-account listing, or the single failure line, for the
/// command-line helper. Returns whether the listing succeeded.
pub fn write_ad_accounts<O: Write, E: Write>(
    result: &Result<Value>,
    out: &mut O,
    err: &mut E,
) -> io::Result<bool> {
    match result {
        Ok(accounts) => {
            let pretty = serde_json::to_string_pretty(accounts).map_err(io::Error::other)?;
            writeln!(out, "Ad Accounts: {}", pretty)?;
            Ok(true)
        }
        Err(RelayError::UpstreamError {
            status: Some(_),
            details,
        }) => {
            writeln!(err, "Meta API Error: {}", plain_text(details))?;
            Ok(false)
        }
        Err(e) => {
            writeln!(err, "Error: {}", e)?;
            Ok(false)
        }
    }
}

/// Upstream bodies that were not JSON are kept as strings; print them bare.
fn plain_text(details: &Value) -> String {
    match details {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(result: Result<Value>) -> (bool, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let ok = write_ad_accounts(&result, &mut out, &mut err).unwrap();
        (
            ok,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_success_goes_to_stdout() {
        let (ok, out, err) = render(Ok(json!({"data": [{"id": "act_1"}]})));
        assert!(ok);
        assert!(out.starts_with("Ad Accounts: {\n"));
        assert!(out.contains("\"act_1\""));
        assert!(err.is_empty());
    }

    #[test]
    fn test_upstream_error_is_one_line() {
        let (ok, out, err) = render(Err(RelayError::UpstreamError {
            status: Some(400),
            details: json!({"error": {"message": "bad token"}}),
        }));
        assert!(!ok);
        assert!(out.is_empty());
        assert_eq!(err, "Meta API Error: {\"error\":{\"message\":\"bad token\"}}\n");
    }

    #[test]
    fn test_text_body_is_printed_bare() {
        let (_, _, err) = render(Err(RelayError::UpstreamError {
            status: Some(502),
            details: Value::String("Bad Gateway".to_string()),
        }));
        assert_eq!(err, "Meta API Error: Bad Gateway\n");
    }

    #[test]
    fn test_other_error_uses_message() {
        let error = RelayError::ConfigError {
            message: "broken".to_string(),
        };
        let expected = format!("Error: {}\n", error);
        let (ok, out, err) = render(Err(error));
        assert!(!ok);
        assert!(out.is_empty());
        assert_eq!(err, expected);
        assert_eq!(err.lines().count(), 1);
    }
}
