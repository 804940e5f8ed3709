use crate::core::error::RateError;
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

const USER_AGENT: &str = concat!("skyrate/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client shared by all providers.
pub fn http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Issues a single GET and decodes the JSON body into `T`.
///
/// Transport, status and decode failures map to different [`RateError`]
/// variants. There is no retry.
pub async fn fetch_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    context: &str,
) -> Result<T, RateError> {
    debug!("Requesting {} from {}", context, url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| RateError::Network(format!("{e} for {context}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(RateError::Status {
            status: status.as_u16(),
            context: context.to_string(),
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| RateError::Network(format!("Failed to read response for {context}: {e}")))?;

    serde_json::from_str(&text).map_err(|e| {
        error!(
            error = ?e,
            response = %text,
            "Failed to parse {} response", context
        );
        RateError::parse(context, e)
    })
}

/// Accepts a quoted rate only when it is finite and strictly positive.
///
/// Zero is reported as [`RateError::ZeroRate`], anything else out of range
/// as a parse failure.
pub fn checked_rate(rate: f64, context: &str) -> Result<f64, RateError> {
    if rate == 0.0 {
        return Err(RateError::ZeroRate(context.to_string()));
    }
    if !rate.is_finite() || rate < 0.0 {
        return Err(RateError::parse(context, format!("invalid rate value: {rate}")));
    }
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_rate() {
        assert_eq!(checked_rate(0.92, "EUR"), Ok(0.92));
        assert_eq!(
            checked_rate(0.0, "EUR"),
            Err(RateError::ZeroRate("EUR".to_string()))
        );
        assert!(matches!(
            checked_rate(-1.5, "EUR"),
            Err(RateError::Parse { .. })
        ));
        assert!(matches!(
            checked_rate(f64::INFINITY, "EUR"),
            Err(RateError::Parse { .. })
        ));
        assert!(matches!(
            checked_rate(f64::NAN, "EUR"),
            Err(RateError::Parse { .. })
        ));
    }
}
