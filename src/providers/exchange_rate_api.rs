use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::instrument;

use super::util::{checked_rate, fetch_json};
use crate::core::currency::{Currency, CurrencyRateProvider};
use crate::core::error::RateError;

pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com";

/// Fiat to fiat rates from a base-currency rate table.
pub struct ExchangeRateApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, RateValue>,
}

/// Rates arrive either as JSON numbers or as numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RateValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RateValue {
    fn to_rate(&self, code: &str) -> Result<f64, RateError> {
        let rate = match self {
            RateValue::Number(v) => *v,
            RateValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| RateError::parse(code, format!("invalid rate format: {e}")))?,
            RateValue::Other(v) => {
                return Err(RateError::parse(code, format!("unexpected rate type: {v}")));
            }
        };

        checked_rate(rate, code)
    }
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "FiatRateFetch",
        skip(self),
        fields(from = %from.code, to = %to.code)
    )]
    async fn get_rate(&self, from: &Currency, to: &Currency) -> Result<f64, RateError> {
        let url = format!("{}/v4/latest/{}", self.base_url, from.code);
        let data: LatestRatesResponse = fetch_json(&self.client, &url, &from.code).await?;

        let value = data
            .rates
            .get(&to.code)
            .ok_or_else(|| RateError::NotFound(format!("currency {} not found", to.code)))?;

        value.to_rate(&to.code)
    }
}
