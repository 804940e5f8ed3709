//! Amount conversion and multiplier tables built on the rate resolver.

use crate::core::error::RateError;
use crate::core::resolver::RateResolver;
use chrono::Local;
use serde::Serialize;
use tracing::warn;

/// Source amounts shown in a rates table.
pub const TABLE_MULTIPLIERS: [u32; 4] = [1, 10, 100, 1000];

/// Outcome of a conversion. Callers check `success` before using the numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResult {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub result: f64,
    pub rate: f64,
    pub last_update: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ConvertResult {
    fn failure(err: RateError) -> Self {
        Self {
            success: false,
            error_message: Some(err.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRow {
    pub multiplier: u32,
    pub from_amount: f64,
    pub to_amount: f64,
}

fn validate_amount(amount: f64) -> Result<(), RateError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(RateError::Validation(
            "Amount must be greater than 0".to_string(),
        ))
    }
}

/// Converts `amount` of `from` into `to`.
///
/// Invalid amounts are rejected before any rate lookup.
pub async fn convert(
    resolver: &RateResolver,
    amount: f64,
    from: &str,
    to: &str,
) -> ConvertResult {
    if let Err(err) = validate_amount(amount) {
        return ConvertResult::failure(err);
    }

    match resolver.resolve(from, to).await {
        Ok(rate) => ConvertResult {
            amount,
            from: from.to_string(),
            to: to.to_string(),
            result: amount * rate,
            rate,
            last_update: Local::now().format("%H:%M:%S").to_string(),
            success: true,
            error_message: None,
        },
        Err(err) => ConvertResult::failure(err),
    }
}

/// Rows for each of [`TABLE_MULTIPLIERS`].
///
/// Returns an empty table when no rate can be resolved.
pub async fn rates_table(resolver: &RateResolver, from: &str, to: &str) -> Vec<RateRow> {
    let rate = match resolver.resolve(from, to).await {
        Ok(rate) => rate,
        Err(err) => {
            warn!(error = %err, "No rate for {}-{}, returning empty table", from, to);
            return Vec::new();
        }
    };

    TABLE_MULTIPLIERS
        .iter()
        .map(|&multiplier| RateRow {
            multiplier,
            from_amount: f64::from(multiplier),
            to_amount: f64::from(multiplier) * rate,
        })
        .collect()
}
