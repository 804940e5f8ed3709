pub mod coingecko;
pub mod exchange_rate_api;
pub mod util;

use crate::core::resolver::ProviderSet;
use coingecko::{CoinGeckoCryptoProvider, CoinGeckoFiatProvider};
use exchange_rate_api::ExchangeRateApiProvider;
use std::sync::Arc;

/// Wires the HTTP providers for every currency pairing.
pub fn default_provider_set(
    exchange_rate_url: &str,
    coingecko_url: &str,
    client: reqwest::Client,
) -> ProviderSet {
    ProviderSet {
        fiat: Arc::new(ExchangeRateApiProvider::new(exchange_rate_url, client.clone())),
        crypto: Arc::new(CoinGeckoCryptoProvider::new(coingecko_url, client.clone())),
        crypto_fiat: Arc::new(CoinGeckoFiatProvider::new(coingecko_url, client)),
    }
}
