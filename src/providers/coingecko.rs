use async_trait::async_trait;
use std::collections::HashMap;
use tracing::instrument;

use super::util::{checked_rate, fetch_json};
use crate::core::currency::{Currency, CurrencyKind, CurrencyRateProvider};
use crate::core::error::RateError;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// `{"<id>": {"<vs_currency>": price}}`
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

#[derive(Clone)]
struct CoinGeckoClient {
    base_url: String,
    client: reqwest::Client,
}

impl CoinGeckoClient {
    fn new(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    async fn simple_price(
        &self,
        ids: &[&str],
        vs_currency: &str,
    ) -> Result<SimplePriceResponse, RateError> {
        let ids = ids.join(",");
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.base_url, ids, vs_currency
        );
        fetch_json(&self.client, &url, &format!("{ids}/{vs_currency}")).await
    }
}

/// Positive price of `id` in `vs_currency`.
fn price_of(data: &SimplePriceResponse, id: &str, vs_currency: &str) -> Result<f64, RateError> {
    let price = data
        .get(id)
        .and_then(|prices| prices.get(vs_currency))
        .copied()
        .ok_or_else(|| RateError::NotFound(format!("{id} price in {vs_currency}")))?;
    checked_rate(price, &format!("{id} in {vs_currency}"))
}

/// Crypto to crypto rates, crossed through USD prices.
pub struct CoinGeckoCryptoProvider {
    api: CoinGeckoClient,
}

impl CoinGeckoCryptoProvider {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            api: CoinGeckoClient::new(base_url, client),
        }
    }
}

#[async_trait]
impl CurrencyRateProvider for CoinGeckoCryptoProvider {
    #[instrument(
        name = "CryptoRateFetch",
        skip(self),
        fields(from = %from.code, to = %to.code)
    )]
    async fn get_rate(&self, from: &Currency, to: &Currency) -> Result<f64, RateError> {
        let from_id = from.provider_id.as_str();
        let to_id = to.provider_id.as_str();
        let data = self.api.simple_price(&[from_id, to_id], "usd").await?;

        let from_usd = price_of(&data, from_id, "usd")?;
        let to_usd = price_of(&data, to_id, "usd")?;

        checked_rate(from_usd / to_usd, &format!("{from_id}/{to_id}"))
    }
}

/// Crypto to fiat rates in either direction.
///
/// The provider only quotes crypto in fiat terms, so fiat to crypto
/// is the inverse of that quote.
pub struct CoinGeckoFiatProvider {
    api: CoinGeckoClient,
}

impl CoinGeckoFiatProvider {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            api: CoinGeckoClient::new(base_url, client),
        }
    }
}

#[async_trait]
impl CurrencyRateProvider for CoinGeckoFiatProvider {
    #[instrument(
        name = "CryptoFiatRateFetch",
        skip(self),
        fields(from = %from.code, to = %to.code)
    )]
    async fn get_rate(&self, from: &Currency, to: &Currency) -> Result<f64, RateError> {
        let (crypto, fiat, inverse) = match from.kind {
            CurrencyKind::Crypto => (from, to, false),
            CurrencyKind::Fiat => (to, from, true),
        };

        let crypto_id = crypto.provider_id.as_str();
        let fiat_lower = fiat.code.to_lowercase();
        let data = self.api.simple_price(&[crypto_id], &fiat_lower).await?;

        let price = price_of(&data, crypto_id, &fiat_lower)?;
        if inverse {
            checked_rate(1.0 / price, &format!("{fiat_lower}/{crypto_id}"))
        } else {
            Ok(price)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::Catalog;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(ids: &str, vs: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .and(query_param("ids", ids))
            .and(query_param("vs_currencies", vs))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn pair(from: &str, to: &str) -> (Currency, Currency) {
        let catalog = Catalog::builtin();
        (catalog.describe(from), catalog.describe(to))
    }

    #[tokio::test]
    async fn test_crypto_cross_rate() {
        let server = create_mock_server(
            "bitcoin,ethereum",
            "usd",
            r#"{"bitcoin": {"usd": 50000}, "ethereum": {"usd": 2500}}"#,
        )
        .await;
        let provider = CoinGeckoCryptoProvider::new(&server.uri(), reqwest::Client::new());

        let (btc, eth) = pair("BTC", "ETH");
        let rate = provider.get_rate(&btc, &eth).await.unwrap();
        assert_eq!(rate, 20.0);
    }

    #[tokio::test]
    async fn test_crypto_cross_rate_missing_id() {
        let server = create_mock_server(
            "bitcoin,the-open-network",
            "usd",
            r#"{"bitcoin": {"usd": 50000}}"#,
        )
        .await;
        let provider = CoinGeckoCryptoProvider::new(&server.uri(), reqwest::Client::new());

        let (btc, ton) = pair("BTC", "TON");
        let err = provider.get_rate(&btc, &ton).await.unwrap_err();
        assert_eq!(
            err,
            RateError::NotFound("the-open-network price in usd".to_string())
        );
    }

    #[tokio::test]
    async fn test_crypto_cross_rate_zero_divisor() {
        let server = create_mock_server(
            "bitcoin,dogecoin",
            "usd",
            r#"{"bitcoin": {"usd": 50000}, "dogecoin": {"usd": 0}}"#,
        )
        .await;
        let provider = CoinGeckoCryptoProvider::new(&server.uri(), reqwest::Client::new());

        let (btc, doge) = pair("BTC", "DOGE");
        let err = provider.get_rate(&btc, &doge).await.unwrap_err();
        assert!(matches!(err, RateError::ZeroRate(_)));
    }

    #[tokio::test]
    async fn test_crypto_to_fiat_rate() {
        let server =
            create_mock_server("bitcoin", "eur", r#"{"bitcoin": {"eur": 40000}}"#).await;
        let provider = CoinGeckoFiatProvider::new(&server.uri(), reqwest::Client::new());

        let (btc, eur) = pair("BTC", "EUR");
        assert_eq!(provider.get_rate(&btc, &eur).await.unwrap(), 40000.0);
    }

    #[tokio::test]
    async fn test_fiat_to_crypto_rate_is_inverted() {
        let server =
            create_mock_server("bitcoin", "eur", r#"{"bitcoin": {"eur": 40000}}"#).await;
        let provider = CoinGeckoFiatProvider::new(&server.uri(), reqwest::Client::new());

        let (eur, btc) = pair("EUR", "BTC");
        assert_eq!(provider.get_rate(&eur, &btc).await.unwrap(), 1.0 / 40000.0);
    }

    #[tokio::test]
    async fn test_crypto_fiat_missing_quote() {
        let server = create_mock_server("solana", "kzt", r#"{"solana": {}}"#).await;
        let provider = CoinGeckoFiatProvider::new(&server.uri(), reqwest::Client::new());

        let (sol, kzt) = pair("SOL", "KZT");
        let err = provider.get_rate(&sol, &kzt).await.unwrap_err();
        assert_eq!(err, RateError::NotFound("solana price in kzt".to_string()));
    }

    #[tokio::test]
    async fn test_crypto_fiat_zero_price_not_inverted() {
        let server = create_mock_server("tether", "usd", r#"{"tether": {"usd": 0}}"#).await;
        let provider = CoinGeckoFiatProvider::new(&server.uri(), reqwest::Client::new());

        let (usd, usdt) = pair("USD", "USDT");
        let err = provider.get_rate(&usd, &usdt).await.unwrap_err();
        assert!(matches!(err, RateError::ZeroRate(_)));
    }

    #[tokio::test]
    async fn test_crypto_cross_rate_negative_price() {
        let server = create_mock_server(
            "bitcoin,ethereum",
            "usd",
            r#"{"bitcoin": {"usd": -50000}, "ethereum": {"usd": 2500}}"#,
        )
        .await;
        let provider = CoinGeckoCryptoProvider::new(&server.uri(), reqwest::Client::new());

        let (btc, eth) = pair("BTC", "ETH");
        let err = provider.get_rate(&btc, &eth).await.unwrap_err();
        assert!(matches!(err, RateError::Parse { .. }));
        assert!(err.to_string().contains("invalid rate value"));
    }

    #[tokio::test]
    async fn test_crypto_fiat_negative_price_rejected_both_ways() {
        let server =
            create_mock_server("bitcoin", "usd", r#"{"bitcoin": {"usd": -50000}}"#).await;
        let provider = CoinGeckoFiatProvider::new(&server.uri(), reqwest::Client::new());

        let (btc, usd) = pair("BTC", "USD");
        let err = provider.get_rate(&btc, &usd).await.unwrap_err();
        assert!(matches!(err, RateError::Parse { .. }));

        let err = provider.get_rate(&usd, &btc).await.unwrap_err();
        assert!(matches!(err, RateError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_malformed_price_response() {
        let server =
            create_mock_server("bitcoin", "usd", r#"{"bitcoin": {"usd": "fifty"}}"#).await;
        let provider = CoinGeckoFiatProvider::new(&server.uri(), reqwest::Client::new());

        let (btc, usd) = pair("BTC", "USD");
        let err = provider.get_rate(&btc, &usd).await.unwrap_err();
        assert!(matches!(err, RateError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_rate_limited_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;
        let provider = CoinGeckoCryptoProvider::new(&server.uri(), reqwest::Client::new());

        let (btc, eth) = pair("BTC", "ETH");
        let err = provider.get_rate(&btc, &eth).await.unwrap_err();
        assert_eq!(
            err,
            RateError::Status {
                status: 429,
                context: "bitcoin,ethereum/usd".to_string()
            }
        );
    }
}
