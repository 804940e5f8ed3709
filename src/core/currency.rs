//! Currency catalog and rate provider abstractions

use crate::core::error::RateError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyKind {
    Fiat,
    Crypto,
}

impl Display for CurrencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CurrencyKind::Fiat => "fiat",
                CurrencyKind::Crypto => "crypto",
            }
        )
    }
}

/// Kind assigned to any code the catalog does not know.
pub const DEFAULT_KIND: CurrencyKind = CurrencyKind::Fiat;

/// Describes a single currency as known to the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub kind: CurrencyKind,
    /// Identifier used by the crypto price provider. Same as `code` when unmapped.
    pub provider_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

struct CatalogEntry {
    code: &'static str,
    name: &'static str,
    kind: CurrencyKind,
    symbol: &'static str,
    image_url: &'static str,
}

const fn fiat(
    code: &'static str,
    name: &'static str,
    symbol: &'static str,
    flag: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        code,
        name,
        kind: CurrencyKind::Fiat,
        symbol,
        image_url: flag,
    }
}

const fn crypto(
    code: &'static str,
    name: &'static str,
    symbol: &'static str,
    icon: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        code,
        name,
        kind: CurrencyKind::Crypto,
        symbol,
        image_url: icon,
    }
}

const BUILTIN: &[CatalogEntry] = &[
    fiat("USD", "US Dollar", "$", "https://flagcdn.com/w40/us.png"),
    fiat("EUR", "Euro", "€", "https://flagcdn.com/w40/eu.png"),
    fiat("RUB", "Russian Ruble", "₽", "https://flagcdn.com/w40/ru.png"),
    fiat("KZT", "Kazakhstani Tenge", "₸", "https://flagcdn.com/w40/kz.png"),
    fiat("CNY", "Chinese Yuan", "¥", "https://flagcdn.com/w40/cn.png"),
    fiat("GBP", "British Pound", "£", "https://flagcdn.com/w40/gb.png"),
    fiat("JPY", "Japanese Yen", "¥", "https://flagcdn.com/w40/jp.png"),
    fiat("CHF", "Swiss Franc", "Fr", "https://flagcdn.com/w40/ch.png"),
    fiat("CAD", "Canadian Dollar", "$", "https://flagcdn.com/w40/ca.png"),
    fiat("AUD", "Australian Dollar", "$", "https://flagcdn.com/w40/au.png"),
    crypto("BTC", "Bitcoin", "₿", "https://cryptologos.cc/logos/bitcoin-btc-logo.png"),
    crypto("ETH", "Ethereum", "Ξ", "https://cryptologos.cc/logos/ethereum-eth-logo.png"),
    crypto("USDT", "Tether", "₮", "https://cryptologos.cc/logos/tether-usdt-logo.png"),
    crypto("TON", "Toncoin", "💎", "https://cryptologos.cc/logos/toncoin-ton-logo.png"),
    crypto("SOL", "Solana", "◎", "https://cryptologos.cc/logos/solana-sol-logo.png"),
    crypto("XRP", "Ripple", "✕", "https://cryptologos.cc/logos/xrp-xrp-logo.png"),
    crypto("BNB", "Binance Coin", "BNB", "https://cryptologos.cc/logos/bnb-bnb-logo.png"),
    crypto("DOGE", "Dogecoin", "Ð", "https://cryptologos.cc/logos/dogecoin-doge-logo.png"),
];

/// Returns the CoinGecko id for a code.
///
/// Codes outside the mapped set pass through unchanged. Fiat codes rely on
/// this, and so do unmapped crypto codes, which reach the provider under
/// their own ticker.
pub fn provider_id(code: &str) -> String {
    match code {
        "BTC" => "bitcoin",
        "ETH" => "ethereum",
        "USDT" => "tether",
        "TON" => "the-open-network",
        "SOL" => "solana",
        "XRP" => "ripple",
        "BNB" => "binancecoin",
        "DOGE" => "dogecoin",
        other => other,
    }
    .to_string()
}

/// Immutable list of supported currencies.
#[derive(Debug, Clone)]
pub struct Catalog {
    currencies: Vec<Currency>,
}

impl Catalog {
    /// The currencies shipped with the application.
    pub fn builtin() -> Self {
        let currencies = BUILTIN
            .iter()
            .map(|entry| Currency {
                code: entry.code.to_string(),
                name: entry.name.to_string(),
                kind: entry.kind,
                provider_id: provider_id(entry.code),
                symbol: Some(entry.symbol.to_string()),
                image_url: Some(entry.image_url.to_string()),
            })
            .collect();
        Self { currencies }
    }

    pub fn list(&self) -> &[Currency] {
        &self.currencies
    }

    pub fn get(&self, code: &str) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.code == code)
    }

    /// Never fails: unknown codes are [`DEFAULT_KIND`].
    pub fn kind_of(&self, code: &str) -> CurrencyKind {
        self.get(code).map_or(DEFAULT_KIND, |c| c.kind)
    }

    pub fn provider_id(&self, code: &str) -> String {
        self.get(code)
            .map_or_else(|| provider_id(code), |c| c.provider_id.clone())
    }

    /// Catalog entry for `code`, or a descriptor built from
    /// [`Catalog::kind_of`] and [`Catalog::provider_id`].
    pub fn describe(&self, code: &str) -> Currency {
        self.get(code).cloned().unwrap_or_else(|| Currency {
            code: code.to_string(),
            name: code.to_string(),
            kind: self.kind_of(code),
            provider_id: self.provider_id(code),
            symbol: None,
            image_url: None,
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Rate such that `amount_in_from * rate == amount_in_to`.
    async fn get_rate(&self, from: &Currency, to: &Currency) -> Result<f64, RateError>;
}
