//! Resolves exchange rates through the cache and the per-pairing providers.

use crate::core::cache::{PairKey, RateCache};
use crate::core::currency::{Catalog, CurrencyKind, CurrencyRateProvider};
use crate::core::error::RateError;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One provider per currency-type pairing.
#[derive(Clone)]
pub struct ProviderSet {
    pub fiat: Arc<dyn CurrencyRateProvider>,
    pub crypto: Arc<dyn CurrencyRateProvider>,
    pub crypto_fiat: Arc<dyn CurrencyRateProvider>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    FiatToFiat,
    CryptoToCrypto,
    CryptoFiat,
}

impl Route {
    pub fn for_kinds(from: CurrencyKind, to: CurrencyKind) -> Self {
        match (from, to) {
            (CurrencyKind::Crypto, CurrencyKind::Crypto) => Route::CryptoToCrypto,
            (CurrencyKind::Fiat, CurrencyKind::Fiat) => Route::FiatToFiat,
            _ => Route::CryptoFiat,
        }
    }
}

#[derive(Clone)]
pub struct RateResolver {
    catalog: Arc<Catalog>,
    cache: RateCache,
    providers: ProviderSet,
    timeout: Duration,
}

impl RateResolver {
    pub fn new(catalog: Arc<Catalog>, cache: RateCache, providers: ProviderSet) -> Self {
        Self {
            catalog,
            cache,
            providers,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Upper bound for a single provider call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    fn provider_for(&self, route: Route) -> &dyn CurrencyRateProvider {
        match route {
            Route::FiatToFiat => self.providers.fiat.as_ref(),
            Route::CryptoToCrypto => self.providers.crypto.as_ref(),
            Route::CryptoFiat => self.providers.crypto_fiat.as_ref(),
        }
    }

    /// Returns the rate converting one unit of `from` into `to`.
    ///
    /// A fresh cached rate is returned without a provider call. When the
    /// provider fails, any cached rate for the pair is returned, however old.
    #[instrument(name = "ResolveRate", skip(self))]
    pub async fn resolve(&self, from: &str, to: &str) -> Result<f64, RateError> {
        if from == to {
            return Ok(1.0);
        }

        let key = PairKey::new(from, to);
        if let Some(cached) = self.cache.get(&key).await {
            if cached.is_fresh(Utc::now()) {
                return Ok(cached.rate);
            }
            debug!("Cached rate for {} is stale", key);
        }

        match self.fetch(from, to).await {
            Ok(rate) => {
                self.cache.put(key, rate, Utc::now()).await;
                Ok(rate)
            }
            Err(err) => match self.cache.get(&key).await {
                Some(cached) => {
                    warn!(
                        error = %err,
                        observed_at = %cached.observed_at,
                        "Provider failed for {}, using cached rate", key
                    );
                    Ok(cached.rate)
                }
                None => Err(err),
            },
        }
    }

    async fn fetch(&self, from: &str, to: &str) -> Result<f64, RateError> {
        let from = self.catalog.describe(from);
        let to = self.catalog.describe(to);
        let route = Route::for_kinds(from.kind, to.kind);
        debug!(?route, "Dispatching {}-{}", from.code, to.code);

        tokio::time::timeout(self.timeout, self.provider_for(route).get_rate(&from, &to))
            .await
            .map_err(|_| RateError::Timeout(self.timeout))?
    }
}
