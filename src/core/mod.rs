//! Core rate resolution logic and abstractions

pub mod cache;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod log;
pub mod resolver;
pub mod settings;

// Re-export main types for cleaner imports
pub use cache::{CachedRate, PairKey, RateCache};
pub use conversion::{ConvertResult, RateRow};
pub use currency::{Catalog, Currency, CurrencyKind, CurrencyRateProvider};
pub use error::RateError;
pub use resolver::{ProviderSet, RateResolver};
