//! Market-data providers.
//!
//! Defines the `PriceProvider` trait and the Yahoo Finance implementation.
//! One quote per pick, sequential, no retry — a failed quote is reported
//! as a `QuoteError` and the caller decides what to do with it.

pub mod yahoo;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::types::{AssetType, QuoteError};

/// Abstraction over external price providers.
///
/// `latest_close` returns the most recent trading-day closing price for
/// a ticker. Asset types outside `stock`/`crypto` must short-circuit to
/// `QuoteError::UnsupportedAsset` without touching the network.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch the latest available close for a ticker.
    async fn latest_close(
        &self,
        ticker: &str,
        asset_type: AssetType,
    ) -> Result<Decimal, QuoteError>;

    /// Provider name for logging and identification.
    fn name(&self) -> &str;
}
