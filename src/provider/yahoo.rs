//! Yahoo Finance price integration.
//!
//! Quotes both stocks and crypto pairs (e.g. `BTC-USD`) through the
//! public chart endpoint — no API key required.
//!
//! Endpoint: https://query1.finance.yahoo.com/v8/finance/chart/{symbol}
//! A `range=1d&interval=1d` request yields the current trading day's
//! candle; the last non-null close is the latest traded price.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use super::PriceProvider;
use crate::types::{AssetType, QuoteError};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const PROVIDER_NAME: &str = "yahoo-finance";

// ---------------------------------------------------------------------------
// API response types (Yahoo JSON → Rust)
// ---------------------------------------------------------------------------

/// Envelope returned by `/v8/finance/chart`. We only deserialize the
/// fields we need.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    /// Live quote included in the meta block; used as a fallback when
    /// the candle has no close yet (e.g. right at market open).
    #[serde(default)]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    /// Close series; entries are null for periods with no trades.
    #[serde(default)]
    close: Vec<Option<f64>>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Yahoo Finance chart-API client.
pub struct YahooClient {
    http: Client,
    base_url: String,
}

impl YahooClient {
    /// Create a new client. `base_url` overrides the public endpoint
    /// (used for tests against a local stub).
    pub fn new(base_url: Option<String>, timeout: std::time::Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("draftboard/0.1.0 (fantasy-draft-leaderboard)")
            .build()
            .context("Failed to build HTTP client for Yahoo")?;

        Ok(Self {
            http,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    async fn fetch_chart(&self, ticker: &str) -> Result<ChartResponse, QuoteError> {
        let url = format!(
            "{}/v8/finance/chart/{}?range=1d&interval=1d",
            self.base_url,
            urlencoding::encode(ticker),
        );

        debug!(url = %url, "Fetching Yahoo chart");

        let resp = self.http.get(&url).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(QuoteError::Status { status, body });
        }

        resp.json::<ChartResponse>()
            .await
            .map_err(|e| QuoteError::Parse(e.to_string()))
    }

    /// Pull the latest close out of a chart response.
    fn extract_close(resp: ChartResponse, ticker: &str) -> Result<Decimal, QuoteError> {
        if let Some(err) = &resp.chart.error {
            if !err.is_null() {
                return Err(QuoteError::Rejected {
                    ticker: ticker.to_string(),
                    message: err.to_string(),
                });
            }
        }

        let result = resp
            .chart
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| QuoteError::EmptyHistory {
                ticker: ticker.to_string(),
            })?;

        let close = result
            .indicators
            .quote
            .iter()
            .flat_map(|q| q.close.iter())
            .rev()
            .find_map(|c| *c)
            .or(result.meta.regular_market_price)
            .ok_or_else(|| QuoteError::EmptyHistory {
                ticker: ticker.to_string(),
            })?;

        Decimal::from_f64(close)
            .ok_or_else(|| QuoteError::Parse(format!("close {close} is not a valid decimal")))
    }
}

#[async_trait]
impl PriceProvider for YahooClient {
    async fn latest_close(
        &self,
        ticker: &str,
        asset_type: AssetType,
    ) -> Result<Decimal, QuoteError> {
        if !asset_type.is_quotable() {
            return Err(QuoteError::UnsupportedAsset);
        }

        let resp = self.fetch_chart(ticker).await?;
        Self::extract_close(resp, ticker)
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
