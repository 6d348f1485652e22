//! Shared types for the DRAFTBOARD leaderboard.
//!
//! These types form the data model used across all modules: the CSV
//! input row, the quote failure type, and the ranked output row the
//! dashboard renders.

use chrono::DateTime;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Asset type
// ---------------------------------------------------------------------------

/// Kind of asset a pick refers to.
///
/// Anything other than `stock` or `crypto` in the CSV lands on
/// `Unsupported` and is skipped by the pipeline rather than failing the
/// load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Stock,
    Crypto,
    #[serde(other)]
    Unsupported,
}

impl AssetType {
    /// Whether this asset type can be quoted at all.
    pub fn is_quotable(&self) -> bool {
        matches!(self, AssetType::Stock | AssetType::Crypto)
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetType::Stock => write!(f, "stock"),
            AssetType::Crypto => write!(f, "crypto"),
            AssetType::Unsupported => write!(f, "unsupported"),
        }
    }
}

// ---------------------------------------------------------------------------
// Pick
// ---------------------------------------------------------------------------

/// A participant's draft pick as read from the CSV input file.
///
/// `name` is the participant identifier (not required unique), `ticker`
/// the asset symbol as the provider knows it, and `start_price` the
/// recorded price at the start of the tracking window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pick {
    pub name: String,
    pub ticker: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub start_price: Decimal,
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {} ({}) from ${:.2}",
            self.name, self.ticker, self.asset_type, self.start_price,
        )
    }
}

// ---------------------------------------------------------------------------
// Quote failure
// ---------------------------------------------------------------------------

/// Why a price quote could not be produced for a pick.
///
/// The pipeline's policy is to drop the pick for that render, but the
/// reason stays explicit so callers can log or surface it instead.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("asset type is not quotable")]
    UnsupportedAsset,

    #[error("quote request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider rejected {ticker}: {message}")]
    Rejected { ticker: String, message: String },

    #[error("no closing price available for {ticker}")]
    EmptyHistory { ticker: String },

    #[error("could not parse provider response: {0}")]
    Parse(String),
}

// ---------------------------------------------------------------------------
// Leaderboard rows
// ---------------------------------------------------------------------------

/// One ranked row of the leaderboard. Exists only for the duration of a
/// single render; picks whose quote failed never become rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// Dense 1-based rank; ties are broken by CSV load order.
    pub rank: usize,
    pub name: String,
    pub ticker: String,
    pub start_price: Decimal,
    /// Latest close, rounded to 2 decimal places.
    pub current_price: Decimal,
    /// Signed percent change since `start_price`, rounded to 2 dp.
    pub pct_change: Decimal,
}

impl LeaderboardRow {
    /// Top-3 ranks render as medals, the rest as plain integers.
    pub fn rank_display(&self) -> String {
        match self.rank {
            1 => "🥇".to_string(),
            2 => "🥈".to_string(),
            3 => "🥉".to_string(),
            n => n.to_string(),
        }
    }

    pub fn start_price_display(&self) -> String {
        format!("${:.2}", self.start_price)
    }

    pub fn current_price_display(&self) -> String {
        format!("${:.2}", self.current_price)
    }

    /// Percent change with two decimals and an explicit sign for gains.
    pub fn pct_change_display(&self) -> String {
        if self.pct_change > Decimal::ZERO {
            format!("+{:.2}%", self.pct_change)
        } else {
            format!("{:.2}%", self.pct_change)
        }
    }

    /// Coloring hint for the presentation layer.
    pub fn direction(&self) -> &'static str {
        if self.pct_change > Decimal::ZERO {
            "up"
        } else if self.pct_change < Decimal::ZERO {
            "down"
        } else {
            "flat"
        }
    }
}

impl fmt::Display for LeaderboardRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {} → {} ({})",
            self.rank,
            self.name,
            self.ticker,
            self.start_price_display(),
            self.current_price_display(),
            self.pct_change_display(),
        )
    }
}

/// A full leaderboard render: ordered rows plus the wall-clock refresh
/// time in the configured display time zone.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    pub rows: Vec<LeaderboardRow>,
    pub refreshed_at: DateTime<Tz>,
}

impl Leaderboard {
    /// "Last refreshed" timestamp formatted for display.
    pub fn refreshed_at_display(&self) -> String {
        self.refreshed_at.format("%Y-%m-%d %I:%M:%S %p %Z").to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn row(rank: usize, pct: Decimal) -> LeaderboardRow {
        LeaderboardRow {
            rank,
            name: "Alice".to_string(),
            ticker: "AAPL".to_string(),
            start_price: dec!(100.00),
            current_price: dec!(110.00),
            pct_change: pct,
        }
    }

    // -- AssetType --

    #[test]
    fn test_asset_type_is_quotable() {
        assert!(AssetType::Stock.is_quotable());
        assert!(AssetType::Crypto.is_quotable());
        assert!(!AssetType::Unsupported.is_quotable());
    }

    #[test]
    fn test_asset_type_display() {
        assert_eq!(format!("{}", AssetType::Stock), "stock");
        assert_eq!(format!("{}", AssetType::Crypto), "crypto");
        assert_eq!(format!("{}", AssetType::Unsupported), "unsupported");
    }

    #[test]
    fn test_asset_type_unknown_value_falls_back() {
        let parsed: AssetType = serde_json::from_str("\"nft\"").unwrap();
        assert_eq!(parsed, AssetType::Unsupported);
    }

    #[test]
    fn test_asset_type_known_values_parse() {
        let stock: AssetType = serde_json::from_str("\"stock\"").unwrap();
        let crypto: AssetType = serde_json::from_str("\"crypto\"").unwrap();
        assert_eq!(stock, AssetType::Stock);
        assert_eq!(crypto, AssetType::Crypto);
    }

    // -- Pick --

    #[test]
    fn test_pick_display() {
        let pick = Pick {
            name: "Alice".to_string(),
            ticker: "AAPL".to_string(),
            asset_type: AssetType::Stock,
            start_price: dec!(100.00),
        };
        let display = format!("{pick}");
        assert!(display.contains("Alice"));
        assert!(display.contains("AAPL"));
        assert!(display.contains("$100.00"));
    }

    // -- LeaderboardRow formatting --

    #[test]
    fn test_rank_display_medals() {
        assert_eq!(row(1, dec!(5)).rank_display(), "🥇");
        assert_eq!(row(2, dec!(5)).rank_display(), "🥈");
        assert_eq!(row(3, dec!(5)).rank_display(), "🥉");
        assert_eq!(row(4, dec!(5)).rank_display(), "4");
        assert_eq!(row(10, dec!(5)).rank_display(), "10");
    }

    #[test]
    fn test_price_display_two_decimals() {
        let r = row(1, dec!(10));
        assert_eq!(r.start_price_display(), "$100.00");
        assert_eq!(r.current_price_display(), "$110.00");
    }

    #[test]
    fn test_pct_change_display_signs() {
        assert_eq!(row(1, dec!(10.00)).pct_change_display(), "+10.00%");
        assert_eq!(row(1, dec!(-10.00)).pct_change_display(), "-10.00%");
        assert_eq!(row(1, dec!(0.00)).pct_change_display(), "0.00%");
    }

    #[test]
    fn test_direction() {
        assert_eq!(row(1, dec!(0.01)).direction(), "up");
        assert_eq!(row(1, dec!(-0.01)).direction(), "down");
        assert_eq!(row(1, dec!(0)).direction(), "flat");
    }

    #[test]
    fn test_row_serialization_roundtrip() {
        let r = row(1, dec!(10.00));
        let json = serde_json::to_string(&r).unwrap();
        let parsed: LeaderboardRow = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.rank, 1);
        assert_eq!(parsed.ticker, "AAPL");
        assert_eq!(parsed.pct_change, dec!(10.00));
    }

    // -- Leaderboard --

    #[test]
    fn test_refreshed_at_display_in_zone() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let board = Leaderboard {
            rows: Vec::new(),
            refreshed_at: Utc
                .with_ymd_and_hms(2026, 8, 4, 13, 30, 0)
                .unwrap()
                .with_timezone(&tz),
        };
        let display = board.refreshed_at_display();
        assert!(display.contains("2026-08-04"));
        assert!(display.contains("09:30:00 AM"));
        assert!(display.contains("EDT"));
    }

    // -- QuoteError --

    #[test]
    fn test_quote_error_display() {
        let e = QuoteError::EmptyHistory {
            ticker: "ZZZZ".to_string(),
        };
        assert_eq!(format!("{e}"), "no closing price available for ZZZZ");

        let e = QuoteError::Status {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert!(format!("{e}").contains("404"));
    }
}
