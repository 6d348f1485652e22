//! Dashboard API route handlers.
//!
//! All endpoints return JSON. State is shared via `Arc<DashboardState>`.
//! `/api/leaderboard` re-runs the full pipeline on every request — that
//! is the refresh model: one fetch pass per page load.

use axum::{extract::State, http::StatusCode, Json};
use chrono_tz::Tz;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::error;

use crate::leaderboard;
use crate::picks::PickStore;
use crate::provider::PriceProvider;
use crate::types::Leaderboard;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub picks: RwLock<PickStore>,
    pub provider: Box<dyn PriceProvider>,
    pub tz: Tz,
    pub title: String,
}

impl DashboardState {
    pub fn new(store: PickStore, provider: Box<dyn PriceProvider>, tz: Tz, title: String) -> Self {
        Self {
            picks: RwLock::new(store),
            provider,
            tz,
            title,
        }
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardResponse {
    pub title: String,
    /// "Last refreshed" timestamp in the configured display time zone.
    pub refreshed_at: String,
    pub rows: Vec<RowView>,
}

/// One leaderboard row formatted for presentation: currency strings with
/// two decimals, signed percent string, medal markers for the top 3, and
/// a direction hint for coloring.
#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    pub rank: usize,
    pub rank_display: String,
    pub name: String,
    pub ticker: String,
    pub start_price: String,
    pub current_price: String,
    pub pct_change: String,
    pub direction: String,
}

impl LeaderboardResponse {
    pub fn from_board(title: &str, board: &Leaderboard) -> Self {
        Self {
            title: title.to_string(),
            refreshed_at: board.refreshed_at_display(),
            rows: board
                .rows
                .iter()
                .map(|row| RowView {
                    rank: row.rank,
                    rank_display: row.rank_display(),
                    name: row.name.clone(),
                    ticker: row.ticker.clone(),
                    start_price: row.start_price_display(),
                    current_price: row.current_price_display(),
                    pct_change: row.pct_change_display(),
                    direction: row.direction().to_string(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/leaderboard
///
/// Loads the picks (cached by file mtime), runs one sequential quote
/// pass, and returns the ranked board. A picks-load failure is fatal
/// for the request and surfaces as a 500.
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<LeaderboardResponse>, (StatusCode, String)> {
    let picks = {
        let mut store = state.picks.write().await;
        store.load().map_err(|e| {
            error!(error = format!("{e:#}"), "Failed to load picks");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to load picks: {e:#}"),
            )
        })?
    };

    let board = leaderboard::compute(&picks, state.provider.as_ref(), state.tz).await;
    Ok(Json(LeaderboardResponse::from_board(&state.title, &board)))
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LeaderboardRow;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn sample_board() -> Leaderboard {
        let tz: Tz = "America/New_York".parse().unwrap();
        Leaderboard {
            rows: vec![
                LeaderboardRow {
                    rank: 1,
                    name: "Alice".to_string(),
                    ticker: "AAPL".to_string(),
                    start_price: dec!(100.00),
                    current_price: dec!(110.00),
                    pct_change: dec!(10.00),
                },
                LeaderboardRow {
                    rank: 2,
                    name: "Bob".to_string(),
                    ticker: "MSFT".to_string(),
                    start_price: dec!(50.00),
                    current_price: dec!(45.00),
                    pct_change: dec!(-10.00),
                },
            ],
            refreshed_at: Utc
                .with_ymd_and_hms(2026, 8, 7, 20, 0, 0)
                .unwrap()
                .with_timezone(&tz),
        }
    }

    #[test]
    fn test_response_from_board_formats_rows() {
        let resp = LeaderboardResponse::from_board("Office Draft", &sample_board());

        assert_eq!(resp.title, "Office Draft");
        assert_eq!(resp.rows.len(), 2);

        let first = &resp.rows[0];
        assert_eq!(first.rank, 1);
        assert_eq!(first.rank_display, "🥇");
        assert_eq!(first.start_price, "$100.00");
        assert_eq!(first.current_price, "$110.00");
        assert_eq!(first.pct_change, "+10.00%");
        assert_eq!(first.direction, "up");

        let second = &resp.rows[1];
        assert_eq!(second.rank_display, "🥈");
        assert_eq!(second.pct_change, "-10.00%");
        assert_eq!(second.direction, "down");
    }

    #[test]
    fn test_response_refreshed_at_in_display_zone() {
        let resp = LeaderboardResponse::from_board("t", &sample_board());
        assert!(resp.refreshed_at.contains("2026-08-07"));
        assert!(resp.refreshed_at.contains("04:00:00 PM"));
        assert!(resp.refreshed_at.contains("EDT"));
    }

    #[test]
    fn test_response_serializes() {
        let resp = LeaderboardResponse::from_board("t", &sample_board());
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("AAPL"));
        assert!(json.contains("+10.00%"));
        assert!(json.contains("refreshed_at"));
    }
}
