//! The leaderboard pipeline: quote every pick, compute percent change,
//! sort, rank.
//!
//! One linear pass, re-run in full on every page load. Picks whose quote
//! fails are dropped from that render — availability of the board wins
//! over completeness of coverage.

use chrono::Utc;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::provider::PriceProvider;
use crate::types::{Leaderboard, LeaderboardRow, Pick, QuoteError};

/// Signed percent change from `start` to `current`, rounded to 2 dp.
///
/// `start` must be non-zero; the picks loader enforces this.
pub fn pct_change(start: Decimal, current: Decimal) -> Decimal {
    ((current - start) / start * Decimal::ONE_HUNDRED).round_dp(2)
}

/// Sort quoted picks by percent change (descending) and assign dense
/// 1-based ranks. The sort is stable, so equal percent changes keep
/// their CSV load order.
pub fn rank_rows(quoted: Vec<(Pick, Decimal)>) -> Vec<LeaderboardRow> {
    let mut rows: Vec<LeaderboardRow> = quoted
        .into_iter()
        .map(|(pick, current)| LeaderboardRow {
            rank: 0, // assigned after the sort
            pct_change: pct_change(pick.start_price, current),
            name: pick.name,
            ticker: pick.ticker,
            start_price: pick.start_price,
            current_price: current.round_dp(2),
        })
        .collect();

    rows.sort_by(|a, b| b.pct_change.cmp(&a.pct_change));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

/// Run the full pipeline: one sequential quote per pick, drop failures,
/// rank the rest. The refresh timestamp is taken at the end of the pass
/// in the display time zone.
pub async fn compute(picks: &[Pick], provider: &dyn PriceProvider, tz: Tz) -> Leaderboard {
    let mut quoted = Vec::with_capacity(picks.len());

    for pick in picks {
        match provider.latest_close(&pick.ticker, pick.asset_type).await {
            Ok(price) => quoted.push((pick.clone(), price)),
            Err(QuoteError::UnsupportedAsset) => {
                debug!(ticker = %pick.ticker, asset_type = %pick.asset_type, "Skipping unsupported asset type");
            }
            Err(e) => {
                warn!(
                    ticker = %pick.ticker,
                    provider = provider.name(),
                    error = %e,
                    "Price fetch failed, dropping pick for this render"
                );
            }
        }
    }

    let dropped = picks.len() - quoted.len();
    let rows = rank_rows(quoted);
    info!(ranked = rows.len(), dropped, "Leaderboard computed");

    Leaderboard {
        rows,
        refreshed_at: Utc::now().with_timezone(&tz),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
