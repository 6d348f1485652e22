//! Picks input — CSV loading and the cached pick store.
//!
//! The input file is a small CSV with header `name,ticker,type,start_price`,
//! one row per participant pick. Malformed rows are fatal; a non-positive
//! start price is rejected at load time rather than surfacing later as a
//! division error.

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

use crate::types::Pick;

/// Read all picks from a CSV file, in file order.
pub fn load_picks(path: &Path) -> Result<Vec<Pick>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open picks file: {}", path.display()))?;

    let mut picks = Vec::new();
    for (idx, row) in reader.deserialize::<Pick>().enumerate() {
        // Header is line 1, first record line 2.
        let line = idx + 2;
        let pick = row.with_context(|| {
            format!("malformed row at line {line} of {}", path.display())
        })?;
        if pick.start_price <= Decimal::ZERO {
            bail!(
                "line {line} ({}): start_price must be positive, got {}",
                pick.ticker,
                pick.start_price,
            );
        }
        picks.push(pick);
    }

    info!(count = picks.len(), file = %path.display(), "Picks loaded");
    Ok(picks)
}

/// Cached pick source keyed by file modification time.
///
/// Re-reads the CSV only when the file's mtime changes; `invalidate`
/// forces a reload on the next `load`. If the mtime can't be read the
/// cache is bypassed and the file is read directly.
pub struct PickStore {
    path: PathBuf,
    cached: Option<(SystemTime, Vec<Pick>)>,
}

impl PickStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the picks, reading the file if the cache is cold or stale.
    pub fn load(&mut self) -> Result<Vec<Pick>> {
        let mtime = fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok();

        if let (Some((cached_at, picks)), Some(mtime)) = (&self.cached, mtime) {
            if *cached_at == mtime {
                debug!(file = %self.path.display(), "Pick cache hit");
                return Ok(picks.clone());
            }
        }

        let picks = load_picks(&self.path)?;
        if let Some(mtime) = mtime {
            self.cached = Some((mtime, picks.clone()));
        }
        Ok(picks)
    }

    /// Drop the cache so the next `load` re-reads the file.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
