//! DRAFTBOARD — Fantasy stock/crypto draft leaderboard dashboard.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod picks;
pub mod provider;
pub mod leaderboard;
pub mod dashboard;
