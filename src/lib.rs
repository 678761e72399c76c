//! # Match Normalizer
//!
//! Normalizes a denormalized per-player, per-match football statistics file
//! into four relational tables: teams, matches, players and statistics.
//!
//! ## Architecture
//!
//! - **models**: Input row and derived table rows
//! - **normalize**: Validation and table derivation
//! - **storage**: JSONL output files
//! - **config**: Configuration loading and validation

pub mod config;
pub mod models;
pub mod normalize;
pub mod storage;

pub use models::*;
pub use normalize::{Normalized, NormalizeError, RunSummary};
