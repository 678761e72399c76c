//! Identifier types shared by the derived tables.

/// Match identifier as carried by the input file.
pub type MatchId = u64;

/// Team identifier as carried by the input file.
pub type TeamId = u64;

/// Player identifier as carried by the input file.
pub type PlayerId = u64;

/// Synthetic statistic identifier (1-based, input row order).
pub type StatId = u64;

/// Minutes in a full match, the denominator of `fraction_of_total_minutes`.
pub const MATCH_TOTAL_MINUTES: u32 = 90;
