//! Benchmark report model and the parser that fills it from `hey` output.

pub mod parser;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use parser::parse;

/// Percentile ranks reported in the latency distribution section.
pub const PERCENTILE_RANKS: [u32; 7] = [10, 25, 50, 75, 90, 95, 99];

// ---------------------------------------------------------------------------
// BenchmarkMetrics
// ---------------------------------------------------------------------------

/// Structured metrics extracted from one load generator report.
///
/// Every field reflects only what was found in `raw_text`. Required numerics
/// default to `0.0`; optional values stay `None` when the report omits them,
/// so a measured zero can be told apart from "not reported".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BenchmarkMetrics {
    /// Caller-assigned label for the run (e.g. "async").
    pub name: String,
    pub total_seconds: f64,
    pub average_seconds: f64,
    pub fastest_seconds: f64,
    pub slowest_seconds: f64,
    pub requests_per_second: f64,
    /// Latency per percentile rank. Holds an entry for every rank in
    /// [`PERCENTILE_RANKS`].
    pub percentile_seconds: BTreeMap<u32, Option<f64>>,
    /// Responses with status 200. `None` when the report has no status code
    /// distribution at all.
    pub status_ok_count: Option<u64>,
    /// Responses with any status other than 200.
    pub status_other_count: Option<u64>,
    /// The unparsed report, kept for diagnostics.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub raw_text: String,
}

impl BenchmarkMetrics {
    /// Latency at `rank`, or `None` if the report did not include it.
    pub fn percentile(&self, rank: u32) -> Option<f64> {
        self.percentile_seconds.get(&rank).copied().flatten()
    }
}
