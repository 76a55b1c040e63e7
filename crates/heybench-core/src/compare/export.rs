use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Comparison;
use crate::error::HeybenchError;

// ---------------------------------------------------------------------------
// ReportFormat
// ---------------------------------------------------------------------------

/// Output format for a rendered comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Aligned text table for a terminal.
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for ReportFormat {
    type Err = HeybenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(HeybenchError::Validation(format!(
                "unknown report format \"{other}\" (expected table, json or csv)"
            ))),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// Render `comparison` in the requested format.
pub fn render(comparison: &Comparison, format: ReportFormat) -> Result<String, HeybenchError> {
    match format {
        ReportFormat::Table => Ok(comparison.render()),
        ReportFormat::Json => Ok(export_json(comparison)?),
        ReportFormat::Csv => export_csv(comparison),
    }
}

// ---------------------------------------------------------------------------
// JSON export
// ---------------------------------------------------------------------------

/// Export a comparison as pretty-printed JSON.
pub fn export_json(comparison: &Comparison) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(comparison)
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Export a comparison as CSV.
///
/// The header names the value columns after the two runs; cell contents are
/// the same formatted strings the table shows.
pub fn export_csv(comparison: &Comparison) -> Result<String, HeybenchError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "metric",
        comparison.baseline_name.as_str(),
        comparison.candidate_name.as_str(),
        "delta",
    ])?;
    for row in &comparison.rows {
        writer.write_record([&row.label, &row.baseline, &row.candidate, &row.delta])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| HeybenchError::Internal(format!("failed to flush CSV output: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| HeybenchError::Internal(format!("CSV output is not UTF-8: {e}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
