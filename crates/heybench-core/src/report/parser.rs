//! Field-by-field extraction of `hey` summary output.
//!
//! The report format belongs to the load generator and drifts between
//! versions, so each field is located with its own pattern. A field that is
//! missing or unreadable never affects the others.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{BenchmarkMetrics, PERCENTILE_RANKS};

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

static TOTAL_RE: Lazy<Regex> = Lazy::new(|| labeled_secs("Total"));
static SLOWEST_RE: Lazy<Regex> = Lazy::new(|| labeled_secs("Slowest"));
static FASTEST_RE: Lazy<Regex> = Lazy::new(|| labeled_secs("Fastest"));
static AVERAGE_RE: Lazy<Regex> = Lazy::new(|| labeled_secs("Average"));

static RPS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Requests/sec:\s+([0-9.]+)").expect("valid requests/sec pattern"));

/// One pattern per rank. `%` may repeat and may be followed by `+` markers
/// (e.g. `99%+`).
///
/// The leading `\b` is a deliberate tightening over a bare `{rank}%` search:
/// the rank must not be the tail of a longer number, so `10%` never matches
/// inside `110%`.
static PERCENTILE_RES: Lazy<Vec<(u32, Regex)>> = Lazy::new(|| {
    PERCENTILE_RANKS
        .iter()
        .map(|rank| {
            let pattern = format!(r"\b{rank}%+\+*\s+in\s+([0-9.]+)\s+secs");
            (*rank, Regex::new(&pattern).expect("valid percentile pattern"))
        })
        .collect()
});

static STATUS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([0-9]{3})\]\s+([0-9]+)\s+responses").expect("valid status pattern")
});

fn labeled_secs(label: &str) -> Regex {
    Regex::new(&format!(r"{label}:\s+([0-9.]+)\s+secs")).expect("valid labeled seconds pattern")
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

/// Parse one raw report into [`BenchmarkMetrics`].
///
/// Never fails: absent or malformed fields become `0.0` (required numerics)
/// or `None` (percentiles and status counts).
pub fn parse(name: &str, raw_text: &str) -> BenchmarkMetrics {
    let total = capture_f64(&TOTAL_RE, raw_text);
    let slowest = capture_f64(&SLOWEST_RE, raw_text);
    let fastest = capture_f64(&FASTEST_RE, raw_text);
    let average = capture_f64(&AVERAGE_RE, raw_text);
    let rps = capture_f64(&RPS_RE, raw_text);

    let percentile_seconds: BTreeMap<u32, Option<f64>> = PERCENTILE_RES
        .iter()
        .map(|(rank, re)| (*rank, capture_f64(re, raw_text)))
        .collect();

    let (status_ok_count, status_other_count) = match status_breakdown(raw_text) {
        Some((ok, other)) => (Some(ok), Some(other)),
        None => (None, None),
    };

    let fields_found = [total, slowest, fastest, average, rps]
        .iter()
        .filter(|v| v.is_some())
        .count()
        + percentile_seconds.values().filter(|v| v.is_some()).count()
        + usize::from(status_ok_count.is_some());
    tracing::debug!(run = name, fields_found, "parsed benchmark report");

    BenchmarkMetrics {
        name: name.to_string(),
        total_seconds: total.unwrap_or(0.0),
        average_seconds: average.unwrap_or(0.0),
        fastest_seconds: fastest.unwrap_or(0.0),
        slowest_seconds: slowest.unwrap_or(0.0),
        requests_per_second: rps.unwrap_or(0.0),
        percentile_seconds,
        status_ok_count,
        status_other_count,
        raw_text: raw_text.to_string(),
    }
}

/// First match of `re`, with capture group 1 read as a float.
///
/// Text that does not convert (e.g. `1.2.3`) counts as no match.
fn capture_f64(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Sum status code lines into `(ok, other)`.
///
/// Returns `None` when the text has no status lines at all.
fn status_breakdown(text: &str) -> Option<(u64, u64)> {
    let mut seen = false;
    let mut ok: u64 = 0;
    let mut other: u64 = 0;

    for caps in STATUS_RE.captures_iter(text) {
        seen = true;
        let Ok(count) = caps[2].parse::<u64>() else {
            continue;
        };
        if &caps[1] == "200" {
            ok = ok.saturating_add(count);
        } else {
            other = other.saturating_add(count);
        }
    }

    seen.then_some((ok, other))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
