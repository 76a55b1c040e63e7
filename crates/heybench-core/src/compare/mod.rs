//! Side-by-side comparison of two benchmark runs as an aligned text table.

pub mod export;

use serde::{Deserialize, Serialize};

use crate::report::BenchmarkMetrics;

/// Header of the label column.
pub const METRIC_HEADER: &str = "Metric";

/// Header of the delta column. Deltas are always candidate minus baseline.
pub const DELTA_HEADER: &str = "Δ (B-A)";

/// Placeholder rendered for unset values and deltas that cannot be computed.
pub const MISSING: &str = "-";

const COLUMN_GAP: &str = "  ";

// ---------------------------------------------------------------------------
// Value formatting
// ---------------------------------------------------------------------------

/// Render a latency as fixed-point seconds, e.g. `0.1234s`.
pub fn format_seconds(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}s"),
        None => MISSING.to_string(),
    }
}

/// Render a response count as a plain integer.
pub fn format_count(value: Option<u64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => MISSING.to_string(),
    }
}

fn format_rate(value: f64) -> String {
    format!("{value:.2}")
}

fn seconds_delta(baseline: Option<f64>, candidate: Option<f64>) -> String {
    match (baseline, candidate) {
        (Some(a), Some(b)) => format!("{:+.4}s", b - a),
        _ => MISSING.to_string(),
    }
}

fn rate_delta(baseline: f64, candidate: f64) -> String {
    format!("{:+.2}", candidate - baseline)
}

// ---------------------------------------------------------------------------
// ComparisonRow / Comparison
// ---------------------------------------------------------------------------

/// One formatted row of a comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ComparisonRow {
    pub label: String,
    pub baseline: String,
    pub candidate: String,
    pub delta: String,
}

impl ComparisonRow {
    fn new(label: &str, baseline: String, candidate: String, delta: String) -> Self {
        Self {
            label: label.to_string(),
            baseline,
            candidate,
            delta,
        }
    }

    fn cells(&self) -> [&str; 4] {
        [&self.label, &self.baseline, &self.candidate, &self.delta]
    }
}

/// Side-by-side comparison of two benchmark runs.
///
/// The row set and order are fixed; only the cell contents depend on the
/// inputs. Building the same pair twice always yields identical rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Comparison {
    pub baseline_name: String,
    pub candidate_name: String,
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    pub fn build(baseline: &BenchmarkMetrics, candidate: &BenchmarkMetrics) -> Self {
        let a = baseline;
        let b = candidate;

        let latency = |label: &str, x: Option<f64>, y: Option<f64>| {
            ComparisonRow::new(label, format_seconds(x), format_seconds(y), seconds_delta(x, y))
        };
        // Status counts depend on request volume, so they are never differenced.
        let count = |label: &str, x: Option<u64>, y: Option<u64>| {
            ComparisonRow::new(label, format_count(x), format_count(y), MISSING.to_string())
        };

        let rows = vec![
            ComparisonRow::new(
                "Requests/sec",
                format_rate(a.requests_per_second),
                format_rate(b.requests_per_second),
                rate_delta(a.requests_per_second, b.requests_per_second),
            ),
            latency("Avg latency", Some(a.average_seconds), Some(b.average_seconds)),
            latency("p50", a.percentile(50), b.percentile(50)),
            latency("p95", a.percentile(95), b.percentile(95)),
            latency("p99", a.percentile(99), b.percentile(99)),
            latency("Slowest", Some(a.slowest_seconds), Some(b.slowest_seconds)),
            latency("Total time", Some(a.total_seconds), Some(b.total_seconds)),
            count("200 OK", a.status_ok_count, b.status_ok_count),
            count("Non-200", a.status_other_count, b.status_other_count),
        ];

        Self {
            baseline_name: a.name.clone(),
            candidate_name: b.name.clone(),
            rows,
        }
    }

    /// Width of each column in characters.
    ///
    /// Value columns also fit the run names used as their headers.
    pub fn column_widths(&self) -> [usize; 4] {
        let mut widths = [0usize; 4];
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths[1] = widths[1].max(self.baseline_name.chars().count());
        widths[2] = widths[2].max(self.candidate_name.chars().count());
        widths
    }

    /// Render the aligned text table: header, dash rule, one line per row.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let rule_len = widths.iter().sum::<usize>() + COLUMN_GAP.len() * (widths.len() - 1);

        let mut out = String::new();
        push_line(
            &mut out,
            [METRIC_HEADER, &self.baseline_name, &self.candidate_name, DELTA_HEADER],
            widths,
        );
        out.push_str(&"-".repeat(rule_len));
        out.push('\n');
        for row in &self.rows {
            push_line(&mut out, row.cells(), widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: [&str; 4], widths: [usize; 4]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(&padded.join(COLUMN_GAP));
    out.push('\n');
}

// ---------------------------------------------------------------------------
// compare
// ---------------------------------------------------------------------------

/// Render the comparison table for `baseline` against `candidate`.
pub fn compare(baseline: &BenchmarkMetrics, candidate: &BenchmarkMetrics) -> String {
    Comparison::build(baseline, candidate).render()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{parse, PERCENTILE_RANKS};

    /// Build a fully populated [`BenchmarkMetrics`] for use in tests.
    fn make_metrics(name: &str, base: f64) -> BenchmarkMetrics {
        BenchmarkMetrics {
            name: name.to_string(),
            total_seconds: base * 10.0,
            average_seconds: base,
            fastest_seconds: base / 2.0,
            slowest_seconds: base * 3.0,
            requests_per_second: 100.0,
            percentile_seconds: PERCENTILE_RANKS
                .iter()
                .map(|r| (*r, Some(base + f64::from(*r) / 1000.0)))
                .collect(),
            status_ok_count: Some(180),
            status_other_count: Some(20),
            raw_text: String::new(),
        }
    }

    fn shifted(m: &BenchmarkMetrics, name: &str, by: f64) -> BenchmarkMetrics {
        let mut out = m.clone();
        out.name = name.to_string();
        out.total_seconds += by;
        out.average_seconds += by;
        out.fastest_seconds += by;
        out.slowest_seconds += by;
        for v in out.percentile_seconds.values_mut() {
            *v = v.map(|x| x + by);
        }
        out
    }

    fn row<'a>(cmp: &'a Comparison, label: &str) -> &'a ComparisonRow {
        cmp.rows
            .iter()
            .find(|r| r.label == label)
            .expect("row should exist")
    }

    const BASELINE_TEXT: &str = "\
  Total:\t1.2345 secs
  Requests/sec:\t120.50
  Average:\t0.0100 secs
  50% in 0.0090 secs
  95% in 0.0200 secs
  [200] 200 responses
";

    const CANDIDATE_TEXT: &str = "\
  Total:\t1.2345 secs
  Requests/sec:\t80.00
  Average:\t0.0150 secs
  95% in 0.0300 secs
  [200] 200 responses
";

    // -----------------------------------------------------------------------
    // Formatting helpers
    // -----------------------------------------------------------------------

    #[test]
    fn format_seconds_uses_four_decimals_and_unit() {
        assert_eq!(format_seconds(Some(0.1234)), "0.1234s");
        assert_eq!(format_seconds(Some(2.0)), "2.0000s");
        assert_eq!(format_seconds(Some(0.0)), "0.0000s");
    }

    #[test]
    fn format_seconds_missing_is_dash() {
        assert_eq!(format_seconds(None), "-");
    }

    #[test]
    fn format_count_renders_plain_integer() {
        assert_eq!(format_count(Some(0)), "0");
        assert_eq!(format_count(Some(1200)), "1200");
        assert_eq!(format_count(None), "-");
    }

    // -----------------------------------------------------------------------
    // Rows and deltas
    // -----------------------------------------------------------------------

    #[test]
    fn rows_are_in_fixed_order() {
        let a = make_metrics("a", 0.1);
        let cmp = Comparison::build(&a, &a);
        let labels: Vec<&str> = cmp.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Requests/sec",
                "Avg latency",
                "p50",
                "p95",
                "p99",
                "Slowest",
                "Total time",
                "200 OK",
                "Non-200",
            ]
        );
    }

    #[test]
    fn uniform_latency_increase_renders_same_delta() {
        let a = make_metrics("async", 0.1);
        let b = shifted(&a, "sync", 0.01);
        let cmp = Comparison::build(&a, &b);
        for label in ["Avg latency", "p50", "p95", "p99", "Slowest", "Total time"] {
            assert_eq!(row(&cmp, label).delta, "+0.0100s", "row {label}");
        }
    }

    #[test]
    fn unset_percentile_on_either_side_gives_dash_delta() {
        let mut a = make_metrics("async", 0.1);
        let mut b = shifted(&a, "sync", 0.01);
        a.percentile_seconds.insert(95, None);
        b.percentile_seconds.insert(99, None);
        let cmp = Comparison::build(&a, &b);
        assert_eq!(row(&cmp, "p50").delta, "+0.0100s");
        assert_eq!(row(&cmp, "p95").baseline, "-");
        assert_eq!(row(&cmp, "p95").delta, "-");
        assert_eq!(row(&cmp, "p99").candidate, "-");
        assert_eq!(row(&cmp, "p99").delta, "-");
    }

    #[test]
    fn negative_delta_has_minus_sign() {
        let a = make_metrics("async", 0.2);
        let b = shifted(&a, "sync", -0.05);
        let cmp = Comparison::build(&a, &b);
        assert_eq!(row(&cmp, "Avg latency").delta, "-0.0500s");
    }

    #[test]
    fn status_rows_never_compute_delta() {
        let a = make_metrics("async", 0.1);
        let mut b = make_metrics("sync", 0.1);
        b.status_ok_count = Some(190);
        b.status_other_count = Some(10);
        let cmp = Comparison::build(&a, &b);
        let ok = row(&cmp, "200 OK");
        assert_eq!((ok.baseline.as_str(), ok.candidate.as_str()), ("180", "190"));
        assert_eq!(ok.delta, "-");
        let other = row(&cmp, "Non-200");
        assert_eq!((other.baseline.as_str(), other.candidate.as_str()), ("20", "10"));
        assert_eq!(other.delta, "-");
    }

    #[test]
    fn missing_status_section_renders_dashes() {
        let a = parse("a", "");
        let b = parse("b", "");
        let cmp = Comparison::build(&a, &b);
        assert_eq!(row(&cmp, "200 OK").baseline, "-");
        assert_eq!(row(&cmp, "Non-200").candidate, "-");
    }

    #[test]
    fn end_to_end_scenario() {
        let a = parse("async", BASELINE_TEXT);
        let b = parse("sync", CANDIDATE_TEXT);
        let cmp = Comparison::build(&a, &b);

        let rps = row(&cmp, "Requests/sec");
        assert_eq!(rps.baseline, "120.50");
        assert_eq!(rps.candidate, "80.00");
        assert_eq!(rps.delta, "-40.50");

        let p95 = row(&cmp, "p95");
        assert_eq!(p95.baseline, "0.0200s");
        assert_eq!(p95.candidate, "0.0300s");
        assert_eq!(p95.delta, "+0.0100s");

        let p50 = row(&cmp, "p50");
        assert_eq!(p50.baseline, "0.0090s");
        assert_eq!(p50.candidate, "-");
        assert_eq!(p50.delta, "-");

        let avg = row(&cmp, "Avg latency");
        assert_eq!(avg.delta, "+0.0050s");
        assert_eq!(row(&cmp, "Total time").delta, "+0.0000s");
        assert_eq!(row(&cmp, "200 OK").baseline, "200");
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    #[test]
    fn render_header_and_rule() {
        let a = parse("async", BASELINE_TEXT);
        let b = parse("sync", CANDIDATE_TEXT);
        let cmp = Comparison::build(&a, &b);
        let widths = cmp.column_widths();
        let text = cmp.render();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(widths, [12, 7, 7, 8]);
        // "Δ (B-A)" is seven characters padded into an eight-wide column.
        assert_eq!(lines[0], "Metric        async    sync     Δ (B-A) ");
        assert_eq!(lines[1], "-".repeat(40));
        assert_eq!(lines.len(), 2 + cmp.rows.len());
    }

    #[test]
    fn multibyte_run_names_are_measured_in_characters() {
        let name = "базовый-прогон";
        assert_eq!(name.chars().count(), 14);
        assert!(name.len() > 14);

        let a = make_metrics(name, 0.1);
        let b = make_metrics("b", 0.1);
        let cmp = Comparison::build(&a, &b);
        let widths = cmp.column_widths();
        assert_eq!(widths[1], 14);

        let text = cmp.render();
        let lines: Vec<&str> = text.lines().collect();
        assert!(
            lines[0].starts_with("Metric        базовый-прогон  b "),
            "header {:?}",
            lines[0]
        );
        let rule_len = widths.iter().sum::<usize>() + 6;
        assert_eq!(lines[1], "-".repeat(rule_len));
        for line in &lines {
            assert_eq!(line.chars().count(), rule_len, "line {line:?}");
        }
        assert!(lines[2].starts_with("Requests/sec  100.00          100.00  "));
    }

    #[test]
    fn render_columns_are_aligned() {
        let a = parse("async", BASELINE_TEXT);
        let b = parse("sync", CANDIDATE_TEXT);
        let cmp = Comparison::build(&a, &b);
        let [w0, w1, w2, _] = cmp.column_widths();
        let text = cmp.render();

        for line in text.lines().skip(2) {
            let chars: Vec<char> = line.chars().collect();
            // Two-space gaps sit at the same offsets on every row.
            for gap in [w0, w0 + 2 + w1, w0 + 2 + w1 + 2 + w2] {
                assert_eq!(chars[gap], ' ', "line {line:?}");
                assert_eq!(chars[gap + 1], ' ', "line {line:?}");
            }
        }
        let rule_len = text.lines().nth(1).map(|l| l.chars().count());
        for line in text.lines().skip(2) {
            assert_eq!(Some(line.chars().count()), rule_len);
        }
    }

    #[test]
    fn render_exact_row_line() {
        let a = parse("async", BASELINE_TEXT);
        let b = parse("sync", CANDIDATE_TEXT);
        let text = compare(&a, &b);
        // Widths: label 12, baseline 7, candidate 7, delta 8.
        assert!(text.contains("p95           0.0200s  0.0300s  +0.0100s\n"));
        assert!(text.contains("Requests/sec  120.50   80.00    -40.50  \n"));
    }

    #[test]
    fn long_run_names_widen_value_columns() {
        let a = make_metrics("a-very-long-baseline-name", 0.1);
        let b = make_metrics("b", 0.1);
        let cmp = Comparison::build(&a, &b);
        let widths = cmp.column_widths();
        assert_eq!(widths[1], "a-very-long-baseline-name".len());
        assert_eq!(widths[2], "0.1000s".len().max("1.0000s".len()));
    }

    #[test]
    fn compare_is_deterministic() {
        let a = parse("async", BASELINE_TEXT);
        let b = parse("sync", CANDIDATE_TEXT);
        assert_eq!(compare(&a, &b), compare(&a, &b));
    }
}
