//! Invokes the external load generator and captures its report text.
//!
//! Nothing here interprets the output; captured text goes to
//! [`crate::report::parse`] unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::error::HeybenchError;
use crate::plan::{validate_plan, RunPlan, Target};
use crate::report::{parse, BenchmarkMetrics};

// ---------------------------------------------------------------------------
// RunCapture
// ---------------------------------------------------------------------------

/// Raw result of one load generator invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunCapture {
    /// Label of the target this run measured.
    pub name: String,
    /// Human-readable command line, for logs only.
    pub command_line: String,
    /// Standard output followed by standard error.
    pub output: String,
    /// Process exit code, `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunCapture {
    /// Parse the captured report.
    pub fn metrics(&self) -> BenchmarkMetrics {
        parse(&self.name, &self.output)
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Captures of the baseline and candidate runs of one plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunPair {
    pub baseline: RunCapture,
    pub candidate: RunCapture,
}

impl RunPair {
    pub fn metrics(&self) -> (BenchmarkMetrics, BenchmarkMetrics) {
        (self.baseline.metrics(), self.candidate.metrics())
    }
}

// ---------------------------------------------------------------------------
// Command construction
// ---------------------------------------------------------------------------

/// Arguments passed to the generator for `target`: `-n N -c C -m METHOD URL`.
pub fn generator_args(plan: &RunPlan, target: &Target) -> Vec<String> {
    vec![
        "-n".to_string(),
        plan.requests.to_string(),
        "-c".to_string(),
        plan.concurrency.to_string(),
        "-m".to_string(),
        plan.method.to_string(),
        target.url(&plan.base_url),
    ]
}

fn display_command(program: &str, args: &[String]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(program.to_string());
    for arg in args {
        if arg.contains(|c: char| c.is_whitespace() || c == '?' || c == '&') {
            parts.push(format!("\"{arg}\""));
        } else {
            parts.push(arg.clone());
        }
    }
    parts.join(" ")
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Run `program` to completion and capture everything it printed.
///
/// A non-zero exit status is not an error: the generator still prints a
/// partial report worth parsing. Only a failure to start the process is.
pub async fn capture(
    name: &str,
    program: &str,
    args: &[String],
) -> Result<RunCapture, HeybenchError> {
    let command_line = display_command(program, args);
    tracing::info!(run = name, command = %command_line, "starting load generator");

    let started_at = Utc::now();
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| HeybenchError::Runner(format!("failed to start \"{program}\": {e}")))?;
    let finished_at = Utc::now();

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    let exit_code = output.status.code();
    if output.status.success() {
        tracing::info!(
            run = name,
            elapsed_ms = (finished_at - started_at).num_milliseconds(),
            "load generator finished"
        );
    } else {
        tracing::warn!(run = name, ?exit_code, "load generator exited unsuccessfully");
    }

    Ok(RunCapture {
        name: name.to_string(),
        command_line,
        output: text,
        exit_code,
        started_at,
        finished_at,
    })
}

/// Benchmark a single target of `plan`.
pub async fn run_target(plan: &RunPlan, target: &Target) -> Result<RunCapture, HeybenchError> {
    let args = generator_args(plan, target);
    capture(&target.name, &plan.generator, &args).await
}

/// Validate `plan`, then benchmark the baseline and the candidate.
///
/// The runs are sequential so the two endpoints never compete for the host.
pub async fn run_comparison(plan: &RunPlan) -> Result<RunPair, HeybenchError> {
    let errors = validate_plan(plan);
    if !errors.is_empty() {
        let joined = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(HeybenchError::Validation(joined));
    }

    let baseline = run_target(plan, &plan.baseline).await?;
    let candidate = run_target(plan, &plan.candidate).await?;
    Ok(RunPair {
        baseline,
        candidate,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
