//! Subcommands of the `heybench` binary.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use heybench_core::compare::export::{render, ReportFormat};
use heybench_core::plan::{read_plan, write_plan, HttpMethod, RunPlan};
use heybench_core::runner::run_comparison;
use heybench_core::{parse, Comparison, HeybenchError};

#[derive(Subcommand)]
pub enum Commands {
    /// Run the load generator against both targets and compare the results
    Run(RunArgs),

    /// Compare two saved load generator reports
    Compare(CompareArgs),

    /// Write the default run plan to a JSON file
    InitPlan {
        /// Destination file
        path: PathBuf,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// JSON run plan; defaults are used when omitted
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Requests per run
    #[arg(short = 'n', long)]
    requests: Option<u32>,

    /// Concurrent workers per run
    #[arg(short = 'c', long)]
    concurrency: Option<u32>,

    /// HTTP method
    #[arg(short = 'm', long)]
    method: Option<HttpMethod>,

    /// Base URL both target paths are appended to
    #[arg(long)]
    base_url: Option<String>,

    /// Load generator executable
    #[arg(long)]
    generator: Option<String>,

    /// Output format: table, json or csv
    #[arg(long, default_value_t = ReportFormat::Table)]
    format: ReportFormat,

    /// Also print each raw report after the comparison
    #[arg(long)]
    dump_raw: bool,
}

#[derive(Args)]
pub struct CompareArgs {
    /// Report of the baseline run
    baseline: PathBuf,

    /// Report of the candidate run
    candidate: PathBuf,

    /// Column header for the baseline (defaults to the file stem)
    #[arg(long)]
    baseline_name: Option<String>,

    /// Column header for the candidate (defaults to the file stem)
    #[arg(long)]
    candidate_name: Option<String>,

    /// Output format: table, json or csv
    #[arg(long, default_value_t = ReportFormat::Table)]
    format: ReportFormat,
}

impl Commands {
    pub async fn execute(self) -> Result<(), HeybenchError> {
        match self {
            Commands::Run(args) => run(args).await,
            Commands::Compare(args) => compare_files(args).await,
            Commands::InitPlan { path } => {
                write_plan(&RunPlan::default(), &path).await?;
                tracing::info!(path = %path.display(), "wrote default run plan");
                Ok(())
            }
        }
    }
}

impl RunArgs {
    /// Flags given on the command line take precedence over the plan file.
    fn apply_overrides(&self, plan: &mut RunPlan) {
        if let Some(n) = self.requests {
            plan.requests = n;
        }
        if let Some(c) = self.concurrency {
            plan.concurrency = c;
        }
        if let Some(m) = self.method {
            plan.method = m;
        }
        if let Some(url) = &self.base_url {
            plan.base_url = url.clone();
        }
        if let Some(generator) = &self.generator {
            plan.generator = generator.clone();
        }
    }
}

async fn run(args: RunArgs) -> Result<(), HeybenchError> {
    let mut plan = match &args.plan {
        Some(path) => read_plan(path).await?,
        None => RunPlan::default(),
    };
    args.apply_overrides(&mut plan);

    let pair = run_comparison(&plan).await?;
    let (baseline, candidate) = pair.metrics();
    let comparison = Comparison::build(&baseline, &candidate);
    print_report(&comparison, args.format)?;

    if args.dump_raw {
        for capture in [&pair.baseline, &pair.candidate] {
            println!("=== RAW {} ===", capture.name.to_uppercase());
            println!("{}", capture.output);
        }
    }
    Ok(())
}

async fn compare_files(args: CompareArgs) -> Result<(), HeybenchError> {
    let baseline_text = tokio::fs::read_to_string(&args.baseline).await?;
    let candidate_text = tokio::fs::read_to_string(&args.candidate).await?;

    let baseline_name = args
        .baseline_name
        .unwrap_or_else(|| file_label(&args.baseline, "baseline"));
    let candidate_name = args
        .candidate_name
        .unwrap_or_else(|| file_label(&args.candidate, "candidate"));

    let baseline = parse(&baseline_name, &baseline_text);
    let candidate = parse(&candidate_name, &candidate_text);
    print_report(&Comparison::build(&baseline, &candidate), args.format)
}

fn print_report(comparison: &Comparison, format: ReportFormat) -> Result<(), HeybenchError> {
    let out = render(comparison, format)?;
    match format {
        ReportFormat::Table => {
            println!();
            print!("{out}");
            println!();
        }
        ReportFormat::Json => println!("{out}"),
        ReportFormat::Csv => print!("{out}"),
    }
    Ok(())
}

fn file_label(path: &Path, fallback: &str) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
