mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::Commands;

/// Benchmark two equivalent endpoints with `hey` and compare the reports.
#[derive(Parser)]
#[command(name = "heybench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("heybench=info".parse().expect("valid log directive"))
                .add_directive("heybench_core=info".parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_accepts_hey_style_short_flags() {
        let cli = Cli::try_parse_from(["heybench", "run", "-n", "1000", "-c", "100", "-m", "get"])
            .expect("arguments should parse");
        assert!(matches!(cli.command, Commands::Run(_)));
    }

    #[test]
    fn compare_requires_two_files() {
        assert!(Cli::try_parse_from(["heybench", "compare", "a.txt"]).is_err());
        assert!(Cli::try_parse_from(["heybench", "compare", "a.txt", "b.txt"]).is_ok());
    }

    #[test]
    fn unknown_format_is_rejected() {
        let result = Cli::try_parse_from(["heybench", "compare", "a.txt", "b.txt", "--format", "xml"]);
        assert!(result.is_err());
    }
}
