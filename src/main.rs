use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod analysis;
mod error;
mod http;
mod import;
mod models;
mod report;
mod risk;
mod summary;

use http::{AppState, DateZone};
use models::BatchResponse;

#[derive(Parser)]
#[command(name = "student-risk")]
#[command(about = "Student risk scoring API and offline scorer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Calendar used for Generated_Date
    #[arg(long, value_enum, global = true, default_value_t = DateZone::Local)]
    date_zone: DateZone,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, env = "STUDENT_RISK_HOST", default_value = "127.0.0.1")]
        host: String,
        #[arg(long, env = "STUDENT_RISK_PORT", default_value_t = 8000)]
        port: u16,
    },
    /// Score students from a CSV file
    Score {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Print the batch response JSON instead of a ranked list
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report from a CSV file
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = AppState::new(cli.date_zone);

    match cli.command {
        Commands::Serve { host, port } => {
            http::serve(&host, port, state).await?;
        }
        Commands::Score { csv, limit, json } => {
            let students = import::read_students(&csv)?;
            let results = analysis::assess_batch(&students, state.today())?;

            if json {
                let body = serde_json::to_string_pretty(&BatchResponse { results })
                    .context("failed to encode results")?;
                println!("{body}");
                return Ok(());
            }

            if results.is_empty() {
                println!("No students found in {}.", csv.display());
                return Ok(());
            }

            println!("Top students by risk score:");
            for assessment in report::rank_by_score(&results).into_iter().take(limit) {
                println!(
                    "- {} score {:.2} ({}): {}",
                    assessment.student_id,
                    assessment.risk_score,
                    assessment.risk_level,
                    assessment.summary
                );
            }
        }
        Commands::Report { csv, out } => {
            let students = import::read_students(&csv)?;
            let source = csv.display().to_string();
            let report = report::build_report(&source, state.today(), &students)?;
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_zone_applies_to_every_command() {
        let cli = Cli::try_parse_from([
            "student-risk",
            "score",
            "--csv",
            "students.csv",
            "--date-zone",
            "utc",
        ])
        .unwrap();
        assert_eq!(cli.date_zone, DateZone::Utc);

        let cli = Cli::try_parse_from([
            "student-risk",
            "--date-zone",
            "utc",
            "report",
            "--csv",
            "a.csv",
        ])
        .unwrap();
        assert_eq!(cli.date_zone, DateZone::Utc);

        let cli = Cli::try_parse_from(["student-risk", "serve"]).unwrap();
        assert_eq!(cli.date_zone, DateZone::Local);
    }
}
