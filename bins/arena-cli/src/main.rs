mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arena-cli")]
#[command(about = "Arena CLI - Run code and test suites against the judge", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a source file once
    Run {
        /// Source file to execute
        #[arg(short, long)]
        file: PathBuf,

        /// Language name (e.g., javascript, python, cpp)
        #[arg(short, long, default_value = "javascript")]
        language: String,

        /// Text passed to the program's stdin
        #[arg(long, conflicts_with = "stdin_file")]
        stdin: Option<String>,

        /// File whose contents are passed to stdin
        #[arg(long)]
        stdin_file: Option<PathBuf>,
    },

    /// Run a source file against a JSON array of test cases
    Test {
        /// Source file to execute
        #[arg(short, long)]
        file: PathBuf,

        /// JSON file with [{"input", "expected_output", "description"?}]
        #[arg(short, long)]
        cases: PathBuf,

        /// Language name (e.g., javascript, python, cpp)
        #[arg(short, long, default_value = "javascript")]
        language: String,

        /// Test cases in flight at once (overrides JUDGE_TEST_CONCURRENCY)
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// List supported languages and their runtime ids
    Languages,

    /// Print the starter template for a language
    Template {
        /// Language name
        #[arg(short, long, default_value = "javascript")]
        language: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let succeeded = match cli.command {
        Commands::Run {
            file,
            language,
            stdin,
            stdin_file,
        } => commands::run_file(&file, &language, stdin, stdin_file.as_deref()).await?,
        Commands::Test {
            file,
            cases,
            language,
            concurrency,
        } => commands::run_tests(&file, &cases, &language, concurrency).await?,
        Commands::Languages => {
            commands::list_languages();
            true
        }
        Commands::Template { language } => {
            commands::print_template(&language);
            true
        }
    };

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
