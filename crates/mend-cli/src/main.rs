//! Mend CLI - iterative AI-assisted code repair
//!
//! Usage:
//!   mend run <file>             Execute the file and repair it until it runs
//!   mend run <file> --suggest-only
//!                               Ask the oracle for one rewrite, execute nothing
//!   mend init                   Write a default mend.toml
//!
//! Credentials (`API_KEY`, `PROJECT_ID`) come from the environment or a
//! `.env` file; only the oracle adapter consumes them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mend_core::RepairConfig;
use mend_loop::RepairEngine;
use mend_oracle::{WatsonxConfig, WatsonxOracle};
use mend_report::{render_summary, write_csv_file, DEFAULT_LOG_FILENAME};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "mend")]
#[command(author, version, about = "Iterative AI-assisted code repair")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the repair loop on a code file ("-" reads stdin)
    Run {
        /// Path to the code to repair
        file: PathBuf,

        /// Maximum number of correction attempts (1-10)
        #[arg(short = 'n', long)]
        max_attempts: Option<usize>,

        /// Language name used in oracle prompts
        #[arg(long)]
        language: Option<String>,

        /// Interpreter invoked with `-c <code>`
        #[arg(long)]
        interpreter: Option<String>,

        /// Execution timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Skip local execution; ask the oracle for a single rewrite
        #[arg(long)]
        suggest_only: bool,

        /// Write the attempt log as CSV (defaults to log.csv)
        #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = DEFAULT_LOG_FILENAME)]
        export_log: Option<PathBuf>,
    },

    /// Write a default mend.toml to a directory
    Init {
        /// Target directory (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    // Credentials may live in a .env file, as with the hosted deployment
    dotenv::dotenv().ok();

    match cli.command {
        Commands::Run {
            file,
            max_attempts,
            language,
            interpreter,
            timeout,
            suggest_only,
            export_log,
        } => {
            run_repair(
                file,
                max_attempts,
                language,
                interpreter,
                timeout,
                suggest_only,
                export_log,
            )
            .await
        }
        Commands::Init { path } => init_config(path),
    }
}

async fn run_repair(
    file: PathBuf,
    max_attempts: Option<usize>,
    language: Option<String>,
    interpreter: Option<String>,
    timeout: Option<u64>,
    suggest_only: bool,
    export_log: Option<PathBuf>,
) -> Result<()> {
    let code = read_code(&file)?;
    if code.trim().is_empty() {
        anyhow::bail!("{} contains no code", file.display());
    }

    // Repo-level defaults, then flag overrides
    let mut config = RepairConfig::load_or_default(&std::env::current_dir()?)?;
    if let Some(n) = max_attempts {
        config.max_attempts = n;
    }
    if let Some(language) = language {
        config.language = language;
    }
    if let Some(interpreter) = interpreter {
        config.interpreter = interpreter;
    }
    if let Some(secs) = timeout {
        config.timeout_secs = secs;
    }
    if suggest_only {
        config.execute_locally = false;
    }
    config
        .validate()
        .context("Invalid repair configuration")?;

    let oracle_config = WatsonxConfig::from_env()
        .context("Oracle credentials missing (set API_KEY and PROJECT_ID)")?;
    let oracle = WatsonxOracle::initialize(oracle_config)
        .await
        .context("Failed to initialize the correction oracle")?;

    let engine = RepairEngine::new(oracle, config);
    let run = engine.run(&code).await?;

    println!("{}", render_summary(&run));

    if run.succeeded() {
        println!("--- output ---");
        println!("{}", run.final_output);
    }
    println!("--- final code ---");
    println!("{}", run.final_code());

    if let Some(path) = export_log {
        write_csv_file(&run, &path)?;
        println!("Attempt log exported to {}", path.display());
    }

    Ok(())
}

fn init_config(path: PathBuf) -> Result<()> {
    RepairConfig::write_default(&path)
        .with_context(|| format!("Failed to write mend.toml under {}", path.display()))?;
    info!("Wrote default mend.toml to {}", path.display());
    println!("Created {}", path.join("mend.toml").display());
    Ok(())
}

fn read_code(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut code = String::new();
        std::io::stdin()
            .read_to_string(&mut code)
            .context("Failed to read code from stdin")?;
        Ok(code)
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))
    }
}
