//! exercizer CLI — ingest exercise payloads and grade answers from the shell.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "exercizer", version, about = "Exercise ingestion and grading engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a set of answers against an exercise
    Grade {
        /// Exercise payload (JSON, any supported shape)
        #[arg(long)]
        exercise: PathBuf,

        /// Answers JSON object keyed by question id (q1, q2, ...)
        #[arg(long)]
        answers: PathBuf,

        /// Catalog subject to fall back to if the payload is unusable
        #[arg(long)]
        subject: Option<String>,

        /// Override the pass threshold (0-100)
        #[arg(long)]
        pass_threshold: Option<u8>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Exit code 1 if the attempt did not pass
        #[arg(long)]
        fail_on_failure: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the canonical form of an exercise payload
    Normalize {
        /// Exercise payload (JSON, any supported shape)
        #[arg(long)]
        exercise: PathBuf,

        /// Catalog subject to fall back to if the payload is unusable
        #[arg(long)]
        subject: Option<String>,
    },

    /// Check an exercise payload for answer-key problems
    Validate {
        /// Exercise payload (JSON, any supported shape)
        #[arg(long)]
        exercise: PathBuf,
    },

    /// Print a built-in exercise payload
    Sample {
        /// Subject: math, language, programming (anything else: general knowledge)
        #[arg(long, default_value = "general")]
        subject: String,
    },

    /// Create a starter config file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("exercizer=info".parse().expect("static directive is valid")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            exercise,
            answers,
            subject,
            pass_threshold,
            format,
            fail_on_failure,
            config,
        } => commands::grade::execute(
            exercise,
            answers,
            subject,
            pass_threshold,
            format,
            fail_on_failure,
            config,
        ),
        Commands::Normalize { exercise, subject } => {
            commands::normalize::execute(exercise, subject)
        }
        Commands::Validate { exercise } => commands::validate::execute(exercise),
        Commands::Sample { subject } => commands::sample::execute(subject),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
