mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lmr",
    version,
    about = "Extract well records and operations timelines from Limited Morning Reports"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse report files (PDF, or form-feed separated text) into two tables
    Parse {
        /// Paths to .pdf or .txt files, processed in the order given
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the batch output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Custom TOML extraction profile (default: builtin "lmr")
        #[arg(short, long, value_name = "FILE")]
        profile: Option<PathBuf>,

        /// Abort on the first document that cannot be read
        #[arg(long)]
        fail_fast: bool,

        /// Add a batch-wide "Report Seq" column to both tables
        #[arg(long)]
        report_seq: bool,
    },
    /// Inspect and validate extraction profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Describe a profile's fields, groups and timeline
    Show {
        /// Path to a TOML profile (default: builtin)
        file: Option<PathBuf>,
    },
    /// Validate a custom profile file
    Validate {
        /// Path to TOML profile
        file: PathBuf,
    },
    /// Print the builtin profile as TOML
    Dump,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            input_files,
            output,
            out,
            profile,
            fail_fast,
            report_seq,
        } => commands::parse::run(
            input_files,
            &output,
            out,
            profile,
            fail_fast,
            report_seq,
        ),
        Commands::Profile { action } => match action {
            ProfileAction::Show { file } => commands::profile::show(file.as_deref()),
            ProfileAction::Validate { file } => commands::profile::validate(&file),
            ProfileAction::Dump => commands::profile::dump(),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
