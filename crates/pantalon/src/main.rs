//! pantalon CLI
//!
//! Lists the Terraform configurations in a repository, or only the ones a
//! change touches.
//!
//! Usage:
//!   pantalon --all <ROOT>
//!   pantalon --output-format list --changed-dirs '["apps/app1", "shared/vpc"]' <ROOT>
//!   git diff --name-only ... | to-dirs-json | pantalon --changed-dirs-file - <ROOT>

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use pantalon::catalog::SENTINEL_FILE;
use pantalon::{logging, run, ChangedSource, OutputFormat, RunConfig};

/// Discover pantalon.yaml configurations and select the ones impacted by a change
#[derive(Parser, Debug)]
#[command(name = "pantalon", version)]
struct Cli {
    /// Repository root to search for configurations
    root: PathBuf,

    /// Output format
    #[arg(
        long,
        short = 'o',
        value_enum,
        default_value_t = OutputFormat::Json,
        env = "PANTALON_OUTPUT_FORMAT"
    )]
    output_format: OutputFormat,

    /// JSON array of changed directories; only impacted configurations are printed
    #[arg(long, conflicts_with = "changed_dirs_file")]
    changed_dirs: Option<String>,

    /// File holding the JSON array of changed directories ("-" reads stdin)
    #[arg(long)]
    changed_dirs_file: Option<PathBuf>,

    /// Print every configuration instead of resolving changed directories
    #[arg(long, conflicts_with_all = ["changed_dirs", "changed_dirs_file"])]
    all: bool,

    /// File name that marks a configuration directory
    #[arg(long, default_value = SENTINEL_FILE, env = "PANTALON_SENTINEL")]
    sentinel: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_run_config(self) -> RunConfig {
        let changed = match (self.changed_dirs, self.changed_dirs_file) {
            (Some(json), _) => Some(ChangedSource::Inline(json)),
            (None, Some(path)) => Some(ChangedSource::from_file_arg(path)),
            (None, None) => None,
        };

        let mut config = RunConfig::new(self.root)
            .with_format(self.output_format)
            .with_sentinel(self.sentinel)
            .with_list_all(self.all);
        config.changed = changed;
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    tracing::debug!("Starting pantalon v{}", env!("CARGO_PKG_VERSION"));

    match run(&cli.into_run_config()) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
