//! imogen CLI - Kotlin model generator
//!
//! Commands:
//! - `imogen generate` - Generate implementations and write them to disk
//! - `imogen check` - Run the generator and report without writing

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod generate;
mod manifest;
mod source;

use generate::Input;
use manifest::Manifest;

#[derive(Parser)]
#[command(name = "imogen")]
#[command(author, version, about = "Generate Kotlin model classes from annotated interfaces", long_about = None)]
struct Cli {
    /// Path to imogen.toml (default: ./imogen.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate implementations for every annotated interface
    Generate {
        /// Declaration graph JSON or Rust source file
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for generated code (default: generator.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Package of declarations read from Rust source
        #[arg(short, long)]
        package: Option<String>,
    },

    /// Run the generator without writing files
    Check {
        /// Declaration graph JSON or Rust source file
        #[arg(short, long)]
        input: PathBuf,

        /// Package of declarations read from Rust source
        #[arg(short, long)]
        package: Option<String>,
    },
}

/// Install the fmt subscriber; `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let manifest = Manifest::load(cli.config.as_deref())?;

    init_tracing(&manifest.generator.log_level);

    match cli.command {
        Commands::Generate {
            input,
            output,
            package,
        } => {
            let input = Input {
                path: input,
                package,
            };
            generate::run(&input, output.as_deref(), &manifest)?;
        }
        Commands::Check { input, package } => {
            let input = Input {
                path: input,
                package,
            };
            generate::check(&input, &manifest)?;
        }
    }

    Ok(())
}
