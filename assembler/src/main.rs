//! `m16as` — command-line driver for the assembler.
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{event, Level};
use tracing_subscriber::prelude::*;

use assembler::assemble_file;

#[derive(Parser)]
#[command(name = "m16as", about = "Two-pass assembler for the M16 teaching machine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble a source file into a listing and a load image
    Assemble {
        /// Assembly source file
        source: PathBuf,
        /// Listing output path
        #[arg(long, value_name = "PATH", default_value = "ListingFile.txt")]
        out_list: PathBuf,
        /// Load image output path
        #[arg(long, value_name = "PATH", default_value = "LoadFile.txt")]
        out_load: PathBuf,
    },
}

fn init_tracing() {
    // Trace verbosity is selected with RUST_LOG; the default shows
    // informational messages and errors.
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Assemble {
            source,
            out_list,
            out_load,
        } => match assemble_file(&source, &out_list, &out_load) {
            Ok(()) => {
                event!(
                    Level::INFO,
                    "assembled {} -> {} / {}",
                    source.display(),
                    out_list.display(),
                    out_load.display()
                );
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprintln!("{error}");
                ExitCode::FAILURE
            }
        },
    }
}
