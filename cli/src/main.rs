//! `m16sim` — load an image, run the machine headlessly, and write
//! whatever the printer produced to stdout.
//!
//! Exit status: 0 after HLT, 1 on a machine fault, 2 when the
//! machine is still waiting for keyboard input, 3 when the cycle
//! bound was reached.
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{event, Level};
use tracing_subscriber::prelude::*;

use cpu::{HeadlessRunner, RunOutcome, DEFAULT_CYCLE_LIMIT};

#[derive(Parser)]
#[command(name = "m16sim", about = "Headless simulator for the M16 teaching machine")]
struct Cli {
    /// Load image produced by the assembler
    load_file: PathBuf,

    /// Text to deposit into the keyboard buffer before running
    #[arg(long, value_name = "TEXT")]
    input: Option<String>,

    /// File whose contents are deposited into the keyboard buffer
    #[arg(long, value_name = "PATH", conflicts_with = "input")]
    input_file: Option<PathBuf>,

    /// File served to programs through the load-file trap
    #[arg(long, value_name = "PATH")]
    trap_file: Option<PathBuf>,

    /// Upper bound on executed instructions
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CYCLE_LIMIT)]
    max_cycles: u64,
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode, String> {
    let image = fs::read_to_string(&cli.load_file)
        .map_err(|e| format!("cannot read {}: {e}", cli.load_file.display()))?;

    let mut runner = HeadlessRunner::with_cycle_limit(cli.max_cycles);
    let summary = runner.ipl(&image).map_err(|e| e.to_string())?;
    event!(
        Level::INFO,
        "loaded {} words, entry point {}",
        summary.words_loaded,
        summary.entry
    );

    if let Some(path) = &cli.trap_file {
        let text =
            fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        runner.machine.set_trap_source(&text);
    }
    if let Some(text) = &cli.input {
        runner.deposit_input(text);
    } else if let Some(path) = &cli.input_file {
        let text =
            fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        runner.deposit_input(&text);
    }

    let result = runner.run_to_halt();

    // The program's output goes to stdout whatever happened; the
    // diagnostics have already gone to stderr.
    io::stdout()
        .write_all(runner.machine.io.printed())
        .map_err(|e| format!("cannot write program output: {e}"))?;

    match result {
        Ok(RunOutcome::Halted { cycles }) => {
            event!(Level::INFO, "halted after {cycles} cycles");
            Ok(ExitCode::SUCCESS)
        }
        Ok(RunOutcome::AwaitingInput { cycles }) => {
            event!(
                Level::ERROR,
                "machine is waiting for keyboard input after {cycles} cycles; \
                 deposit input with --input and rerun"
            );
            Ok(ExitCode::from(2))
        }
        Ok(RunOutcome::Stopped { cycles }) => {
            event!(Level::ERROR, "stopped at the cycle bound ({cycles} cycles)");
            Ok(ExitCode::from(3))
        }
        Err(fault) => {
            // The step loop already logged the PC-qualified
            // diagnostic; repeat the essentials for scripts reading
            // stderr without a tracing filter.
            eprintln!(
                "machine fault at PC {}: {fault} (MFR {:04b})",
                runner.machine.regs.pc,
                runner.machine.regs.mfr()
            );
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
