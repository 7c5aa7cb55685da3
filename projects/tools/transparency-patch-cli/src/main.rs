mod archive;
mod cache;
mod car;
mod commands;
mod config;
mod error;
mod pipeline;
mod rules;
mod steam;
mod texture;
mod util;

use commands::patch::{handle_patch_command, PatchCmd};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::process::ExitCode;

/// Exit code for any failure after the arguments were parsed.
const EXIT_RUN_FAILED: u8 = 2;

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    if let Err(e) = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("Error initialising logger: {e}");
    }
}

fn main() -> ExitCode {
    // argh exits with 1 on invalid arguments.
    let cmd: PatchCmd = argh::from_env();
    init_logging(cmd.verbose);

    match handle_patch_command(cmd) {
        Ok(summary) => {
            summary.print();
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(EXIT_RUN_FAILED)
        }
    }
}
