mod cli;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Args::parse();

    if let Err(error) = stderrlog::new()
        .module(module_path!())
        .module("micetro_findrange")
        .verbosity(args.verbose.log_level_filter())
        .init()
    {
        eprintln!("Failed to initialize logging: {error}");
    }

    match cli::run(&args) {
        Ok(exit_code) => exit_code,
        Err(error) => {
            log::error!("{error}");
            ExitCode::FAILURE
        }
    }
}
