use std::process::ExitCode;

use clap::Parser;

mod cli;
mod config;
mod platform;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match platform::run_app(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(platform::error_exit_code(&err))
        }
    }
}
