pub mod cli;
pub mod fixture;
pub mod runner;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let command_line_interface = cli::CommandLineInterface::load();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match command_line_interface.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match command_line_interface.run() {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
