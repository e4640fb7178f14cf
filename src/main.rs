//! ipof: report this host's IP addresses
//!
//! Entry point for the ipof application.

use ipof::config::{Cli, ValidatedConfig};
use ipof::network::platform::PlatformProvider;
use ipof::outbound::UdpSocketFactory;
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                exit_code::CONFIG_ERROR
            } else {
                exit_code::SUCCESS
            };
        }
    };

    let config = match ValidatedConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    let provider = PlatformProvider::new();
    let stdout = std::io::stdout();

    match run::execute(&config, &provider, &UdpSocketFactory, &mut stdout.lock()) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!("Application error: {e:?}");
            eprintln!("Error: {e}");
            exit_code::runtime_error()
        }
    }
}
