//! Application execution logic.
//!
//! This module dispatches the validated configuration to the outbound
//! resolver or to the per-interface extractor and writes the results.

use std::io::Write;

use thiserror::Error;

use ipof::config::{Mode, OutputFormat, ValidatedConfig};
use ipof::network::{
    AddressFamily, ExtractError, FetchError, InterfaceProvider, extract_addresses,
};
use ipof::outbound::{OutboundError, SocketFactory, resolve_outbound};
use ipof::report::{InterfaceReport, OutboundReport, write_json, write_lines};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Outbound address discovery failed.
    #[error(transparent)]
    Outbound(#[from] OutboundError),

    /// An interface could not be looked up.
    #[error(transparent)]
    Lookup(#[from] FetchError),

    /// An interface was rejected or its addresses could not be read.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Writing the results failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Serializing JSON output failed.
    #[error("Failed to write JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Executes the configured mode, writing results to `out`.
///
/// Interfaces are processed in the order given. In text mode each
/// interface's addresses are written as soon as they are known; the first
/// error stops processing and is returned.
///
/// # Errors
///
/// Returns the first lookup, extraction, discovery or output failure.
pub fn execute<P, F, W>(
    config: &ValidatedConfig,
    provider: &P,
    factory: &F,
    out: &mut W,
) -> Result<(), RunError>
where
    P: InterfaceProvider + ?Sized,
    F: SocketFactory + ?Sized,
    W: Write + ?Sized,
{
    match &config.mode {
        Mode::Outbound { target } => {
            let address = resolve_outbound(factory, *target)?;
            match config.format {
                OutputFormat::Text => writeln!(out, "{address}")?,
                OutputFormat::Json => write_json(out, &OutboundReport { address })?,
            }
        }
        Mode::Interfaces { names, family } => match config.format {
            OutputFormat::Text => {
                for name in names {
                    let report = interface_report(provider, name, *family)?;
                    write_lines(out, &report.addresses)?;
                }
            }
            OutputFormat::Json => {
                let reports = names
                    .iter()
                    .map(|name| interface_report(provider, name, *family))
                    .collect::<Result<Vec<_>, _>>()?;
                write_json(out, &reports)?;
            }
        },
    }

    out.flush()?;
    Ok(())
}

/// Looks up one interface and extracts its addresses of `family`.
fn interface_report<P: InterfaceProvider + ?Sized>(
    provider: &P,
    name: &str,
    family: AddressFamily,
) -> Result<InterfaceReport, RunError> {
    let iface = provider.lookup(name)?;
    tracing::debug!("{name}: {:?}", iface.flags);

    let addresses = extract_addresses(provider, &iface, family)?;
    if addresses.is_empty() {
        tracing::debug!("{name}: no {family} addresses");
    }

    Ok(InterfaceReport {
        interface: name.to_string(),
        family,
        addresses,
    })
}
