//! Rendering of results to an output stream.
//!
//! Text output prints one address per line. JSON output prints a single
//! document terminated by a newline.

use std::io::{self, Write};
use std::net::IpAddr;

use serde::Serialize;

use crate::network::AddressFamily;

/// JSON shape of the outbound-mode result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundReport {
    /// Source address chosen by the OS.
    pub address: IpAddr,
}

/// JSON shape of one interface's result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceReport {
    /// Interface name as requested.
    pub interface: String,
    /// Family the addresses were filtered to.
    pub family: AddressFamily,
    /// Addresses in OS enumeration order.
    pub addresses: Vec<IpAddr>,
}

/// Writes each address on its own line.
///
/// # Errors
///
/// Returns the I/O error of the underlying writer.
pub fn write_lines<W: Write + ?Sized>(out: &mut W, addresses: &[IpAddr]) -> io::Result<()> {
    for addr in addresses {
        writeln!(out, "{addr}")?;
    }
    Ok(())
}

/// Writes `value` as compact JSON followed by a newline.
///
/// # Errors
///
/// Returns a `serde_json` error if serialization or the write fails.
pub fn write_json<W: Write + ?Sized, T: Serialize + ?Sized>(
    out: &mut W,
    value: &T,
) -> Result<(), serde_json::Error> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out).map_err(serde_json::Error::io)
}
