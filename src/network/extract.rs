//! Address extraction for a single interface.
//!
//! [`extract_addresses`] validates the interface state, enumerates its
//! address records and keeps those of the requested [`AddressFamily`].
//!
//! # Filtering
//!
//! - Records without an IP address ([`AddressRecord::Unrecognized`]) are skipped.
//! - Loopback addresses are skipped regardless of family, including
//!   IPv4-mapped loopback.
//! - IPv4-mapped IPv6 addresses are reported in their 4-byte form.
//! - Order follows OS enumeration; nothing is sorted or de-duplicated.

use std::net::IpAddr;

use thiserror::Error;

use super::{AddressFamily, AddressRecord, FetchError, InterfaceInfo, InterfaceProvider};

/// Error type for address extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The interface is not administratively up.
    #[error("interface is down: {name}")]
    Down {
        /// Interface name.
        name: String,
    },

    /// The interface is a loopback interface.
    #[error("interface is a loopback interface: {name}")]
    Loopback {
        /// Interface name.
        name: String,
    },

    /// Address enumeration failed.
    #[error("failed to read addresses of {name}: {source}")]
    Addresses {
        /// Interface name.
        name: String,
        /// Underlying fetch error.
        #[source]
        source: FetchError,
    },
}

/// Returns the addresses of `iface` that belong to `family`.
///
/// # Errors
///
/// Returns [`ExtractError::Down`] or [`ExtractError::Loopback`] before any
/// address is enumerated if the interface state disqualifies it, and
/// [`ExtractError::Addresses`] if the provider fails to enumerate.
pub fn extract_addresses<P: InterfaceProvider + ?Sized>(
    provider: &P,
    iface: &InterfaceInfo,
    family: AddressFamily,
) -> Result<Vec<IpAddr>, ExtractError> {
    if !iface.is_up() {
        return Err(ExtractError::Down {
            name: iface.name.clone(),
        });
    }
    if iface.is_loopback() {
        return Err(ExtractError::Loopback {
            name: iface.name.clone(),
        });
    }

    let records = provider
        .addresses(iface)
        .map_err(|source| ExtractError::Addresses {
            name: iface.name.clone(),
            source,
        })?;

    tracing::debug!(
        "{}: {} address record(s), selecting {family}",
        iface.name,
        records.len()
    );

    Ok(select(&records, family))
}

/// Filters address records down to the usable addresses of `family`.
#[must_use]
pub fn select(records: &[AddressRecord], family: AddressFamily) -> Vec<IpAddr> {
    records
        .iter()
        .filter_map(|record| {
            let Some(addr) = record.ip() else {
                tracing::trace!("skipping record without an IP address: {record:?}");
                return None;
            };
            let addr = addr.to_canonical();
            if addr.is_loopback() {
                tracing::trace!("skipping loopback address {addr}");
                return None;
            }
            family.contains(addr).then_some(addr)
        })
        .collect()
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
