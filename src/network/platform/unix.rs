//! Interface lookup on Unix-like systems via `getifaddrs` (through `nix`).

use std::io;
use std::net::IpAddr;

use nix::ifaddrs::{InterfaceAddress, getifaddrs};
use nix::net::if_::{InterfaceFlags as IfFlags, if_nametoindex};
use nix::sys::socket::SockaddrStorage;

use crate::network::{AddressRecord, FetchError, InterfaceFlags, InterfaceInfo, InterfaceProvider};

/// [`InterfaceProvider`] backed by `getifaddrs`.
///
/// Every call re-enumerates the system interfaces; nothing is cached.
/// A failing `getifaddrs` is reported as [`FetchError::Enumeration`].
///
/// # Example
///
/// ```no_run
/// use ipof::network::{InterfaceProvider, platform::UnixProvider};
///
/// let provider = UnixProvider::new();
/// let iface = provider.lookup("eth0").expect("no eth0");
/// println!("{}: up={}", iface.name, iface.is_up());
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnixProvider {
    _private: (),
}

impl UnixProvider {
    /// Creates a new provider.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl InterfaceProvider for UnixProvider {
    fn lookup(&self, name: &str) -> Result<InterfaceInfo, FetchError> {
        let entries = collect_entries(getifaddrs())?;
        tracing::debug!("enumerated {} address entries", entries.len());

        let info = find_info(&entries, name).ok_or_else(|| FetchError::not_found(name))?;
        Ok(match if_nametoindex(name) {
            Ok(index) => info.with_index(index),
            Err(_) => info,
        })
    }

    fn addresses(&self, iface: &InterfaceInfo) -> Result<Vec<AddressRecord>, FetchError> {
        let entries = collect_entries(getifaddrs())?;

        records_of(&entries, iface, |name| if_nametoindex(name).ok())
            .ok_or_else(|| FetchError::not_found(&iface.name))
    }
}

/// One `getifaddrs` row: an interface appears once per assigned address.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    flags: InterfaceFlags,
    record: AddressRecord,
}

/// Drains a `getifaddrs` result, surfacing the OS error instead of an empty list.
fn collect_entries<I>(result: nix::Result<I>) -> Result<Vec<Entry>, FetchError>
where
    I: Iterator<Item = InterfaceAddress>,
{
    let addrs = result.map_err(|errno| FetchError::Enumeration(io::Error::from(errno)))?;
    Ok(addrs.map(to_entry).collect())
}

fn to_entry(ifaddr: InterfaceAddress) -> Entry {
    let addr = ifaddr.address.as_ref().and_then(sockaddr_ip);
    let netmask = ifaddr.netmask.as_ref().and_then(sockaddr_ip);

    Entry {
        flags: map_flags(ifaddr.flags),
        record: to_record(addr, netmask),
        name: ifaddr.interface_name,
    }
}

fn map_flags(flags: IfFlags) -> InterfaceFlags {
    InterfaceFlags {
        up: flags.contains(IfFlags::IFF_UP),
        loopback: flags.contains(IfFlags::IFF_LOOPBACK),
    }
}

/// Link-layer and other non-IP families yield `None`.
fn sockaddr_ip(storage: &SockaddrStorage) -> Option<IpAddr> {
    storage
        .as_sockaddr_in()
        .map(|sin| IpAddr::V4(sin.ip()))
        .or_else(|| storage.as_sockaddr_in6().map(|sin6| IpAddr::V6(sin6.ip())))
}

/// An address with a same-family netmask carries a prefix; one without is a bare host.
fn to_record(addr: Option<IpAddr>, netmask: Option<IpAddr>) -> AddressRecord {
    match (addr, netmask) {
        (Some(addr), Some(mask)) if addr.is_ipv4() == mask.is_ipv4() => AddressRecord::Network {
            addr,
            prefix_len: prefix_len(mask),
        },
        (Some(addr), _) => AddressRecord::Host(addr),
        (None, _) => AddressRecord::Unrecognized,
    }
}

#[allow(clippy::cast_possible_truncation)] // at most 128 bits set
fn prefix_len(mask: IpAddr) -> u8 {
    let ones = match mask {
        IpAddr::V4(v4) => u32::from(v4).count_ones(),
        IpAddr::V6(v6) => u128::from(v6).count_ones(),
    };
    ones as u8
}

fn find_info(entries: &[Entry], name: &str) -> Option<InterfaceInfo> {
    entries
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| InterfaceInfo::new(entry.name.clone(), entry.flags))
}

/// Collects the records of `iface`, or `None` when no entry belongs to it.
///
/// Matches by index when known; falls back to the name.
fn records_of<F>(entries: &[Entry], iface: &InterfaceInfo, index_of: F) -> Option<Vec<AddressRecord>>
where
    F: Fn(&str) -> Option<u32>,
{
    let records: Vec<AddressRecord> = entries
        .iter()
        .filter(|entry| {
            iface.index.map_or(entry.name == iface.name, |index| {
                index_of(&entry.name) == Some(index)
            })
        })
        .map(|entry| entry.record.clone())
        .collect();

    (!records.is_empty()).then_some(records)
}
