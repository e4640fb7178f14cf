//! Windows-specific interface lookup using `GetAdaptersAddresses`.

use crate::network::{AddressRecord, FetchError, InterfaceFlags, InterfaceInfo, InterfaceProvider};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use windows::Win32::Foundation::WIN32_ERROR;
use windows::Win32::NetworkManagement::IpHelper::{
    GAA_FLAG_SKIP_ANYCAST, GAA_FLAG_SKIP_DNS_SERVER, GAA_FLAG_SKIP_MULTICAST, GetAdaptersAddresses,
    IF_TYPE_SOFTWARE_LOOPBACK, IP_ADAPTER_ADDRESSES_LH, IP_ADAPTER_UNICAST_ADDRESS_LH,
};
use windows::Win32::NetworkManagement::Ndis::IfOperStatusUp;
use windows::Win32::Networking::WinSock::{
    AF_INET, AF_INET6, AF_UNSPEC, SOCKADDR, SOCKADDR_IN, SOCKADDR_IN6,
};

/// Buffer size hint for `GetAdaptersAddresses`.
/// The API will tell us the actual required size if this is insufficient.
const INITIAL_BUFFER_SIZE: u32 = 16384;

/// Windows implementation of [`InterfaceProvider`] using `GetAdaptersAddresses`.
///
/// Interfaces match on their friendly name ("Ethernet", "Wi-Fi") or on the
/// adapter GUID name. Windows has no administrative up flag; the operational
/// status stands in for it.
///
/// # Example
///
/// ```no_run
/// use ipof::network::{InterfaceProvider, platform::WindowsProvider};
///
/// let provider = WindowsProvider::new();
/// let iface = provider.lookup("Ethernet").expect("no Ethernet adapter");
/// println!("{}: up={}", iface.name, iface.is_up());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WindowsProvider {
    _private: (),
}

impl WindowsProvider {
    /// Creates a new Windows interface provider.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl InterfaceProvider for WindowsProvider {
    fn lookup(&self, name: &str) -> Result<InterfaceInfo, FetchError> {
        let buffer = get_adapter_addresses()?;
        find_adapter(&buffer, |adapter| adapter_matches(adapter, name))
            .and_then(parse_adapter)
            .ok_or_else(|| FetchError::not_found(name))
    }

    fn addresses(&self, iface: &InterfaceInfo) -> Result<Vec<AddressRecord>, FetchError> {
        let buffer = get_adapter_addresses()?;
        find_adapter(&buffer, |adapter| is_same_adapter(adapter, iface))
            .map(collect_records)
            .ok_or_else(|| FetchError::not_found(&iface.name))
    }
}

/// Walks the adapter list in `buffer` and returns the first match.
fn find_adapter(
    buffer: &[u8],
    mut predicate: impl FnMut(&IP_ADAPTER_ADDRESSES_LH) -> bool,
) -> Option<&IP_ADAPTER_ADDRESSES_LH> {
    // SAFETY: GetAdaptersAddresses returns a properly aligned buffer for IP_ADAPTER_ADDRESSES_LH.
    #[allow(clippy::cast_ptr_alignment)]
    let mut current = buffer.as_ptr().cast::<IP_ADAPTER_ADDRESSES_LH>();

    // SAFETY: We iterate through a linked list returned by GetAdaptersAddresses.
    // The list is valid as long as `buffer` is alive, which bounds the returned reference.
    while !current.is_null() {
        let adapter = unsafe { &*current };
        if predicate(adapter) {
            return Some(adapter);
        }
        current = adapter.Next;
    }

    None
}

/// Calls `GetAdaptersAddresses` and returns the raw buffer containing adapter data.
///
/// This function handles the two-call pattern:
/// 1. First call with estimated buffer size
/// 2. Retry with exact size if buffer was too small
fn get_adapter_addresses() -> Result<Vec<u8>, FetchError> {
    let flags = GAA_FLAG_SKIP_ANYCAST | GAA_FLAG_SKIP_MULTICAST | GAA_FLAG_SKIP_DNS_SERVER;
    let family = u32::from(AF_UNSPEC.0);

    let mut buffer: Vec<u8> = vec![0u8; INITIAL_BUFFER_SIZE as usize];
    let mut size = INITIAL_BUFFER_SIZE;

    // SAFETY: We provide a valid buffer and size. The function writes adapter
    // information to the buffer and updates `size` with the required length.
    let result = unsafe {
        GetAdaptersAddresses(
            family,
            flags,
            None,
            Some(buffer.as_mut_ptr().cast()),
            &raw mut size,
        )
    };

    handle_api_result(result, &mut buffer, &mut size, flags, family)?;

    Ok(buffer)
}

/// Handles the result of `GetAdaptersAddresses`, potentially retrying with a larger buffer.
fn handle_api_result(
    result: u32,
    buffer: &mut Vec<u8>,
    size: &mut u32,
    flags: windows::Win32::NetworkManagement::IpHelper::GET_ADAPTERS_ADDRESSES_FLAGS,
    family: u32,
) -> Result<(), FetchError> {
    use windows::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, NO_ERROR};

    let result = if result == ERROR_BUFFER_OVERFLOW.0 {
        buffer.resize(*size as usize, 0);

        // SAFETY: Same as above, but with correctly sized buffer
        unsafe {
            GetAdaptersAddresses(
                family,
                flags,
                None,
                Some(buffer.as_mut_ptr().cast()),
                &raw mut *size,
            )
        }
    } else {
        result
    };

    if result != NO_ERROR.0 {
        return Err(windows::core::Error::from(WIN32_ERROR(result)).into());
    }

    Ok(())
}

fn adapter_matches(adapter: &IP_ADAPTER_ADDRESSES_LH, name: &str) -> bool {
    // SAFETY: FriendlyName and AdapterName point into the adapter buffer.
    let friendly = unsafe { adapter.FriendlyName.to_string().ok() };
    let guid = unsafe { adapter.AdapterName.to_string().ok() };
    friendly.as_deref() == Some(name) || guid.as_deref() == Some(name)
}

/// Matches by `IfIndex` when the index is known; falls back to the name.
fn is_same_adapter(adapter: &IP_ADAPTER_ADDRESSES_LH, iface: &InterfaceInfo) -> bool {
    // SAFETY: IfIndex is always initialized by GetAdaptersAddresses.
    let if_index = unsafe { adapter.Anonymous1.Anonymous.IfIndex };
    index_or_name_matches(iface.index, if_index, || adapter_matches(adapter, &iface.name))
}

fn index_or_name_matches(
    known: Option<u32>,
    if_index: u32,
    name_matches: impl FnOnce() -> bool,
) -> bool {
    known.map_or_else(name_matches, |index| index == if_index)
}

/// Parses an adapter into an [`InterfaceInfo`].
///
/// Returns `None` if the adapter name cannot be read.
fn parse_adapter(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Option<InterfaceInfo> {
    let name = unsafe { adapter.FriendlyName.to_string().ok()? };
    // SAFETY: IfIndex is always initialized by GetAdaptersAddresses.
    let index = unsafe { adapter.Anonymous1.Anonymous.IfIndex };

    let flags = map_flags(adapter.OperStatus == IfOperStatusUp, adapter.IfType);

    Some(InterfaceInfo::new(name, flags).with_index(index))
}

const fn map_flags(oper_up: bool, if_type: u32) -> InterfaceFlags {
    InterfaceFlags {
        up: oper_up,
        loopback: if_type == IF_TYPE_SOFTWARE_LOOPBACK,
    }
}

/// Collects the unicast address list of an adapter.
fn collect_records(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Vec<AddressRecord> {
    let mut records = Vec::new();
    let mut unicast: *const IP_ADAPTER_UNICAST_ADDRESS_LH = adapter.FirstUnicastAddress;

    // SAFETY: We iterate through a linked list of unicast addresses.
    // Each address is valid as long as the parent adapter buffer is alive.
    while !unicast.is_null() {
        let entry = unsafe { &*unicast };

        // SAFETY: lpSockaddr is either null or points to a SOCKADDR of sa_family.
        let record = unsafe { entry.Address.lpSockaddr.as_ref() }
            .and_then(sockaddr_ip)
            .map_or(AddressRecord::Unrecognized, |addr| AddressRecord::Network {
                addr,
                prefix_len: entry.OnLinkPrefixLength,
            });
        records.push(record);

        unicast = entry.Next;
    }

    records
}

/// Reads the IP out of a socket address of family `AF_INET` or `AF_INET6`.
///
/// The pointer casts are allowed despite alignment concerns because Windows
/// guarantees proper alignment of these structures.
#[allow(clippy::cast_ptr_alignment)]
fn sockaddr_ip(sockaddr: &SOCKADDR) -> Option<IpAddr> {
    match sockaddr.sa_family {
        f if f == AF_INET => {
            // SAFETY: We verified the family is AF_INET, so this is a valid cast.
            let sockaddr_in = unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN>()) };
            // SAFETY: sin_addr contains the IPv4 address bytes in network order.
            let octets = unsafe { sockaddr_in.sin_addr.S_un.S_un_b };
            Some(IpAddr::V4(Ipv4Addr::new(
                octets.s_b1,
                octets.s_b2,
                octets.s_b3,
                octets.s_b4,
            )))
        }
        f if f == AF_INET6 => {
            // SAFETY: We verified the family is AF_INET6, so this is a valid cast.
            let sockaddr_in6 = unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN6>()) };
            // SAFETY: We verified this is an IPv6 address, so the union field is valid.
            let octets = unsafe { sockaddr_in6.sin6_addr.u.Byte };
            Some(IpAddr::V6(Ipv6Addr::from(octets)))
        }
        _ => None,
    }
}
