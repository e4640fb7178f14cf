//! Core network types for interface representation.

use std::fmt;
use std::net::IpAddr;

use serde::Serialize;

/// Address family selected for output.
///
/// Defaults to IPv4; IPv6 must be asked for explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum AddressFamily {
    /// Addresses with a valid 4-byte form.
    #[default]
    #[serde(rename = "ipv4")]
    V4,
    /// Every other address.
    #[serde(rename = "ipv6")]
    V6,
}

impl AddressFamily {
    /// Maps the boolean "IPv6 only" switch onto a family.
    #[must_use]
    pub const fn from_v6_flag(only_v6: bool) -> Self {
        if only_v6 { Self::V6 } else { Self::V4 }
    }

    /// Returns true if `addr` belongs to this family.
    ///
    /// IPv4-mapped IPv6 addresses have a valid 4-byte form and therefore
    /// belong to [`AddressFamily::V4`].
    #[must_use]
    pub fn contains(self, addr: IpAddr) -> bool {
        let is_v4 = four_byte_form(addr).is_some();
        match self {
            Self::V4 => is_v4,
            Self::V6 => !is_v4,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// Returns the 4-byte form of `addr`, if it has one.
///
/// Plain IPv4 addresses and IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`)
/// qualify. IPv4-compatible addresses (`::a.b.c.d`) do not.
#[must_use]
pub fn four_byte_form(addr: IpAddr) -> Option<std::net::Ipv4Addr> {
    match addr {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(v6) => v6.to_ipv4_mapped(),
    }
}

/// Administrative state flags reported for an interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InterfaceFlags {
    /// Interface is administratively up.
    pub up: bool,
    /// Interface is a loopback interface.
    pub loopback: bool,
}

impl InterfaceFlags {
    /// Flags of an ordinary, usable interface.
    pub const UP: Self = Self {
        up: true,
        loopback: false,
    };
}

/// Read-only view of one network interface, as returned by a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceInfo {
    /// Interface name as known to the OS (e.g., "eth0", "Wi-Fi").
    pub name: String,
    /// OS interface index, when the platform reports one.
    pub index: Option<u32>,
    /// Administrative state.
    pub flags: InterfaceFlags,
}

impl InterfaceInfo {
    /// Creates a new interface description without an index.
    #[must_use]
    pub fn new(name: impl Into<String>, flags: InterfaceFlags) -> Self {
        Self {
            name: name.into(),
            index: None,
            flags,
        }
    }

    /// Sets the OS interface index.
    #[must_use]
    pub const fn with_index(mut self, index: u32) -> Self {
        self.index = Some(index);
        self
    }

    /// Returns true if the interface is administratively up.
    #[must_use]
    pub const fn is_up(&self) -> bool {
        self.flags.up
    }

    /// Returns true if this is a loopback interface.
    #[must_use]
    pub const fn is_loopback(&self) -> bool {
        self.flags.loopback
    }
}

/// One entry of an interface's address list.
///
/// Platforms report addresses in different shapes; anything that does not
/// carry an IP address lands in [`AddressRecord::Unrecognized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressRecord {
    /// An address together with its on-link prefix length.
    Network {
        /// The assigned address.
        addr: IpAddr,
        /// Prefix length of the attached network.
        prefix_len: u8,
    },
    /// A bare address without network information.
    Host(IpAddr),
    /// A record without an IP address (link-layer, unknown family).
    Unrecognized,
}

impl AddressRecord {
    /// Returns the IP address carried by this record, if any.
    #[must_use]
    pub const fn ip(&self) -> Option<IpAddr> {
        match self {
            Self::Network { addr, .. } | Self::Host(addr) => Some(*addr),
            Self::Unrecognized => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod address_family {
        use super::*;

        #[test]
        fn default_is_v4() {
            assert_eq!(AddressFamily::default(), AddressFamily::V4);
        }

        #[test]
        fn from_v6_flag_maps_both_values() {
            assert_eq!(AddressFamily::from_v6_flag(false), AddressFamily::V4);
            assert_eq!(AddressFamily::from_v6_flag(true), AddressFamily::V6);
        }

        #[test]
        fn v4_contains_only_four_byte_addresses() {
            assert!(AddressFamily::V4.contains("192.168.1.1".parse().unwrap()));
            assert!(!AddressFamily::V4.contains("fe80::1".parse().unwrap()));
        }

        #[test]
        fn v6_contains_the_complement() {
            assert!(AddressFamily::V6.contains("2001:db8::1".parse().unwrap()));
            assert!(!AddressFamily::V6.contains("10.0.0.1".parse().unwrap()));
        }

        #[test]
        fn mapped_address_counts_as_v4() {
            let mapped: IpAddr = "::ffff:10.1.2.3".parse().unwrap();
            assert!(AddressFamily::V4.contains(mapped));
            assert!(!AddressFamily::V6.contains(mapped));
        }

        #[test]
        fn display_formats_correctly() {
            assert_eq!(AddressFamily::V4.to_string(), "IPv4");
            assert_eq!(AddressFamily::V6.to_string(), "IPv6");
        }

        #[test]
        fn serializes_lowercase_names() {
            assert_eq!(
                serde_json::to_string(&AddressFamily::V6).unwrap(),
                r#""ipv6""#
            );
        }
    }

    mod four_byte {
        use super::*;
        use std::net::Ipv4Addr;

        #[test]
        fn compatible_address_has_no_four_byte_form() {
            assert_eq!(four_byte_form("::10.1.2.3".parse().unwrap()), None);
        }

        #[test]
        fn mapped_address_unwraps() {
            assert_eq!(
                four_byte_form("::ffff:10.1.2.3".parse().unwrap()),
                Some(Ipv4Addr::new(10, 1, 2, 3))
            );
        }
    }

    mod address_record {
        use super::*;

        #[test]
        fn network_and_host_carry_addresses() {
            let addr: IpAddr = "192.168.1.10".parse().unwrap();
            let network = AddressRecord::Network {
                addr,
                prefix_len: 24,
            };
            assert_eq!(network.ip(), Some(addr));
            assert_eq!(AddressRecord::Host(addr).ip(), Some(addr));
        }

        #[test]
        fn unrecognized_is_null() {
            assert_eq!(AddressRecord::Unrecognized.ip(), None);
        }
    }

    mod interface_info {
        use super::*;

        #[test]
        fn new_has_no_index() {
            let iface = InterfaceInfo::new("eth0", InterfaceFlags::UP);
            assert_eq!(iface.name, "eth0");
            assert_eq!(iface.index, None);
            assert!(iface.is_up());
            assert!(!iface.is_loopback());
        }

        #[test]
        fn with_index_sets_index() {
            let iface = InterfaceInfo::new("eth0", InterfaceFlags::UP).with_index(3);
            assert_eq!(iface.index, Some(3));
        }

        #[test]
        fn default_flags_are_down() {
            let iface = InterfaceInfo::new("eth0", InterfaceFlags::default());
            assert!(!iface.is_up());
        }
    }
}
