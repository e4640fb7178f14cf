//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default probe destination address (a public DNS resolver).
pub const PROBE_ADDR: Ipv4Addr = Ipv4Addr::new(8, 8, 8, 8);

/// Default probe destination port; also used when `--target` omits one.
pub const PROBE_PORT: u16 = 80;

/// Default probe destination as a socket address.
#[must_use]
pub const fn probe_target() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(PROBE_ADDR), PROBE_PORT)
}
