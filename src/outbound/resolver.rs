//! Outbound address discovery.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use thiserror::Error;

/// Error type for outbound address discovery.
#[derive(Debug, Error)]
pub enum OutboundError {
    /// The probe socket could not be opened or directed at the target.
    #[error("failed to open probe socket towards {target}: {source}")]
    Open {
        /// Probe destination.
        target: SocketAddr,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },

    /// The local endpoint of the probe socket could not be read.
    #[error("failed to read local address of probe socket: {0}")]
    LocalAddr(#[source] io::Error),

    /// The OS bound the probe socket without selecting a source address.
    #[error("no route towards {target}")]
    NoRoute {
        /// Probe destination.
        target: SocketAddr,
    },
}

/// A datagram socket already associated with a remote address.
pub trait DatagramSocket {
    /// Returns the local endpoint the OS chose for this socket.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the socket name cannot be read.
    fn local_addr(&self) -> io::Result<SocketAddr>;
}

impl DatagramSocket for UdpSocket {
    fn local_addr(&self) -> io::Result<SocketAddr> {
        Self::local_addr(self)
    }
}

/// Capability for opening connectionless probe sockets.
///
/// The socket is released when the returned value is dropped.
pub trait SocketFactory {
    /// Socket type produced by this factory.
    type Socket: DatagramSocket;

    /// Opens a datagram socket and associates it with `target`.
    ///
    /// No data is sent; the association only makes the OS pick a route and
    /// a source address.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the socket cannot be created, bound, or
    /// associated (e.g., the network is unreachable).
    fn open(&self, target: SocketAddr) -> io::Result<Self::Socket>;
}

/// [`SocketFactory`] backed by [`std::net::UdpSocket`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UdpSocketFactory;

impl SocketFactory for UdpSocketFactory {
    type Socket = UdpSocket;

    fn open(&self, target: SocketAddr) -> io::Result<UdpSocket> {
        let unspecified = match target {
            SocketAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            SocketAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        };

        let socket = UdpSocket::bind((unspecified, 0))?;
        socket.connect(target)?;
        Ok(socket)
    }
}

/// Returns the local address the OS would use as source towards `target`.
///
/// The local endpoint is read as a structured socket address and only its
/// IP is returned, so IPv6 sources come back intact.
///
/// # Errors
///
/// Returns [`OutboundError::Open`] if the probe socket cannot be opened,
/// [`OutboundError::LocalAddr`] if its local endpoint cannot be read, and
/// [`OutboundError::NoRoute`] if the OS left the source unspecified.
pub fn resolve_outbound<F: SocketFactory + ?Sized>(
    factory: &F,
    target: SocketAddr,
) -> Result<IpAddr, OutboundError> {
    let socket = factory
        .open(target)
        .map_err(|source| OutboundError::Open { target, source })?;

    let local = socket.local_addr().map_err(OutboundError::LocalAddr)?;
    tracing::debug!("probe towards {target} bound to {local}");

    let addr = local.ip();
    if addr.is_unspecified() {
        return Err(OutboundError::NoRoute { target });
    }

    Ok(addr)
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
