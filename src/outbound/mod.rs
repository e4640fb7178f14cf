//! Outbound address discovery.
//!
//! Finds the source address the OS would pick for traffic towards a
//! well-known external host by associating a datagram socket with it and
//! reading back the local endpoint. Nothing is sent on the wire.
//!
//! - [`SocketFactory`] / [`DatagramSocket`]: the socket capability
//! - [`UdpSocketFactory`]: the real implementation
//! - [`resolve_outbound`]: the discovery operation

mod resolver;

pub use resolver::{
    DatagramSocket, OutboundError, SocketFactory, UdpSocketFactory, resolve_outbound,
};
