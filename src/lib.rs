//! ipof: report this host's IP addresses
//!
//! A library for finding the outbound source address of the host and the
//! addresses assigned to individual network interfaces.

pub mod config;
pub mod network;
pub mod outbound;
pub mod report;
