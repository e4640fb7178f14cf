//! Network layer for looking up interfaces and extracting their addresses.
//!
//! This module provides types and traits for:
//! - Representing interfaces and address records ([`InterfaceInfo`], [`AddressRecord`])
//! - Address family selection ([`AddressFamily`])
//! - Looking up interfaces ([`InterfaceProvider`])
//! - Filtering an interface's addresses ([`extract_addresses`])
//! - Platform-specific implementations ([`platform`])

mod extract;
mod interface;
pub mod platform;
mod provider;

pub use extract::{ExtractError, extract_addresses, select};
pub use interface::{AddressFamily, AddressRecord, InterfaceFlags, InterfaceInfo, four_byte_form};
pub use provider::{FetchError, InterfaceProvider};
