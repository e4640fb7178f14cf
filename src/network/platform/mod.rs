//! Platform-specific interface provider implementations.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of the [`InterfaceProvider`](super::InterfaceProvider) trait.
//!
//! # Platform Support
//!
//! - **Windows**: Uses `GetAdaptersAddresses` API via the `windows` crate.
//! - **Linux / macOS / BSD**: Uses `getifaddrs` via `nix`.

#[cfg(not(windows))]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(not(windows))]
pub use unix::UnixProvider;
#[cfg(windows)]
pub use windows::WindowsProvider;

// Re-export platform-specific provider as PlatformProvider for convenience
#[cfg(not(windows))]
pub use unix::UnixProvider as PlatformProvider;
#[cfg(windows)]
pub use windows::WindowsProvider as PlatformProvider;
