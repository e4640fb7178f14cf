//! Error types for configuration validation.

use thiserror::Error;

/// Error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `--target` value is neither `ADDR` nor `ADDR:PORT`.
    #[error("Invalid target '{value}': expected an IP address, optionally with a port")]
    InvalidTarget {
        /// The invalid value provided
        value: String,
    },

    /// An interface name argument is empty.
    #[error("Interface names must not be empty")]
    EmptyInterfaceName,

    /// `--target` was combined with interface names.
    #[error("--target only applies when no interface names are given")]
    TargetWithInterfaces,
}
