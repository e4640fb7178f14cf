//! Interface lookup trait and error types.

use super::{AddressRecord, InterfaceInfo};
use thiserror::Error;

/// Error type for interface lookup and address enumeration.
///
/// Describes what went wrong without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No interface with the requested name exists.
    #[error("interface not found: {name}")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The OS failed to enumerate interfaces or addresses.
    #[error("failed to enumerate interfaces: {0}")]
    Enumeration(#[from] std::io::Error),

    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// Platform-specific error with a generic message.
    #[error("platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

impl FetchError {
    /// Creates a `NotFound` error for the given interface name.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }
}

/// Capability for looking up interfaces and their addresses.
///
/// The platform implementation talks to the OS; tests substitute fakes so
/// that no real hardware is touched.
///
/// # Example
///
/// ```
/// use ipof::network::{
///     AddressRecord, FetchError, InterfaceFlags, InterfaceInfo, InterfaceProvider,
/// };
///
/// struct Single;
///
/// impl InterfaceProvider for Single {
///     fn lookup(&self, name: &str) -> Result<InterfaceInfo, FetchError> {
///         if name == "eth0" {
///             Ok(InterfaceInfo::new("eth0", InterfaceFlags::UP))
///         } else {
///             Err(FetchError::not_found(name))
///         }
///     }
///
///     fn addresses(&self, _iface: &InterfaceInfo) -> Result<Vec<AddressRecord>, FetchError> {
///         Ok(vec![AddressRecord::Host("10.0.0.2".parse().unwrap())])
///     }
/// }
///
/// assert!(Single.lookup("wlan0").is_err());
/// ```
pub trait InterfaceProvider {
    /// Looks up an interface by name.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] if no interface has this name, or
    /// another [`FetchError`] if the OS query itself fails.
    fn lookup(&self, name: &str) -> Result<InterfaceInfo, FetchError>;

    /// Returns the address records of `iface` in OS enumeration order.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] if the addresses cannot be enumerated, including
    /// when the interface disappeared since it was looked up.
    fn addresses(&self, iface: &InterfaceInfo) -> Result<Vec<AddressRecord>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_displays_name() {
        let error = FetchError::not_found("eth9");
        assert_eq!(error.to_string(), "interface not found: eth9");
    }

    #[test]
    fn enumeration_wraps_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = FetchError::from(io);
        assert!(matches!(error, FetchError::Enumeration(_)));
        assert!(error.to_string().contains("denied"));
    }

    #[test]
    fn platform_displays_message() {
        let error = FetchError::Platform {
            message: "unsupported operation".to_string(),
        };
        assert!(error.to_string().contains("unsupported operation"));
    }
}
