//! Validated configuration derived from CLI arguments.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::network::AddressFamily;

use super::cli::{Cli, FormatArg};
use super::defaults;
use super::error::ConfigError;

/// What the application has been asked to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Report the source address used towards `target`.
    Outbound {
        /// Probe destination.
        target: SocketAddr,
    },
    /// Report the addresses of the named interfaces, in order.
    Interfaces {
        /// Interface names as given on the command line.
        names: Vec<String>,
        /// Address family to keep.
        family: AddressFamily,
    },
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One address per line.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Fully validated configuration ready for use by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    /// Reporting mode
    pub mode: Mode,

    /// Output format
    pub format: OutputFormat,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mode {
            Mode::Outbound { target } => write!(f, "Config {{ mode: outbound, target: {target}")?,
            Mode::Interfaces { names, family } => write!(
                f,
                "Config {{ mode: interfaces, interfaces: [{}], family: {family}",
                names.join(", ")
            )?,
        }
        write!(f, ", format: {:?} }}", self.format)
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An interface name is empty
    /// - `--target` is not an IP address with an optional port
    /// - `--target` is combined with interface names
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mode = if cli.interfaces.is_empty() {
            let target = cli
                .target
                .as_deref()
                .map_or(Ok(defaults::probe_target()), parse_target)?;
            Mode::Outbound { target }
        } else {
            if cli.target.is_some() {
                return Err(ConfigError::TargetWithInterfaces);
            }
            if cli.interfaces.iter().any(String::is_empty) {
                return Err(ConfigError::EmptyInterfaceName);
            }
            Mode::Interfaces {
                names: cli.interfaces.clone(),
                family: AddressFamily::from_v6_flag(cli.v6),
            }
        };

        Ok(Self {
            mode,
            format: cli.format.into(),
            verbose: cli.verbose,
        })
    }
}

/// Parses `ADDR:PORT`, `[V6]:PORT` or a bare `ADDR` (default port).
fn parse_target(value: &str) -> Result<SocketAddr, ConfigError> {
    let trimmed = value.trim();
    if let Ok(addr) = trimmed.parse::<SocketAddr>() {
        return Ok(addr);
    }

    let bare = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed);

    bare.parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, defaults::PROBE_PORT))
        .map_err(|_| ConfigError::InvalidTarget {
            value: value.to_string(),
        })
}
