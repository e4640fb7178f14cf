//! CLI argument parsing using clap.
//!
//! Defines the command-line interface. The IPv6 switch is spelled `-v6`
//! (single dash); [`normalize_args`] rewrites it to the `--v6` long form
//! clap understands before parsing.

use std::ffi::OsString;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};

/// ipof: print this host's IP addresses
///
/// Without arguments, prints the local address used to reach the internet.
/// With interface names, prints the addresses assigned to each interface.
#[derive(Debug, Parser)]
#[command(name = "ipof")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Network interface names; omit to print the outbound address
    #[arg(value_name = "INTERFACE")]
    pub interfaces: Vec<String>,

    /// Output IPv6 addresses instead of IPv4 (also accepted as -v6)
    #[arg(
        long = "v6",
        action = ArgAction::Set,
        overrides_with = "v6",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub v6: bool,

    /// Probe destination for the outbound address, as ADDR or ADDR:PORT
    #[arg(long, value_name = "ADDR")]
    pub target: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    /// Enable verbose logging on stderr
    #[arg(long)]
    pub verbose: bool,
}

/// Output format argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// One address per line
    Text,
    /// A single JSON document
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    ///
    /// # Errors
    ///
    /// Returns the clap error for unknown flags, invalid values, and the
    /// `--help` / `--version` requests.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse_from(normalize_args(std::env::args_os()))
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::parse_from(normalize_args(iter))
    }

    /// Parses CLI arguments from an iterator, returning clap's error instead of exiting.
    ///
    /// # Errors
    ///
    /// Returns the clap error for unknown flags or invalid values.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(normalize_args(iter))
    }
}

/// Rewrites `-v6` and `-v6=<bool>` into their `--v6` long forms.
///
/// Flags may appear before or after interface names (`ipof eth0 -v6` is the
/// IPv6 switch, not an interface). Arguments after a `--` terminator are left
/// untouched, so an interface literally named `-v6` can still be passed.
#[must_use]
pub fn normalize_args<I, T>(iter: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut terminated = false;
    iter.into_iter()
        .map(Into::into)
        .map(|arg| {
            if terminated {
                return arg;
            }
            if arg == "--" {
                terminated = true;
                return arg;
            }
            let rewritten = arg
                .to_str()
                .filter(|s| *s == "-v6" || s.starts_with("-v6="))
                .map(|s| OsString::from(format!("-{s}")));
            rewritten.unwrap_or(arg)
        })
        .collect()
}
