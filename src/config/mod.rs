//! Configuration layer for ipof.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Default values ([`defaults`])
//!
//! # Modes
//!
//! The presence of positional interface names selects the mode:
//!
//! - **No names**: outbound mode. `--target` may override the probe
//!   destination; `--v6` has no effect.
//! - **One or more names**: interface mode. `--v6` selects the address
//!   family; `--target` is rejected.
//!
//! There is no configuration file and no environment-based configuration
//! apart from `RUST_LOG` for log filtering.

mod cli;
pub mod defaults;
mod error;
mod validated;


pub use cli::{Cli, FormatArg, normalize_args};
pub use error::ConfigError;
pub use validated::{Mode, OutputFormat, ValidatedConfig};
