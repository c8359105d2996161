//! # CLI Layer
//!
//! This module is **one possible UI client** for coinsieve, not the application
//! itself. It is the only place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Installs the logger
//!
//! ## Commands
//!
//! Each filter command maps onto one `FilterStore` setter and then prints the
//! resulting summary. A failed save is a warning, never an error: the change
//! still applies to the current invocation.
//!
//! Running `coinsieve` with no command shows the current filters.

mod commands;
mod render;
mod setup;

pub use commands::run;
