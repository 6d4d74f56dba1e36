//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `demo` (default) | Seed sample data, print every board view, export, report |
//! | `config` | Show the effective configuration |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - One JSON object per section
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug diagnostics on stderr:
//! ```bash
//! taskboard --verbose demo --linger 0
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod demo;

pub use app::{Cli, Commands, DemoArgs, run};
pub use demo::DemoSettings;
pub use output::{Output, OutputFormat};
