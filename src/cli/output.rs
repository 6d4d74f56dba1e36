//! Output formatting for CLI commands

use std::fmt::Display;

use serde::Serialize;

pub use crate::storage::OutputFormat;

/// Output helper for consistent formatting
#[derive(Debug, Clone, Copy)]
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Text => {
                // For text format, we expect the caller to handle it
                // This is a fallback that pretty-prints JSON
                if let Ok(json) = serde_json::to_string_pretty(data) {
                    println!("{}", json);
                }
            }
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(data) {
                    println!("{}", json);
                }
            }
        }
    }

    /// Prints a titled list: a `--- Title ---` header and one line per item
    /// in text mode, one `{"section", "items"}` object in JSON mode
    pub fn section<T: Display + Serialize>(&self, title: &str, items: &[T]) {
        match self.format {
            OutputFormat::Text => {
                println!("--- {} ---", title);
                for item in items {
                    println!("{}", item);
                }
            }
            OutputFormat::Json => self.data(&serde_json::json!({
                "section": title,
                "items": items,
            })),
        }
    }

    /// Prints a warning that does not stop the command
    pub fn warn(&self, message: &str) {
        match self.format {
            OutputFormat::Text => eprintln!("{}", message),
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "success": false,
                        "warning": message
                    })
                );
            }
        }
    }

    /// Prints one background report
    pub fn report(&self, total: usize) {
        match self.format {
            OutputFormat::Text => crate::service::print_report(total),
            OutputFormat::Json => self.data(&serde_json::json!({ "report": { "total_tasks": total } })),
        }
    }

    /// Prints a blank line (text only)
    pub fn blank(&self) {
        if self.format == OutputFormat::Text {
            println!();
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Emits a debug event (visible with --verbose or RUST_LOG)
    pub fn verbose(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    /// Emits a debug event tagged with the command it belongs to
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        tracing::debug!(context, "{}", message);
    }
}
