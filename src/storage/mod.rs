//! # Storage Layer
//!
//! In-memory storage, file export and configuration for taskboard.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Employees, tasks | In-memory map | process only |
//! | Task export | One line per task (text or JSONL) | `tasks_export.txt` |
//! | Config | TOML | `taskboard.toml`, global config dir |
//!
//! ## Concurrency Safety
//!
//! - [`InMemoryRepository`] guards its map with an `RwLock`
//! - [`TaskFileExporter`] holds an exclusive file lock (`fs2`) while writing
//!
//! ## Key Types
//!
//! - [`Repository`] - Generic save/find/list/delete contract
//! - [`TaskFileExporter`] - Line-per-task file writer
//! - [`Config`] - Layered configuration

mod repository;
mod export;
mod config;

pub use repository::{InMemoryRepository, Repository};
pub use export::{export_tasks, ExportError, ExportFormat, TaskFileExporter, DEFAULT_EXPORT_FILE};
pub use config::{
    BoardConfig, Config, ConfigError, OutputFormat, DEFAULT_REPORT_INTERVAL, LOCAL_CONFIG_FILE,
};
