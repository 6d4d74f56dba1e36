//! File export for tasks
//!
//! Writes one line per task, either in the human-readable `Task{...}` form or
//! as one JSON object per line. The file is locked exclusively while the
//! exporter is alive and closed when it is dropped.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Task;

/// Default export file, relative to the working directory
pub const DEFAULT_EXPORT_FILE: &str = "tasks_export.txt";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create export file {path}: {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("Failed to lock export file {path}: {source}")]
    Lock { path: PathBuf, source: io::Error },

    #[error("Failed to write to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to serialize task: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Line format of an export file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// `Task{id=1, title='...', ...}`
    #[default]
    Text,
    /// One JSON object per line
    Jsonl,
}

/// Writes tasks to a file, one per line
pub struct TaskFileExporter {
    path: PathBuf,
    format: ExportFormat,
    writer: BufWriter<File>,
    written: usize,
}

impl TaskFileExporter {
    /// Creates (or truncates) the file at `path` and locks it for writing
    ///
    /// Truncation happens only once the lock is held, so a concurrent export
    /// never clears a file another exporter is still writing.
    pub fn create(path: impl Into<PathBuf>, format: ExportFormat) -> Result<Self, ExportError> {
        let path = path.into();

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| ExportError::Create {
                path: path.clone(),
                source,
            })?;

        file.lock_exclusive().map_err(|source| ExportError::Lock {
            path: path.clone(),
            source,
        })?;

        file.set_len(0).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), ?format, "opened export file");

        Ok(Self {
            path,
            format,
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of tasks written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Appends one task as a single line
    pub fn write(&mut self, task: &Task) -> Result<(), ExportError> {
        let line = match self.format {
            ExportFormat::Text => task.to_string(),
            ExportFormat::Jsonl => serde_json::to_string(task)?,
        };

        writeln!(self.writer, "{}", line).map_err(|source| ExportError::Write {
            path: self.path.clone(),
            source,
        })?;
        self.written += 1;
        Ok(())
    }

    /// Flushes buffered lines and closes the file, returning the task count
    pub fn finish(mut self) -> Result<usize, ExportError> {
        self.writer.flush().map_err(|source| ExportError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), count = self.written, "export finished");
        Ok(self.written)
    }
}

/// Exports every task to `path`
pub fn export_tasks<'a>(
    path: impl Into<PathBuf>,
    format: ExportFormat,
    tasks: impl IntoIterator<Item = &'a Task>,
) -> Result<usize, ExportError> {
    let mut exporter = TaskFileExporter::create(path, format)?;
    for task in tasks {
        exporter.write(task)?;
    }
    exporter.finish()
}
