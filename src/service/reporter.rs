//! Background task-count reporter
//!
//! A dedicated thread reports the total number of tasks, then waits for the
//! interval or a stop signal, whichever comes first. Stopping wakes the
//! thread immediately instead of waiting out the interval.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::TaskService;
use crate::domain::Task;
use crate::storage::Repository;

/// Prints a report line to stdout
pub fn print_report(total: usize) {
    println!("[Report] Total tasks: {}", total);
}

/// Handle to a running reporter thread
///
/// Dropping the handle without calling [`ReporterHandle::stop`] also ends the
/// loop at its next wake-up, but does not wait for the thread.
pub struct ReporterHandle {
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<usize>>,
}

impl ReporterHandle {
    /// Signals the reporter, waits for it to exit and returns how many reports it made
    pub fn stop(mut self) -> usize {
        if let Some(tx) = self.stop_tx.take() {
            // The thread may already be gone; a closed channel is fine.
            let _ = tx.send(());
        }

        match self.thread.take().map(JoinHandle::join) {
            Some(Ok(reports)) => reports,
            Some(Err(_)) => {
                tracing::warn!("reporter thread panicked");
                0
            }
            None => 0,
        }
    }
}

impl Drop for ReporterHandle {
    fn drop(&mut self) {
        self.stop_tx.take();
    }
}

/// Starts reporting task totals from `service` every `interval`
///
/// `sink` receives each total; pass [`print_report`] for console output.
pub fn spawn_reporter<R, F>(
    service: Arc<TaskService<R>>,
    interval: Duration,
    mut sink: F,
) -> io::Result<ReporterHandle>
where
    R: Repository<Task> + Send + Sync + 'static,
    F: FnMut(usize) + Send + 'static,
{
    let (stop_tx, stop_rx) = mpsc::channel::<()>();

    let thread = thread::Builder::new()
        .name("reporter".to_string())
        .spawn(move || {
            let mut reports = 0;
            tracing::debug!(?interval, "reporter started");

            loop {
                match stop_rx.try_recv() {
                    Ok(()) | Err(TryRecvError::Disconnected) => break,
                    Err(TryRecvError::Empty) => {}
                }

                sink(service.count());
                reports += 1;

                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }

            tracing::debug!(reports, "reporter stopped");
            reports
        })?;

    Ok(ReporterHandle {
        stop_tx: Some(stop_tx),
        thread: Some(thread),
    })
}
