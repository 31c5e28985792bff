//! Background reload loops.
//!
//! A loop re-parses every item of a list once per interval until its stop
//! signal fires or the sending half of the signal is dropped.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::list::Shared;

const THREAD_NAME: &str = "namelist-reload";

/// Handle to a running reload loop; the stop signal lives here
#[derive(Debug)]
pub(crate) enum Reloader {
    Thread(mpsc::Sender<()>),
    #[cfg(feature = "async")]
    Task(tokio::sync::oneshot::Sender<()>),
}

impl Reloader {
    /// Run the reload loop on a dedicated OS thread.
    ///
    /// The loop waits a full `interval` after each cycle, so a slow parse
    /// pushes the next cycle back instead of piling cycles up.
    pub(crate) fn spawn_thread(shared: Arc<Shared>, interval: Duration) -> io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel();

        thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => shared.reload_all(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        shared.logger.debug(format_args!("reload loop stopped"));
                        return;
                    }
                }
            })?;

        Ok(Reloader::Thread(stop_tx))
    }

    /// Run the reload loop as a tokio task.
    ///
    /// Each cycle parses on the blocking pool. Like the thread loop, the task
    /// waits a full `interval` after each cycle. `time::sleep` clamps
    /// intervals too large to add to the current instant.
    #[cfg(feature = "async")]
    pub(crate) fn spawn_task(shared: Arc<Shared>, interval: Duration) -> Self {
        let (stop_tx, mut stop_rx) = tokio::sync::oneshot::channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut stop_rx => {
                        shared.logger.debug(format_args!("reload task stopped"));
                        return;
                    }
                    _ = tokio::time::sleep(interval) => {
                        let cycle = shared.clone();
                        if let Err(e) = tokio::task::spawn_blocking(move || cycle.reload_all()).await {
                            shared.logger.warn(format_args!("reload cycle aborted: {}", e));
                        }
                    }
                }
            }
        });

        Reloader::Task(stop_tx)
    }

    /// False once a reload task has exited; a thread loop always reports true
    pub(crate) fn is_running(&self) -> bool {
        match self {
            Reloader::Thread(_) => true,
            #[cfg(feature = "async")]
            Reloader::Task(stop_tx) => !stop_tx.is_closed(),
        }
    }

    /// Signal the loop to exit. Does not wait for it.
    pub(crate) fn stop(self) {
        // A send error means the loop is already gone
        match self {
            Reloader::Thread(stop_tx) => {
                let _ = stop_tx.send(());
            }
            #[cfg(feature = "async")]
            Reloader::Task(stop_tx) => {
                let _ = stop_tx.send(());
            }
        }
    }
}
