//! Serial job queues backed by a single worker thread.
//!
//! A [`SerialQueue`] is an explicit, caller-owned object: there is no implicit
//! process-wide main queue. Jobs run one at a time, in submission order, on
//! the queue's own named thread.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use thiserror::Error;
use tracing::{debug, warn};

/// Longest delay [`SerialQueue::run_after`] honours; longer requests are clamped.
pub const MAX_DELAY: Duration = Duration::from_secs(60 * 60 * 24 * 365);

type Job = Box<dyn FnOnce() + Send + 'static>;

enum Command {
    Run(Job),
    RunAt(Instant, Job),
    Shutdown,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to spawn worker thread for queue '{label}'")]
    Spawn {
        label: String,
        #[source]
        source: io::Error,
    },
    #[error("queue '{label}' is no longer accepting jobs")]
    QueueClosed { label: String },
    #[error("run_sync called from inside queue '{label}' would deadlock")]
    Reentrant { label: String },
    #[error("job on queue '{label}' panicked before producing a result")]
    JobPanicked { label: String },
}

/// A named queue that runs submitted jobs one at a time, in FIFO order.
pub struct SerialQueue {
    label: String,
    tx: Sender<Command>,
    worker: Option<JoinHandle<()>>,
    worker_id: ThreadId,
}

impl fmt::Debug for SerialQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialQueue")
            .field("label", &self.label)
            .field("pending", &self.tx.len())
            .finish_non_exhaustive()
    }
}

impl SerialQueue {
    /// Start a queue whose worker thread is named `label`.
    pub fn new(label: impl Into<String>) -> Result<Self, DispatchError> {
        let label = label.into();
        let (tx, rx) = channel::unbounded();

        let worker_label = label.clone();
        let worker = thread::Builder::new()
            .name(label.replace('\0', ""))
            .spawn(move || run_loop(&worker_label, &rx))
            .map_err(|source| DispatchError::Spawn {
                label: label.clone(),
                source,
            })?;
        let worker_id = worker.thread().id();

        debug!(queue = %label, "Serial queue started");
        Ok(Self {
            label,
            tx,
            worker: Some(worker),
            worker_id,
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Enqueue `job` and return immediately.
    pub fn run_async<F>(&self, job: F) -> Result<(), DispatchError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.send(Command::Run(Box::new(job)))
    }

    /// Enqueue `job` to run no earlier than `delay` from now.
    ///
    /// A waiting job does not hold up jobs submitted after it.
    pub fn run_after<F>(&self, delay: Duration, job: F) -> Result<(), DispatchError>
    where
        F: FnOnce() + Send + 'static,
    {
        let deadline = Instant::now() + delay.min(MAX_DELAY);
        self.send(Command::RunAt(deadline, Box::new(job)))
    }

    /// Enqueue `job` and block until it has produced its result.
    ///
    /// Calling this from one of the queue's own jobs would wait on itself
    /// forever; that is reported as [`DispatchError::Reentrant`] instead.
    pub fn run_sync<R, F>(&self, job: F) -> Result<R, DispatchError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if thread::current().id() == self.worker_id {
            return Err(DispatchError::Reentrant {
                label: self.label.clone(),
            });
        }

        let (result_tx, result_rx) = channel::bounded(1);
        self.run_async(move || {
            let _ = result_tx.send(job());
        })?;
        result_rx.recv().map_err(|_| DispatchError::JobPanicked {
            label: self.label.clone(),
        })
    }

    /// Run every job already due, drop pending delayed jobs, and join the worker.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn send(&self, command: Command) -> Result<(), DispatchError> {
        self.tx.send(command).map_err(|_| DispatchError::QueueClosed {
            label: self.label.clone(),
        })
    }

    fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = self.tx.send(Command::Shutdown);

        // Dropped from one of its own jobs: the worker exits on its own.
        if thread::current().id() == self.worker_id {
            return;
        }
        if worker.join().is_err() {
            warn!(queue = %self.label, "Serial queue worker exited abnormally");
        }
        debug!(queue = %self.label, "Serial queue stopped");
    }
}

impl Drop for SerialQueue {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Convert floating-point seconds to a delay. Negative and NaN become zero.
#[must_use]
pub fn delay_seconds(seconds: f64) -> Duration {
    if seconds.is_nan() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(seconds).map_or(MAX_DELAY, |delay| delay.min(MAX_DELAY))
}

fn run_loop(label: &str, rx: &Receiver<Command>) {
    let mut delayed: BTreeMap<(Instant, u64), Job> = BTreeMap::new();
    let mut sequence = 0_u64;

    loop {
        run_due(label, &mut delayed);

        let next_deadline = delayed.keys().next().map(|(deadline, _)| *deadline);
        let command = match next_deadline {
            Some(deadline) => match rx.recv_deadline(deadline) {
                Ok(command) => command,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match rx.recv() {
                Ok(command) => command,
                Err(_) => break,
            },
        };

        match command {
            Command::Run(job) => run_job(label, job),
            Command::RunAt(deadline, job) => {
                delayed.insert((deadline, sequence), job);
                sequence += 1;
            }
            Command::Shutdown => {
                run_due(label, &mut delayed);
                break;
            }
        }
    }

    if !delayed.is_empty() {
        debug!(
            queue = label,
            dropped = delayed.len(),
            "Dropping delayed jobs on shutdown"
        );
    }
}

fn run_due(label: &str, delayed: &mut BTreeMap<(Instant, u64), Job>) {
    let now = Instant::now();
    while let Some(entry) = delayed.first_entry() {
        if entry.key().0 > now {
            break;
        }
        run_job(label, entry.remove());
    }
}

fn run_job(label: &str, job: Job) {
    if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
        warn!(queue = label, "Job panicked; queue keeps running");
    }
}
