/// Bounded worker pool fanning file jobs across OS threads
///
/// One producer submits jobs onto a bounded queue; N workers claim jobs,
/// run the per-file pipeline, and emit results onto an equally bounded
/// result queue. Workers receive immutable clones of the channel
/// endpoints, never a reference to the pool itself, so shutdown flows
/// pool -> queues -> workers -> join with no ownership cycle.
///
/// `submit` blocks while the job queue is full (the documented choice);
/// `try_submit` is the non-waiting variant and returns `QueueFull`.
use crate::core::{CancelToken, FileJob, ProcessingResult};
use crate::pipeline::executor::FileExecutor;
use crossbeam::channel::{bounded, Receiver, RecvTimeoutError, Sender};
use log::debug;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use thiserror::Error;

/// How long a worker waits on the queue before re-checking cancellation
const QUEUE_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    Idle,
    Running,
    Draining,
    Stopped,
}

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("worker pool has not been started")]
    NotRunning,

    #[error("worker pool already started")]
    AlreadyStarted,

    #[error("worker pool is draining; submissions are closed")]
    Draining,

    #[error("job queue is full")]
    QueueFull,
}

pub struct WorkerPool {
    executor: Arc<FileExecutor>,
    workers: usize,
    state: Arc<Mutex<PoolState>>,
    job_tx: Option<Sender<FileJob>>,
    job_rx: Option<Receiver<FileJob>>,
    result_tx: Option<Sender<ProcessingResult>>,
    result_rx: Receiver<ProcessingResult>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Create a pool with `workers` threads and `capacity` slots on both
    /// the job and the result queue.
    pub fn new(executor: Arc<FileExecutor>, workers: usize, capacity: usize) -> Self {
        let workers = workers.max(1);
        let capacity = capacity.max(1);

        let (job_tx, job_rx) = bounded(capacity);
        let (result_tx, result_rx) = bounded(capacity);

        Self {
            executor,
            workers,
            state: Arc::new(Mutex::new(PoolState::Idle)),
            job_tx: Some(job_tx),
            job_rx: Some(job_rx),
            result_tx: Some(result_tx),
            result_rx,
            handles: Vec::new(),
        }
    }

    pub fn state(&self) -> PoolState {
        *self.state.lock().unwrap()
    }

    /// Spawn the worker threads. Valid only from `Idle`.
    pub fn start(&mut self, cancel: CancelToken) -> Result<(), PoolError> {
        {
            let mut state = self.state.lock().unwrap();
            if *state != PoolState::Idle {
                return Err(PoolError::AlreadyStarted);
            }
            *state = PoolState::Running;
        }

        let job_rx = self.job_rx.take().ok_or(PoolError::AlreadyStarted)?;
        let result_tx = self.result_tx.take().ok_or(PoolError::AlreadyStarted)?;

        for id in 0..self.workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let executor = Arc::clone(&self.executor);
            let cancel = cancel.clone();

            let handle = std::thread::spawn(move || {
                debug!("worker {} started", id);
                loop {
                    if cancel.is_cancelled() {
                        break;
                    }

                    match job_rx.recv_timeout(QUEUE_POLL) {
                        Ok(job) => {
                            let result = executor.process(&job, &cancel);
                            if result_tx.send(result).is_err() {
                                break;
                            }
                        }
                        Err(RecvTimeoutError::Timeout) => continue,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("worker {} exiting", id);
            });
            self.handles.push(handle);
        }

        // The workers hold the only senders now; the result queue closes
        // exactly when the last worker exits.
        drop(result_tx);
        drop(job_rx);

        Ok(())
    }

    /// Submit a job; blocks while the queue is full.
    pub fn submit(&self, job: FileJob) -> Result<(), PoolError> {
        match self.state() {
            PoolState::Running => {}
            PoolState::Idle => return Err(PoolError::NotRunning),
            PoolState::Draining | PoolState::Stopped => return Err(PoolError::Draining),
        }

        let tx = self.job_tx.as_ref().ok_or(PoolError::Draining)?;
        tx.send(job).map_err(|_| PoolError::Draining)
    }

    /// Non-waiting submit; returns `QueueFull` instead of blocking.
    pub fn try_submit(&self, job: FileJob) -> Result<(), PoolError> {
        match self.state() {
            PoolState::Running => {}
            PoolState::Idle => return Err(PoolError::NotRunning),
            PoolState::Draining | PoolState::Stopped => return Err(PoolError::Draining),
        }

        let tx = self.job_tx.as_ref().ok_or(PoolError::Draining)?;
        tx.try_send(job).map_err(|e| match e {
            crossbeam::channel::TrySendError::Full(_) => PoolError::QueueFull,
            crossbeam::channel::TrySendError::Disconnected(_) => PoolError::Draining,
        })
    }

    /// Close the job queue; no further submissions. Workers drain what
    /// remains and exit.
    pub fn close(&mut self) {
        self.job_tx = None;
        let mut state = self.state.lock().unwrap();
        if *state == PoolState::Running {
            *state = PoolState::Draining;
        }
    }

    /// Receiver side of the result queue
    pub fn results(&self) -> &Receiver<ProcessingResult> {
        &self.result_rx
    }

    /// Wait for every worker to exit and mark the pool stopped
    pub fn join(&mut self) {
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
        *self.state.lock().unwrap() = PoolState::Stopped;
    }

    /// Submit a batch of jobs and collect exactly one result per job,
    /// then shut the pool down. On cancellation, returns whatever results
    /// arrived before the queues closed.
    pub fn process_batch(
        mut self,
        jobs: Vec<FileJob>,
        cancel: &CancelToken,
    ) -> Result<Vec<ProcessingResult>, PoolError> {
        let total = jobs.len();
        self.start(cancel.clone())?;

        let sender = self.job_tx.take().ok_or(PoolError::Draining)?;
        {
            let mut state = self.state.lock().unwrap();
            *state = PoolState::Draining;
        }

        let submit_cancel = cancel.clone();
        let submitter = std::thread::spawn(move || {
            for job in jobs {
                if submit_cancel.is_cancelled() {
                    break;
                }
                if sender.send(job).is_err() {
                    break;
                }
            }
            // Dropping the sender closes the job queue
        });

        let mut results = Vec::with_capacity(total);
        while results.len() < total {
            match self.result_rx.recv() {
                Ok(result) => results.push(result),
                // Queue closed: cancellation or all workers gone
                Err(_) => break,
            }
        }

        let _ = submitter.join();
        self.join();
        Ok(results)
    }
}
