//! Off-thread shape regeneration.
//!
//! Rapid shape switching must never stall the frame loop, and only the most
//! recent request matters. The worker drains its queue down to the newest
//! request before generating; the consumer discards any result whose
//! generation is not the latest one requested.
//!
//! ```text
//! frame loop ──request(key)──► [worker: drain → generate] ──ShapeTargets──► poll()
//!     gen = 1, 2, 3                   skips 1, 2                    keeps gen 3 only
//! ```

use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use nebula_procedural::{generate, ShapeSeed};
use thiserror::Error;
use tracing::{debug, trace};

use super::targets::{ShapeKey, ShapeTargets};

/// Errors from the regeneration worker.
#[derive(Error, Debug)]
pub enum RegenError {
    /// The worker thread could not be started.
    #[error("failed to spawn regeneration worker: {0}")]
    Spawn(#[from] std::io::Error),

    /// The worker thread has exited.
    #[error("regeneration worker is no longer running")]
    WorkerGone,
}

/// Result type for regeneration requests.
pub type RegenResult<T> = Result<T, RegenError>;

struct Request {
    generation: u64,
    key: ShapeKey,
}

/// Handle to the regeneration worker thread.
///
/// Dropping the handle stops the worker and joins it.
pub struct Regenerator {
    requests: Option<Sender<Request>>,
    results: Receiver<ShapeTargets>,
    latest: u64,
    discarded: u64,
    handle: Option<JoinHandle<()>>,
}

impl Regenerator {
    /// Starts the worker.
    ///
    /// # Errors
    ///
    /// Returns `RegenError::Spawn` if the OS refuses the thread.
    pub fn spawn(seed: ShapeSeed) -> RegenResult<Self> {
        let (request_tx, request_rx) = unbounded::<Request>();
        let (result_tx, result_rx) = unbounded::<ShapeTargets>();

        let handle = std::thread::Builder::new()
            .name("nebula-regen".into())
            .spawn(move || run_worker(&request_rx, &result_tx, seed))?;

        Ok(Self {
            requests: Some(request_tx),
            results: result_rx,
            latest: 0,
            discarded: 0,
            handle: Some(handle),
        })
    }

    /// Queues a regeneration and returns its generation.
    ///
    /// # Errors
    ///
    /// Returns `RegenError::WorkerGone` if the worker has exited.
    pub fn request(&mut self, key: ShapeKey) -> RegenResult<u64> {
        let sender = self.requests.as_ref().ok_or(RegenError::WorkerGone)?;
        let generation = self.latest + 1;
        sender
            .send(Request { generation, key })
            .map_err(|_| RegenError::WorkerGone)?;
        self.latest = generation;
        trace!(generation, "regeneration requested");
        Ok(generation)
    }

    /// Generation of the most recent request (0 before the first).
    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.latest
    }

    /// Results dropped because a newer request superseded them.
    #[must_use]
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    /// Returns the result for the latest request, if it has arrived.
    /// Never blocks.
    pub fn poll(&mut self) -> Option<ShapeTargets> {
        let mut newest = None;
        while let Ok(result) = self.results.try_recv() {
            newest = self.accept(result).or(newest);
        }
        newest
    }

    /// Waits up to `timeout` for the result of the latest request.
    pub fn wait_latest(&mut self, timeout: Duration) -> Option<ShapeTargets> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.results.recv_timeout(remaining) {
                Ok(result) => {
                    if let Some(result) = self.accept(result) {
                        return Some(result);
                    }
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    /// Stops the worker and waits for it to exit. Later requests fail with
    /// `RegenError::WorkerGone`.
    pub fn shutdown(&mut self) {
        // Closing the request channel ends the worker loop.
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn accept(&mut self, result: ShapeTargets) -> Option<ShapeTargets> {
        if result.generation == self.latest {
            Some(result)
        } else {
            self.discarded += 1;
            debug!(
                generation = result.generation,
                latest = self.latest,
                "discarding superseded shaped set"
            );
            None
        }
    }
}

impl Drop for Regenerator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Regenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Regenerator")
            .field("latest", &self.latest)
            .field("discarded", &self.discarded)
            .field("running", &self.requests.is_some())
            .finish()
    }
}

fn run_worker(requests: &Receiver<Request>, results: &Sender<ShapeTargets>, seed: ShapeSeed) {
    let mut rng = seed.rng();

    while let Ok(mut request) = requests.recv() {
        let mut skipped = 0u32;
        while let Ok(newer) = requests.try_recv() {
            request = newer;
            skipped += 1;
        }
        if skipped > 0 {
            debug!(skipped, generation = request.generation, "skipped superseded requests");
        }

        let key = request.key;
        let points = generate(key.kind, key.count, &key.text, &mut rng);
        let done = ShapeTargets {
            key,
            generation: request.generation,
            points,
        };
        if results.send(done).is_err() {
            break;
        }
    }
}
