//! Background prefetching of occurrence counts.
//!
//! A fixed pool of worker threads drains a bounded queue of `(word, language)`
//! requests and warms the occurrence cache through an [`OccurrenceCounter`].
//! Idle workers block on the queue. [`OccurrencePrefetcher::shutdown`] closes
//! the queue, lets the workers finish what is already queued and joins them.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use crossbeam_channel::{Receiver, Sender, bounded};
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::config::PrefetchConfig;
use crate::error::{FalseFriendsError, Result};
use crate::language::Language;
use crate::source::fetch::OccurrenceCounter;

#[derive(Debug, Clone)]
struct PrefetchTask {
    word: String,
    language: Language,
}

#[derive(Debug, Default)]
struct Counters {
    scheduled: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
}

/// Snapshot of the prefetcher's progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefetchStats {
    pub scheduled: u64,
    pub completed: u64,
    pub failed: u64,
}

pub struct OccurrencePrefetcher {
    counter: Arc<OccurrenceCounter>,
    sender: Mutex<Option<Sender<PrefetchTask>>>,
    workers: Mutex<Vec<thread::JoinHandle<()>>>,
    counters: Arc<Counters>,
}

impl OccurrencePrefetcher {
    /// Start the worker pool.
    pub fn start(counter: Arc<OccurrenceCounter>, config: &PrefetchConfig) -> Result<Self> {
        if config.workers == 0 || config.queue_capacity == 0 {
            return Err(FalseFriendsError::config(
                "prefetch needs at least one worker and a non-empty queue",
            ));
        }

        let (sender, receiver) = bounded(config.queue_capacity);
        let counters = Arc::new(Counters::default());

        let mut workers = Vec::with_capacity(config.workers);
        for worker_id in 0..config.workers {
            workers.push(Self::spawn_worker(
                worker_id,
                receiver.clone(),
                Arc::clone(&counter),
                Arc::clone(&counters),
            )?);
        }
        info!("Started {} prefetch workers", config.workers);

        Ok(OccurrencePrefetcher {
            counter,
            sender: Mutex::new(Some(sender)),
            workers: Mutex::new(workers),
            counters,
        })
    }

    fn spawn_worker(
        worker_id: usize,
        receiver: Receiver<PrefetchTask>,
        counter: Arc<OccurrenceCounter>,
        counters: Arc<Counters>,
    ) -> Result<thread::JoinHandle<()>> {
        let handle = thread::Builder::new()
            .name(format!("prefetch-worker-{worker_id}"))
            .spawn(move || {
                // Ends once the queue is closed and empty.
                for task in receiver.iter() {
                    match counter.count(&task.word, task.language) {
                        Ok(count) => {
                            debug!("Prefetched {} ({}): {count}", task.word, task.language);
                            counters.completed.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(e) => {
                            warn!("Prefetch of {} ({}) failed: {e}", task.word, task.language);
                            counters.failed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            })?;
        Ok(handle)
    }

    /// Queue a count unless it is already cached. Blocks while the queue is full.
    ///
    /// Returns whether a request was queued.
    pub fn schedule(&self, word: &str, language: Language) -> Result<bool> {
        if self.counter.is_cached(word, language)? {
            return Ok(false);
        }

        let sender = self.sender.lock().clone().ok_or_else(|| {
            FalseFriendsError::invalid_operation("prefetcher has been shut down")
        })?;
        sender
            .send(PrefetchTask {
                word: word.to_string(),
                language,
            })
            .map_err(|_| FalseFriendsError::invalid_operation("prefetch queue is closed"))?;
        self.counters.scheduled.fetch_add(1, Ordering::Relaxed);
        Ok(true)
    }

    /// The cached count, or 0 after queueing a fetch.
    pub fn count_or_schedule(&self, word: &str, language: Language) -> Result<u64> {
        match self.counter.cached_count(word, language)? {
            Some(count) => Ok(count),
            None => {
                self.schedule(word, language)?;
                Ok(0)
            }
        }
    }

    pub fn counter(&self) -> &Arc<OccurrenceCounter> {
        &self.counter
    }

    pub fn stats(&self) -> PrefetchStats {
        PrefetchStats {
            scheduled: self.counters.scheduled.load(Ordering::Relaxed),
            completed: self.counters.completed.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }

    /// Close the queue, drain it and join the workers. Idempotent.
    pub fn shutdown(&self) {
        let sender = self.sender.lock().take();
        if sender.is_none() {
            return;
        }
        drop(sender);

        let workers: Vec<_> = self.workers.lock().drain(..).collect();
        for worker in workers {
            if worker.join().is_err() {
                warn!("A prefetch worker panicked");
            }
        }
        info!("Prefetch workers stopped");
    }
}

impl Drop for OccurrencePrefetcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
