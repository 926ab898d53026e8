use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Default)]
struct QueueCounters {
    /// Jobs waiting for the worker
    pending: AtomicUsize,

    /// Jobs currently running (0 or 1)
    processing: AtomicUsize,

    /// Jobs finished, including ones that panicked
    completed: AtomicUsize,

    /// Jobs accepted since the queue was created
    total_queued: AtomicUsize,
}

/// Single-worker load queue
///
/// Jobs run one at a time in submission order. A newer submission never
/// cancels an older one: both run and both publish.
pub struct LoadQueue {
    sender: Mutex<Option<Sender<Job>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    counters: Arc<QueueCounters>,
}

impl LoadQueue {
    pub fn new() -> Self {
        let (tx, rx) = channel::<Job>();
        let counters = Arc::new(QueueCounters::default());

        let worker_counters = Arc::clone(&counters);
        let worker = thread::Builder::new()
            .name("gallery-load".to_string())
            .spawn(move || {
                for job in rx {
                    // Raise processing first so the queue never looks idle between jobs
                    worker_counters.processing.fetch_add(1, Ordering::SeqCst);
                    worker_counters.pending.fetch_sub(1, Ordering::SeqCst);

                    if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                        log::error!("Load job panicked, worker continues");
                    }

                    worker_counters.completed.fetch_add(1, Ordering::SeqCst);
                    worker_counters.processing.fetch_sub(1, Ordering::SeqCst);
                }
                log::debug!("Load queue worker stopped");
            });

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::error!("Failed to start load queue worker: {}", e);
                None
            }
        };
        let sender = worker.as_ref().map(|_| tx);

        Self {
            sender: Mutex::new(sender),
            worker: Mutex::new(worker),
            counters,
        }
    }

    /// Queue a job behind every job submitted before it
    pub fn submit<F>(&self, job: F) -> Result<(), String>
    where
        F: FnOnce() + Send + 'static,
    {
        let guard = self.sender.lock().map_err(|e| e.to_string())?;
        let sender = guard
            .as_ref()
            .ok_or_else(|| "Load queue is shut down".to_string())?;

        self.counters.pending.fetch_add(1, Ordering::SeqCst);
        if sender.send(Box::new(job)).is_err() {
            self.counters.pending.fetch_sub(1, Ordering::SeqCst);
            return Err("Load queue worker is gone".to_string());
        }
        self.counters.total_queued.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Snapshot of the job counters
    pub fn status(&self) -> LoadQueueStatus {
        LoadQueueStatus {
            pending: self.counters.pending.load(Ordering::SeqCst),
            processing: self.counters.processing.load(Ordering::SeqCst),
            completed: self.counters.completed.load(Ordering::SeqCst),
            total: self.counters.total_queued.load(Ordering::SeqCst),
        }
    }

    /// True when no load is waiting or running
    pub fn is_idle(&self) -> bool {
        self.status().is_complete()
    }

    /// Block until the queue drains or `timeout` passes. Returns whether it drained.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while !self.is_idle() {
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(2));
        }
        true
    }

    /// Stop accepting jobs, let the worker drain what is queued, then join it
    pub fn shutdown(&self) {
        if let Ok(mut sender) = self.sender.lock() {
            sender.take();
        }

        let handle = match self.worker.lock() {
            Ok(mut worker) => worker.take(),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            // A job dropping the last handle to its own queue must not join itself
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if handle.join().is_err() {
                log::warn!("Load queue worker exited abnormally");
            }
        }
    }
}

impl Default for LoadQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LoadQueue {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Status of the load queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct LoadQueueStatus {
    /// Number of loads waiting in queue
    pub pending: usize,
    /// Number of loads currently running
    pub processing: usize,
    /// Number of loads completed
    pub completed: usize,
    /// Total loads queued in this session
    pub total: usize,
}

impl LoadQueueStatus {
    /// No load left to run
    pub fn is_complete(&self) -> bool {
        self.pending == 0 && self.processing == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_jobs_run_in_submission_order() {
        let queue = LoadQueue::new();
        let (tx, rx) = mpsc::channel();

        for i in 0..20 {
            let tx = tx.clone();
            queue
                .submit(move || {
                    tx.send(i).unwrap();
                })
                .unwrap();
        }

        let seen: Vec<i32> = (0..20)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_jobs_never_overlap() {
        let queue = LoadQueue::new();
        let running = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        for _ in 0..10 {
            let running = Arc::clone(&running);
            let max_seen = Arc::clone(&max_seen);
            queue
                .submit(move || {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    max_seen.fetch_max(now, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(2));
                    running.fetch_sub(1, Ordering::SeqCst);
                })
                .unwrap();
        }

        assert!(queue.wait_idle(Duration::from_secs(5)));
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);

        let status = queue.status();
        assert_eq!(status.completed, 10);
        assert_eq!(status.total, 10);
        assert!(status.is_complete());
    }

    #[test]
    fn test_panicking_job_does_not_stop_worker() {
        let queue = LoadQueue::new();
        let (tx, rx) = mpsc::channel();

        queue.submit(|| panic!("boom")).unwrap();
        queue
            .submit(move || {
                tx.send("after").unwrap();
            })
            .unwrap();

        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), "after");
    }

    #[test]
    fn test_drop_drains_queued_jobs() {
        let ran = Arc::new(AtomicUsize::new(0));
        {
            let queue = LoadQueue::new();
            for _ in 0..5 {
                let ran = Arc::clone(&ran);
                queue
                    .submit(move || {
                        thread::sleep(Duration::from_millis(5));
                        ran.fetch_add(1, Ordering::SeqCst);
                    })
                    .unwrap();
            }
        }
        assert_eq!(ran.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_submit_after_shutdown_fails() {
        let queue = LoadQueue::new();
        queue.shutdown();
        assert!(queue.submit(|| {}).is_err());
    }
}
