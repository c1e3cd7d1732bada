//! Fixed-size worker pool for background fetch-and-buffer tasks.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A fixed-size pool of worker threads fed from a shared queue.
///
/// Dropping the pool closes the queue: idle workers exit and queued jobs
/// that never started are discarded, but a job already running keeps going
/// until it finishes on its own. Workers are detached so that dropping the
/// pool never blocks on a stalled transfer.
pub struct WorkerPool {
    tx: Sender<Job>,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        let (tx, rx) = channel::<Job>();
        let rx: Arc<Mutex<Receiver<Job>>> = Arc::new(Mutex::new(rx));
        for i in 0..size {
            let rx = Arc::clone(&rx);
            thread::Builder::new()
                .name(format!("pget-fetch-{}", i))
                .spawn(move || loop {
                    let job = rx.lock().unwrap().recv();
                    match job {
                        Ok(job) => job(),
                        Err(_) => break, // queue closed
                    }
                })
                .expect("failed to spawn fetch worker");
        }
        WorkerPool { tx }
    }

    /// Queue a job; it runs as soon as a worker is free.
    pub fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let _ = self.tx.send(Box::new(job));
    }
}
