//! Worker thread pool
//!
//! A fixed-size pool of threads draining a shared FIFO work queue. The
//! simulator hands each RPC's draw loops to the pool; workers own their own
//! sample generators and communicate results back over channels, so no
//! generator is ever shared between threads.
//!
//! Dropping the pool closes the queue, lets the workers drain any queued
//! work, and joins them.
//!
//! # Example
//!
//! ```
//! use rpcpulse::worker::ThreadPool;
//! use std::sync::mpsc;
//!
//! let pool = ThreadPool::new(4);
//! let (tx, rx) = mpsc::channel();
//! for i in 0..8 {
//!     let tx = tx.clone();
//!     pool.execute(move || {
//!         let _ = tx.send(i * 2);
//!     });
//! }
//! drop(tx);
//! let total: i32 = rx.iter().sum();
//! assert_eq!(total, 56);
//! ```

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed-size thread pool with a shared FIFO work queue
pub struct ThreadPool {
    sender: Option<mpsc::Sender<Job>>,
    handles: Vec<thread::JoinHandle<()>>,
}

impl ThreadPool {
    /// Create a pool of `threads` worker threads
    ///
    /// At least one thread is always spawned.
    pub fn new(threads: usize) -> Self {
        let threads = threads.max(1);
        let (sender, receiver) = mpsc::channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        let mut handles = Vec::with_capacity(threads);
        for _ in 0..threads {
            let receiver = Arc::clone(&receiver);
            handles.push(thread::spawn(move || loop {
                let job = {
                    let guard = match receiver.lock() {
                        Ok(guard) => guard,
                        // A worker panicked while holding the queue; stop
                        // pulling work.
                        Err(_) => return,
                    };
                    guard.recv()
                };
                match job {
                    Ok(job) => job(),
                    // Queue closed and drained.
                    Err(_) => return,
                }
            }));
        }

        Self {
            sender: Some(sender),
            handles,
        }
    }

    /// Queue a closure for execution on the pool
    pub fn execute<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(sender) = &self.sender {
            // Send fails only if every worker has died; queued work is
            // unrecoverable either way.
            let _ = sender.send(Box::new(job));
        }
    }

    /// Number of worker threads in the pool
    pub fn size(&self) -> usize {
        self.handles.len()
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        // Closing the channel ends the workers once the queue drains.
        self.sender.take();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}
