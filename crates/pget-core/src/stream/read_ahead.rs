//! Disk-backed read-ahead buffering for one background fetch.
//!
//! A [`ReadAheadReader`] starts its fetch eagerly on a worker thread the
//! moment it is opened, spilling bytes into a private temp file as they
//! arrive. The foreground reader drains the spill file at its own pace,
//! suspending on a condvar while the background task is still ahead of it.
//! This decouples the network rate (which runs ahead, unthrottled) from the
//! consumer's sequential read rate without unbounded in-memory queues.

use crate::downloader::pool::WorkerPool;
use std::fs::File;
use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use tempfile::NamedTempFile;

use super::CloseRead;

/// State shared between the background task and the foreground reader.
/// `buffered` is read lock-free by progress reporting from any thread.
struct Shared {
    buffered: AtomicU64,
    state: Mutex<BufferState>,
    cond: Condvar,
}

#[derive(Default)]
struct BufferState {
    done: bool,
    /// Captured once by the background task, re-raised to every
    /// subsequent foreground read. `io::Error` is not `Clone`, so the
    /// kind and message are kept and a fresh error is minted per read.
    error: Option<(io::ErrorKind, String)>,
}

/// Lock-free view of one buffer's bytes-buffered counter, safe to poll from
/// any thread while the download is being consumed.
#[derive(Clone)]
pub struct BufferGauge {
    shared: Arc<Shared>,
}

impl BufferGauge {
    /// Monotonically non-decreasing count of bytes buffered so far.
    pub fn bytes(&self) -> u64 {
        self.shared.buffered.load(Ordering::Acquire)
    }
}

/// Write side of the spill file, handed to the fetch action on the worker
/// thread. Each chunk lands in the spill file before the counter advances,
/// so the foreground never observes a count ahead of the file contents.
pub struct SpillWriter {
    file: File,
    shared: Arc<Shared>,
}

impl Write for SpillWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        self.shared
            .buffered
            .fetch_add(buf.len() as u64, Ordering::Release);
        let _guard = self.shared.state.lock().unwrap();
        self.shared.cond.notify_all();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// A readable stream whose source is fetched ahead of demand into a
/// temporary spill file. Opened via [`ReadAheadReader::open`]; the spill
/// file is deleted on [`CloseRead::close`] (and on drop as a fallback).
pub struct ReadAheadReader {
    spill: Option<NamedTempFile>,
    reader: Option<File>,
    consumed: u64,
    shared: Arc<Shared>,
}

impl ReadAheadReader {
    /// Allocate a spill file and start `fetch` on the pool immediately.
    ///
    /// `fetch` is invoked exactly once, on a worker thread, with the spill
    /// sink; it should pour the entire source into the sink and return.
    /// Its error, if any, is captured and re-raised from `read`.
    pub fn open<F>(pool: &WorkerPool, fetch: F) -> io::Result<ReadAheadReader>
    where
        F: FnOnce(&mut SpillWriter) -> io::Result<()> + Send + 'static,
    {
        let spill = NamedTempFile::new()?;
        let write_handle = spill.as_file().try_clone()?;
        let read_handle = spill.reopen()?;

        let shared = Arc::new(Shared {
            buffered: AtomicU64::new(0),
            state: Mutex::new(BufferState::default()),
            cond: Condvar::new(),
        });

        let task_shared = Arc::clone(&shared);
        pool.submit(move || {
            let mut sink = SpillWriter {
                file: write_handle,
                shared: Arc::clone(&task_shared),
            };
            let result = fetch(&mut sink).and_then(|()| sink.flush());
            let mut state = task_shared.state.lock().unwrap();
            state.done = true;
            if let Err(e) = result {
                state.error = Some((e.kind(), e.to_string()));
            }
            task_shared.cond.notify_all();
        });

        Ok(ReadAheadReader {
            spill: Some(spill),
            reader: Some(read_handle),
            consumed: 0,
            shared,
        })
    }

    /// Bytes buffered by the background task so far.
    pub fn buffered_bytes(&self) -> u64 {
        self.shared.buffered.load(Ordering::Acquire)
    }

    /// Handle for polling `buffered_bytes` from another thread.
    pub fn gauge(&self) -> BufferGauge {
        BufferGauge {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Read for ReadAheadReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let reader = match self.reader.as_mut() {
            Some(r) => r,
            None => return Ok(0), // closed
        };

        let available;
        {
            let mut state = self.shared.state.lock().unwrap();
            loop {
                let buffered = self.shared.buffered.load(Ordering::Acquire);
                let ready = buffered.saturating_sub(self.consumed);
                if state.done || ready > 0 {
                    if let Some((kind, message)) = &state.error {
                        return Err(io::Error::new(*kind, message.clone()));
                    }
                    if ready == 0 {
                        return Ok(0); // drained and done
                    }
                    available = ready;
                    break;
                }
                state = self.shared.cond.wait(state).unwrap();
            }
        }

        let want = available.min(buf.len() as u64) as usize;
        let n = reader.read(&mut buf[..want])?;
        self.consumed += n as u64;
        Ok(n)
    }
}

impl CloseRead for ReadAheadReader {
    /// Release the foreground handle and delete the spill file. The
    /// background fetch, if still in flight, keeps writing to the unlinked
    /// file until it finishes on its own; those bytes go nowhere.
    fn close(&mut self) -> io::Result<()> {
        self.reader.take();
        match self.spill.take() {
            Some(spill) => spill.close(),
            None => Ok(()),
        }
    }
}
