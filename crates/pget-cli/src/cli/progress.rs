//! Periodic progress printing to stderr.

use pget_core::downloader::ProgressHandle;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Spawn a detached thread that prints one buffering line per segment at
/// each interval until `finished` is set. Display-only; the engine never
/// sees it.
pub(crate) fn spawn(handle: ProgressHandle, interval: Duration, finished: Arc<AtomicBool>) {
    thread::spawn(move || {
        while !finished.load(Ordering::SeqCst) {
            thread::sleep(interval);
            if finished.load(Ordering::SeqCst) {
                break;
            }
            eprintln!();
            let mut recorder = |name: &str, category: &str, total: u64, progress: u64| {
                let pct = if total == 0 {
                    100.0
                } else {
                    100.0 * progress as f64 / total as f64
                };
                eprintln!("{name} ({category}) {pct:.0} %");
            };
            handle.report(&mut recorder);
        }
    });
}
