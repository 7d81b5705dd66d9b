use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::runtime::AppEvent;

/// Handle to the periodic countdown timer.
///
/// A background thread sends `AppEvent::Tick` every `interval` until the
/// handle is cancelled or dropped. Both paths stop and join the thread, so
/// no tick is produced once `cancel` has returned.
#[derive(Debug)]
pub struct Countdown {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Countdown {
    pub fn spawn(tx: Sender<AppEvent>, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("countdown".into())
            .spawn(move || run(tx, interval, thread_stop));

        let handle = match handle {
            Ok(h) => Some(h),
            Err(e) => {
                tracing::error!(error = %e, "failed to spawn countdown thread");
                None
            }
        };

        tracing::debug!(interval_ms = interval.as_millis() as u64, "countdown started");
        Self { stop, handle }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some() && !self.stop.load(Ordering::Acquire)
    }

    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);

        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                tracing::warn!("countdown thread panicked");
            }
            tracing::debug!("countdown stopped");
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(tx: Sender<AppEvent>, interval: Duration, stop: Arc<AtomicBool>) {
    let mut next = Instant::now() + interval;

    loop {
        // park_timeout can wake early, either spuriously or from cancel
        loop {
            if stop.load(Ordering::Acquire) {
                return;
            }
            let now = Instant::now();
            if now >= next {
                break;
            }
            thread::park_timeout(next - now);
        }

        if tx.send(AppEvent::Tick).is_err() {
            return;
        }
        next = next_deadline(next, interval, Instant::now());
    }
}

/// Skips missed deadlines instead of sending a burst of ticks after a stall.
fn next_deadline(prev: Instant, interval: Duration, now: Instant) -> Instant {
    let next = prev + interval;
    if now > next {
        now + interval
    } else {
        next
    }
}
