//! Cancelable periodic timer
//!
//! A timer owns a worker thread that fires a callback at a fixed cadence
//! until its stop flag is set. Dropping the timer cancels it and joins the
//! thread, so replacing a timer can never leave two workers ticking.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to a running periodic timer. Cancel-on-drop.
#[derive(Debug)]
pub struct Timer {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Timer {
    /// Spawn a timer firing `tick` every `interval`.
    pub fn spawn<F>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                thread::sleep(interval);
                if flag.load(Ordering::Relaxed) {
                    break;
                }
                tick();
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Whether the timer is still ticking
    pub fn is_active(&self) -> bool {
        !self.stop.load(Ordering::Relaxed)
    }

    /// Stop the timer and wait for its worker to finish.
    pub fn cancel(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn timer_ticks_until_cancelled() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let mut timer = Timer::spawn(Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });
        thread::sleep(Duration::from_millis(60));
        timer.cancel();
        let at_cancel = ticks.load(Ordering::Relaxed);
        assert!(at_cancel > 0, "timer never fired");

        thread::sleep(Duration::from_millis(30));
        assert_eq!(ticks.load(Ordering::Relaxed), at_cancel, "ticked after cancel");
    }

    #[test]
    fn dropping_the_timer_cancels_it() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        {
            let _timer = Timer::spawn(Duration::from_millis(5), move || {
                counter.fetch_add(1, Ordering::Relaxed);
            });
            thread::sleep(Duration::from_millis(25));
        }
        let after_drop = ticks.load(Ordering::Relaxed);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(ticks.load(Ordering::Relaxed), after_drop);
    }
}
