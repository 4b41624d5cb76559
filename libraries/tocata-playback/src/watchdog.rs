//! Stall watchdog
//!
//! When a track is loaded with autoplay, the watchdog starts a single timer.
//! If the surface has not reported a genuine start when it elapses, a
//! [`StallAlarm`] is delivered on the [`StallAlarms`] channel and the session
//! decides whether to skip.
//!
//! At most one timer is outstanding: arming aborts the previous timer task,
//! and each arming gets a new generation so an alarm that raced an abort is
//! recognised as stale.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Delivered when an armed timer elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StallAlarm {
    pub generation: u64,
}

/// Receiving end for stall alarms
#[derive(Debug)]
pub struct StallAlarms {
    rx: mpsc::UnboundedReceiver<StallAlarm>,
}

impl StallAlarms {
    /// Wait for the next alarm. `None` once the watchdog is dropped.
    pub async fn recv(&mut self) -> Option<StallAlarm> {
        self.rx.recv().await
    }

    /// Take an alarm if one is already queued.
    pub fn try_recv(&mut self) -> Option<StallAlarm> {
        self.rx.try_recv().ok()
    }
}

/// Single-timer stall detector
#[derive(Debug)]
pub struct StallWatchdog {
    timeout: Duration,
    generation: u64,
    timer: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<StallAlarm>,
}

impl StallWatchdog {
    pub fn new(timeout: Duration) -> (Self, StallAlarms) {
        let (tx, rx) = mpsc::unbounded_channel();
        let watchdog = Self {
            timeout,
            generation: 0,
            timer: None,
            tx,
        };
        (watchdog, StallAlarms { rx })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Start the timer, replacing any armed one. Must run inside a Tokio runtime.
    pub fn arm(&mut self) -> u64 {
        self.disarm();
        self.generation += 1;

        let generation = self.generation;
        let timeout = self.timeout;
        let tx = self.tx.clone();

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            // Receiver gone means the session is gone too
            let _ = tx.send(StallAlarm { generation });
        }));

        trace!(generation, timeout_ms = timeout.as_millis() as u64, "Stall watchdog armed");
        generation
    }

    /// Cancel the armed timer. Returns whether one was armed.
    pub fn disarm(&mut self) -> bool {
        match self.timer.take() {
            Some(timer) => {
                timer.abort();
                trace!(generation = self.generation, "Stall watchdog disarmed");
                true
            }
            None => false,
        }
    }

    /// Claim an alarm. True only for the currently armed timer, which is
    /// then considered fired and no longer armed.
    pub fn accept(&mut self, alarm: StallAlarm) -> bool {
        if self.timer.is_some() && alarm.generation == self.generation {
            self.timer = None;
            true
        } else {
            false
        }
    }
}

impl Drop for StallWatchdog {
    fn drop(&mut self) {
        self.disarm();
    }
}
