// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! [`DisplayLink`]: the frame-paced async driver (§4.7). Ticks at a fixed target
//! interval using drift-free scheduling — the next deadline is always computed from
//! the original `t0` epoch, never from the previous tick's wall-clock arrival, so
//! scheduling jitter never accumulates across frames.

use crate::error::fatal_bug;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// The only construction-time knob the driver needs: the target frame rate (§4.0c).
#[derive(Copy, Clone, Debug)]
pub struct DisplayLinkConfig {
    pub fps: f64,
}

/// Passed to the render callback on every tick (§4.7: "a handle exposing `timestamp`,
/// `duration`, and `isPaused`").
#[derive(Copy, Clone, Debug)]
pub struct Tick {
    pub timestamp: Instant,
    pub duration: Duration,
    pub is_paused: bool,
}

/// A cloneable remote control for a running [`DisplayLink`]: pause and resume from any
/// task (§4.7, §5).
#[derive(Clone)]
pub struct DisplayLinkHandle {
    paused: Arc<AtomicBool>,
}

impl DisplayLinkHandle {
    pub fn pause(&self) { self.paused.store(true, Ordering::SeqCst); }
    pub fn resume(&self) { self.paused.store(false, Ordering::SeqCst); }
    #[must_use]
    pub fn is_paused(&self) -> bool { self.paused.load(Ordering::SeqCst) }
}

pub struct DisplayLink {
    period: Duration,
    paused: Arc<AtomicBool>,
    t0: Option<Instant>,
    tick_index: u64,
}

impl DisplayLink {
    #[must_use]
    pub fn new(config: DisplayLinkConfig) -> Self {
        if config.fps <= 0.0 {
            fatal_bug!("DisplayLink requires a positive target fps, got {}", config.fps);
        }
        Self {
            period: Duration::from_secs_f64(1.0 / config.fps),
            paused: Arc::new(AtomicBool::new(false)),
            t0: None,
            tick_index: 0,
        }
    }

    #[must_use]
    pub fn handle(&self) -> DisplayLinkHandle { DisplayLinkHandle { paused: Arc::clone(&self.paused) } }

    /// Waits for and returns the next tick. The first call establishes `t0 := now`
    /// (§4.7: "when attached to a task group it takes a timestamp"); every later call
    /// schedules off that same epoch, so jitter never accumulates.
    pub async fn tick(&mut self) -> Tick {
        let t0 = *self.t0.get_or_insert_with(Instant::now);

        let now = Instant::now();
        let elapsed = now.saturating_duration_since(t0);
        // `floor((now - t0) / T)`: the latest tick boundary at or before `now`. If we
        // fell behind (a slow callback, a suspended process), this jumps straight to
        // the current boundary instead of replaying every missed tick — the "no
        // catch-up bursts" guarantee.
        let current_index = (elapsed.as_secs_f64() / self.period.as_secs_f64()).floor() as u64;
        self.tick_index = self.tick_index.max(current_index);

        let next = t0 + self.period * u32::try_from(self.tick_index).unwrap_or(u32::MAX);
        if next > Instant::now() {
            tokio::time::sleep_until(next).await;
        }

        let is_paused = self.paused.load(Ordering::SeqCst);
        self.tick_index += 1;
        Tick { timestamp: next, duration: self.period, is_paused }
    }

    /// Runs the tick loop until `callback` returns `Err`, which propagates out and
    /// ends the loop (§4.7, §5 "Callback errors"). Cancelling the enclosing task at
    /// any point stops the loop at its next suspension point (§5).
    pub async fn run<F, Fut, E>(&mut self, mut callback: F) -> Result<(), E>
    where
        F: FnMut(Tick) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        loop {
            let tick = self.tick().await;
            if !tick.is_paused {
                callback(tick).await?;
            }
        }
    }
}
