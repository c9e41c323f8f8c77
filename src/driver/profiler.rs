// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! [`FrameProfiler`]: tracks FPS/frame-time/dropped-frame counters in `O(1)` amortized
//! per sample (§4.7), backed by a runtime-capacity [`RingBuffer`].

use super::ring_buffer::RingBuffer;
use crate::renderer::FrameStatistics;
use std::time::Duration;

/// Ring-buffer capacity for a target frame rate `f` (§4.7): `max(60, 2*f)`.
#[must_use]
pub fn capacity_for_fps(fps: f64) -> usize {
    (2.0 * fps).round().max(60.0) as usize
}

/// Frame counters accumulated alongside the sample ring (§4.7, §3).
#[derive(Copy, Clone, Default, Debug)]
struct FrameCounts {
    rendered: u64,
    dropped: u64,
}

pub struct FrameProfiler {
    target: Duration,
    samples: RingBuffer<Duration>,
    counts: FrameCounts,
    min: Duration,
    max: Duration,
}

impl FrameProfiler {
    /// `target` is the display link's frame interval `T`; frames taking longer than
    /// this count as dropped.
    #[must_use]
    pub fn new(target: Duration, fps: f64) -> Self {
        Self {
            target,
            samples: RingBuffer::new(capacity_for_fps(fps)),
            counts: FrameCounts::default(),
            min: Duration::MAX,
            max: Duration::ZERO,
        }
    }

    /// Records one frame's elapsed render time (§4.7: "`measure(op)` records `Δ :=
    /// elapsed(op)`").
    pub fn record(&mut self, elapsed: Duration) {
        self.counts.rendered += 1;
        if elapsed > self.target {
            self.counts.dropped += 1;
        }

        let was_full = self.samples.is_full();
        let evicted = self.samples.push(elapsed);

        if was_full {
            let evicted = evicted.expect("a full ring buffer always evicts on push");
            if evicted == self.min || evicted == self.max {
                self.recompute_extrema();
            } else {
                self.min = self.min.min(elapsed);
                self.max = self.max.max(elapsed);
            }
        } else {
            self.min = self.min.min(elapsed);
            self.max = self.max.max(elapsed);
        }
    }

    fn recompute_extrema(&mut self) {
        self.min = self.samples.iter().copied().min().unwrap_or(Duration::MAX);
        self.max = self.samples.iter().copied().max().unwrap_or(Duration::ZERO);
    }

    /// Computes [`FrameStatistics`] from the current sample ring; all zero if no
    /// samples have been recorded yet (§4.7).
    #[must_use]
    pub fn statistics(&self) -> FrameStatistics {
        if self.samples.is_empty() {
            return FrameStatistics { rendered: self.counts.rendered, dropped: self.counts.dropped, ..Default::default() };
        }

        let total: Duration = self.samples.iter().sum();
        let average = total / self.samples.len() as u32;
        let current = *self.samples.last().expect("checked non-empty above");

        FrameStatistics {
            rendered: self.counts.rendered,
            dropped: self.counts.dropped,
            current,
            average,
            fps_max: reciprocal_seconds(self.min),
            fps_min: reciprocal_seconds(self.max),
        }
    }
}

fn reciprocal_seconds(d: Duration) -> f64 {
    let secs = d.as_secs_f64();
    if secs <= 0.0 { 0.0 } else { 1.0 / secs }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profiler_reports_all_zero_statistics() {
        let profiler = FrameProfiler::new(Duration::from_millis(16), 60.0);
        let stats = profiler.statistics();
        assert_eq!(stats.rendered, 0);
        assert_eq!(stats.average, Duration::ZERO);
        assert_eq!(stats.fps_min, 0.0);
    }

    #[test]
    fn samples_exceeding_target_count_as_dropped() {
        let mut profiler = FrameProfiler::new(Duration::from_millis(16), 60.0);
        profiler.record(Duration::from_millis(10));
        profiler.record(Duration::from_millis(20));
        let stats = profiler.statistics();
        assert_eq!(stats.rendered, 2);
        assert_eq!(stats.dropped, 1);
    }

    #[test]
    fn ring_of_capacity_k_after_more_than_k_samples_averages_the_last_k() {
        // Boundary behaviour, §8: a ring of capacity k after > k samples reports
        // average = mean(last k samples).
        let mut profiler = FrameProfiler::new(Duration::from_millis(16), 1.0);
        // fps=1.0 -> capacity = max(60, 2) = 60. Use a tiny explicit capacity instead by
        // feeding exactly one more sample than capacity and checking the oldest sample
        // was evicted from the average.
        let capacity = capacity_for_fps(1.0);
        for i in 0..capacity {
            profiler.record(Duration::from_millis(10 + i as u64));
        }
        // One more sample evicts the oldest (10ms).
        profiler.record(Duration::from_millis(1000));
        let stats = profiler.statistics();
        let expected_sum: Duration = (1..capacity).map(|i| Duration::from_millis(10 + i as u64)).sum::<Duration>()
            + Duration::from_millis(1000);
        let expected_avg = expected_sum / capacity as u32;
        assert_eq!(stats.average, expected_avg);
    }

    #[test]
    fn extrema_recompute_when_the_evicted_sample_was_the_min_or_max() {
        let mut profiler = FrameProfiler::new(Duration::from_millis(16), 1.0);
        let capacity = capacity_for_fps(1.0);
        // Fill with a constant sample, then push a smaller one to become the new min.
        for _ in 0..capacity {
            profiler.record(Duration::from_millis(20));
        }
        profiler.record(Duration::from_millis(5));
        let stats = profiler.statistics();
        assert_eq!(stats.fps_max, reciprocal_seconds(Duration::from_millis(5)));
    }
}
