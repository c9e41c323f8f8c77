// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! The frame-paced driver and its profiler (§4.7): [`DisplayLink`] ticks a render
//! callback at a fixed rate with drift-free scheduling; [`FrameProfiler`] tracks
//! FPS/frame-time/drop counters in `O(1)` amortized per sample.

mod ring_buffer;

pub mod display_link;
pub mod profiler;

pub use display_link::{DisplayLink, DisplayLinkConfig, DisplayLinkHandle, Tick};
pub use profiler::{capacity_for_fps, FrameProfiler};
