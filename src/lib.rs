// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! A double-buffered, damage-based terminal UI rendering engine.
//!
//! ```text
//! caller --draw--> back-buffer
//! renderer: diff(front, back) -> [DamageSpan]
//!         -> for each span: motion-optimise, SGR-transition, segment
//!         -> buffered byte stream -> Terminal Device
//!         -> swap(front, back)
//! driver: timer --tick--> render callback --> present
//! terminal -> input bytes -> parser -> [Event] -> caller
//! ```
//!
//! Module dependency order (leaves first): [`core`] -> [`style`]/[`buffer`] ->
//! [`ansi`] -> [`damage`]/[`segment`]/[`sgr`] -> [`motion`] -> [`renderer`] ->
//! [`driver`]. [`input`] depends only on [`input::event`].

pub mod ansi;
pub mod buffer;
pub mod core;
pub mod damage;
pub mod device;
pub mod driver;
pub mod error;
pub mod input;
pub mod motion;
pub mod renderer;
pub mod segment;
pub mod sgr;
pub mod style;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{Error, Result};
