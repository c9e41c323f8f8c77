// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! Error kinds the core distinguishes (§7).
//!
//! Most failure modes in this crate are *not* `Result`s: out-of-bounds buffer access
//! is a silent no-op, platform I/O errors are swallowed at the sink, and a
//! capability-query timeout resolves to "unknown" rather than failing. [`Error`]
//! exists only for the handful of conditions that genuinely propagate to the caller —
//! everything else is either infallible or a [`fatal_bug!`] programming error.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// A render callback installed via `rendering(fps, callback)` returned an error;
    /// propagates out and cancels the driver task (§5, §7).
    #[error("render callback failed: {0}")]
    CallbackFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// `Renderer::new(mode)` could not put the terminal device into the requested
    /// mode (§6).
    #[error("failed to enter terminal mode: {0}")]
    DeviceEnterFailed(String),

    /// Mode restore on renderer teardown failed. Reported, never retried (§5, §7).
    #[error("failed to restore terminal mode: {0}")]
    DeviceRestoreFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Terminates the current task with a `miette` diagnostic report. Used exclusively for
/// the §7 "programming error (fatal)" cases: emitting a response-shaped
/// [`crate::ansi::ControlSequence`], or a `FillRectangularArea` whose character falls
/// outside the printable set. These indicate a bug in the caller, not a runtime
/// condition, so they are not folded into [`Error`].
macro_rules! fatal_bug {
    ($($arg:tt)*) => {{
        let report = miette::miette!($($arg)*);
        eprintln!("{report:?}");
        panic!("ansistage: programming error: {report}");
    }};
}

pub(crate) use fatal_bug;
