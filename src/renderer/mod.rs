// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! The double-buffered, damage-based [`Renderer`] (§4.6): the crate's top-level
//! surface. Owns the `front`/`back` buffers and the `TerminalDevice`, diffs them on
//! every `present()`, and emits the minimal byte stream — bracketed by a DEC
//! `SynchronizedUpdate` pair — that reproduces `back` on the real terminal.

pub mod sink;

use crate::ansi::{ControlSequence, Encoding, GraphicRendition, Mode};
use crate::buffer::Buffer;
use crate::core::{col, row, CharWidth, Position, Size, UnicodeWidth};
use crate::damage::damage;
use crate::device::{TerminalDevice, TerminalMode};
use crate::input::{self, DeviceAttributes, Event, Parser};
use crate::motion::motion_optimise;
use crate::segment::{segment, Segment, DEFAULT_MIN_RUN_LENGTH};
use crate::sgr::SgrStateTracker;
use futures_core::Stream;
use sink::{Sink, DEFAULT_PAGE_SIZE};
use smallvec::smallvec;
use std::time::Duration;

/// Construction-time knobs the spec leaves as caller-supplied parameters (§4.0c): the
/// target [`Encoding`], the segmenter's run-length threshold, the output sink's page
/// size, and the capability-query timeout (§6).
#[derive(Copy, Clone, Debug)]
pub struct RendererConfig {
    pub encoding: Encoding,
    pub min_run_length: usize,
    pub page_size: usize,
    pub capability_timeout: Duration,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            encoding: Encoding::SevenBit,
            min_run_length: DEFAULT_MIN_RUN_LENGTH,
            page_size: DEFAULT_PAGE_SIZE,
            capability_timeout: Duration::from_millis(250),
        }
    }
}

/// Per-frame counters exposed via [`Renderer::statistics`]; populated by a driver
/// (§4.7) once `rendering` is installed, otherwise all zero.
#[derive(Copy, Clone, Default, Debug)]
pub struct FrameStatistics {
    pub rendered: u64,
    pub dropped: u64,
    pub current: Duration,
    pub average: Duration,
    pub fps_min: f64,
    pub fps_max: f64,
}

/// The double-buffered renderer (§4.6). `D` is the `TerminalDevice` the renderer owns
/// exclusively for its lifetime (§5: "Terminal-device mode state... is entered on
/// construction and restored on destruction of the renderer").
pub struct Renderer<D: TerminalDevice> {
    device: D,
    front: Buffer,
    back: Buffer,
    config: RendererConfig,
    width: Box<dyn CharWidth + Send>,
    profiler: Option<crate::driver::FrameProfiler>,
    parser: Parser,
}

impl<D: TerminalDevice> Renderer<D> {
    /// Enters `mode` on `device`, allocates two buffers sized to the device's current
    /// size, and returns the renderer. Fails if mode entry fails (§6).
    ///
    /// # Errors
    /// Propagates [`crate::error::Error::DeviceEnterFailed`] from the device.
    pub fn new(mut device: D, mode: TerminalMode, config: RendererConfig) -> crate::error::Result<Self> {
        device.enter(mode)?;
        let size = device.size();
        Ok(Self {
            front: Buffer::new(size),
            back: Buffer::new(size),
            device,
            config,
            width: Box::new(UnicodeWidth),
            profiler: None,
            parser: Parser::new(),
        })
    }

    #[must_use]
    pub fn size(&self) -> Size { self.back.size() }

    /// A mutable handle to the back buffer; the caller draws into it, then calls
    /// [`Renderer::present`].
    pub fn back_mut(&mut self) -> &mut Buffer { &mut self.back }

    /// Writes raw text to the device through a page-sized buffered sink, bypassing the
    /// damage/segment pipeline (§6: `write(control_sequence | string)`).
    pub fn write(&mut self, text: &str) {
        let mut sink = Sink::new(&mut self.device, self.config.encoding, self.config.page_size);
        sink.write_str(text);
    }

    pub fn write_control_sequence(&mut self, seq: &ControlSequence) {
        let mut sink = Sink::new(&mut self.device, self.config.encoding, self.config.page_size);
        sink.write_control_sequence(seq);
    }

    /// A lazy, restartable stream of input [`Event`]s read from the device (§6).
    /// Dropping the stream and calling `input` again does not lose a sequence that
    /// was split mid-chunk, since the parser's partial state lives on `self`.
    pub fn input(&mut self) -> impl Stream<Item = Event> + '_ {
        input::event_stream(&mut self.device, &mut self.parser)
    }

    /// Queries the terminal's Device Attributes, falling back to
    /// [`DeviceAttributes::unknown`] if no response arrives within
    /// `self.config.capability_timeout` (§5, §6, §7).
    pub async fn query_capabilities(&mut self) -> DeviceAttributes {
        input::query_capabilities(&mut self.device, &mut self.parser, self.config.encoding, self.config.capability_timeout).await
    }

    /// Diffs `front` against `back`, emits the minimal byte stream to reproduce `back`
    /// (bracketed by a `SynchronizedUpdate` pair), then swaps the buffers (§4.6).
    ///
    /// `back` is *not* cleared here; a caller driving frames manually is responsible
    /// for clearing it before the next draw, matching [`Renderer::rendering`]'s own
    /// post-present clear.
    pub fn present(&mut self) {
        let spans = damage(&self.front, &self.back);
        if spans.is_empty() {
            std::mem::swap(&mut self.front, &mut self.back);
            return;
        }

        let size = self.back.size();
        {
            let mut sink = Sink::new(&mut self.device, self.config.encoding, self.config.page_size);
            sink.write_control_sequence(&ControlSequence::SetMode(Mode::SynchronizedUpdate));

            // Sentinel forcing the first span's motion to be emitted unconditionally.
            let mut current = Position::new(row(u16::MAX), col(u16::MAX));
            let mut tracker = SgrStateTracker::new();

            for span in &spans {
                let pos = Position::from_offset(span.range.start, size);
                if pos != current {
                    for seq in motion_optimise(current, pos, self.config.encoding) {
                        sink.write_control_sequence(&seq);
                    }
                }

                let transition = tracker.transition(span.style);
                if !transition.is_empty() {
                    sink.write_control_sequence(&ControlSequence::SelectGraphicRendition(transition));
                }

                for segment in segment(&self.back, span, self.config.min_run_length) {
                    match segment {
                        Segment::Run(c, n) => {
                            sink.write_str(&c.to_string());
                            if n > 1 {
                                sink.write_control_sequence(&ControlSequence::Repeat((n - 1) as u16));
                            }
                        }
                        Segment::Literal(s) => sink.write_str(&s),
                    }
                }

                current = cursor_after_span(span.range.end - 1, size);
            }

            sink.write_control_sequence(&ControlSequence::SelectGraphicRendition(smallvec![GraphicRendition::Reset]));
            sink.write_control_sequence(&ControlSequence::ResetMode(Mode::SynchronizedUpdate));
        }

        std::mem::swap(&mut self.front, &mut self.back);
    }

    #[must_use]
    pub fn char_width(&self) -> &dyn CharWidth { self.width.as_ref() }

    /// Installs a [`crate::driver::DisplayLink`] at `fps` and drives it forever: each
    /// tick, `callback` draws into `&mut back`, then the renderer presents and clears
    /// it for the next tick (§6: "auto-present and clear `back`"). Returns only when
    /// `callback` returns `Err`, which propagates to the caller (§5, §7).
    ///
    /// # Errors
    /// Propagates whatever error `callback` returns.
    pub async fn rendering<F, E>(&mut self, fps: f64, mut callback: F) -> Result<(), E>
    where
        F: FnMut(&mut Buffer) -> Result<(), E>,
    {
        let mut link = crate::driver::DisplayLink::new(crate::driver::DisplayLinkConfig { fps });
        let target = Duration::from_secs_f64(1.0 / fps);
        self.profiler.get_or_insert_with(|| crate::driver::FrameProfiler::new(target, fps));

        loop {
            let tick = link.tick().await;
            if tick.is_paused {
                continue;
            }

            let started = std::time::Instant::now();
            callback(&mut self.back)?;
            self.present();
            self.back.clear();
            self.profiler.as_mut().expect("inserted above").record(started.elapsed());
        }
    }

    /// The most recent [`FrameStatistics`], populated once [`Renderer::rendering`] has
    /// recorded at least one frame; all zero before then (§6).
    #[must_use]
    pub fn statistics(&self) -> FrameStatistics {
        self.profiler.as_ref().map(crate::driver::FrameProfiler::statistics).unwrap_or_default()
    }

    /// Restores the device's original mode. Called automatically on drop; exposed so a
    /// caller can observe restore failures (§6, §7) instead of silently swallowing them.
    ///
    /// # Errors
    /// Propagates [`crate::error::Error::DeviceRestoreFailed`].
    pub fn restore(&mut self) -> crate::error::Result<()> { self.device.restore() }
}

impl<D: TerminalDevice> Drop for Renderer<D> {
    fn drop(&mut self) {
        if let Err(e) = self.device.restore() {
            tracing::warn!(error = %e, "failed to restore terminal mode on renderer teardown");
        }
    }
}

/// The optimiser's next `from` after writing through buffer index `last` (§4.5): the
/// physical cursor has already advanced one column past the last written cell, except
/// in the deferred-wrap case, where writing the rightmost column leaves the terminal's
/// cursor parked there until the next write forces the wrap.
fn cursor_after_span(last: usize, size: Size) -> Position {
    let last_pos = Position::from_offset(last, size);
    if last_pos.col.0 == size.width {
        last_pos
    } else {
        Position::from_offset(last + 1, size)
    }
}
