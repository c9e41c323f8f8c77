// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! [`MemoryDevice`]: the crate's only concrete [`TerminalDevice`], used exclusively by
//! tests (§6). Writes accumulate into a buffer the test can inspect; reads are served
//! from a queue the test pre-loads, modeling the bytes a real terminal would have sent.

use crate::core::Size;
use crate::device::{TerminalDevice, TerminalMode};
use std::collections::VecDeque;

/// An in-memory stand-in for a real terminal. `enter`/`restore` always succeed unless
/// told otherwise via [`MemoryDevice::fail_enter`]/[`MemoryDevice::fail_restore`], which
/// let tests exercise the `Renderer::new` and teardown failure paths (§6, §7).
pub struct MemoryDevice {
    size: Size,
    written: Vec<u8>,
    pending_reads: VecDeque<Vec<u8>>,
    mode: Option<TerminalMode>,
    fail_enter: bool,
    fail_restore: bool,
}

impl MemoryDevice {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            written: Vec::new(),
            pending_reads: VecDeque::new(),
            mode: None,
            fail_enter: false,
            fail_restore: false,
        }
    }

    /// All bytes written so far, in order, across every `write` call.
    #[must_use]
    pub fn written(&self) -> &[u8] { &self.written }

    #[must_use]
    pub fn written_as_str(&self) -> &str {
        std::str::from_utf8(&self.written).expect("MemoryDevice test output must be valid UTF-8")
    }

    /// Queues `bytes` to be returned by a future `read()` call, in FIFO order. Lets a
    /// test feed a split-across-calls byte stream to the input parser (§4.8).
    pub fn queue_read(&mut self, bytes: impl Into<Vec<u8>>) { self.pending_reads.push_back(bytes.into()); }

    #[must_use]
    pub fn current_mode(&self) -> Option<TerminalMode> { self.mode }

    pub fn fail_enter(&mut self, fail: bool) { self.fail_enter = fail; }

    pub fn fail_restore(&mut self, fail: bool) { self.fail_restore = fail; }

    pub fn resize(&mut self, size: Size) { self.size = size; }
}

impl TerminalDevice for MemoryDevice {
    fn write(&mut self, bytes: &[u8]) { self.written.extend_from_slice(bytes); }

    fn read(&mut self) -> Vec<u8> { self.pending_reads.pop_front().unwrap_or_default() }

    fn size(&self) -> Size { self.size }

    fn enter(&mut self, mode: TerminalMode) -> crate::error::Result<()> {
        if self.fail_enter {
            return Err(crate::error::Error::DeviceEnterFailed("MemoryDevice configured to fail enter".into()));
        }
        self.mode = Some(mode);
        Ok(())
    }

    fn restore(&mut self) -> crate::error::Result<()> {
        if self.fail_restore {
            return Err(crate::error::Error::DeviceRestoreFailed("MemoryDevice configured to fail restore".into()));
        }
        self.mode = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Size;

    #[test]
    fn write_accumulates_across_calls() {
        let mut dev = MemoryDevice::new(Size::new(80, 24));
        dev.write(b"hello");
        dev.write(b" world");
        assert_eq!(dev.written_as_str(), "hello world");
    }

    #[test]
    fn read_serves_queued_chunks_in_order_then_empty() {
        let mut dev = MemoryDevice::new(Size::new(80, 24));
        dev.queue_read(b"ab".to_vec());
        dev.queue_read(b"cd".to_vec());
        assert_eq!(dev.read(), b"ab");
        assert_eq!(dev.read(), b"cd");
        assert_eq!(dev.read(), Vec::<u8>::new());
    }

    #[test]
    fn enter_and_restore_round_trip_mode() {
        let mut dev = MemoryDevice::new(Size::new(80, 24));
        assert_eq!(dev.current_mode(), None);
        dev.enter(TerminalMode::Raw).unwrap();
        assert_eq!(dev.current_mode(), Some(TerminalMode::Raw));
        dev.restore().unwrap();
        assert_eq!(dev.current_mode(), None);
    }

    #[test]
    fn configured_failures_surface_as_errors() {
        let mut dev = MemoryDevice::new(Size::new(80, 24));
        dev.fail_enter(true);
        assert!(dev.enter(TerminalMode::Raw).is_err());
        dev.fail_enter(false);
        dev.enter(TerminalMode::Raw).unwrap();
        dev.fail_restore(true);
        assert!(dev.restore().is_err());
    }
}
