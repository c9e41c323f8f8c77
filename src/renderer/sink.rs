// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! [`Sink`]: the scope-owned buffered output channel a single `present()` writes
//! through (§4.6). Fragments accumulate in a page-sized buffer; a fragment larger than
//! the remaining capacity first flushes what's pending, then is appended (or written
//! straight through, if it alone exceeds the page). Guaranteed to flush on drop, so the
//! closing `ResetMode(SynchronizedUpdate)` a caller schedules via a scope guard always
//! reaches the device even on an early return.

use crate::ansi::{encode, ControlSequence, Encoding};
use crate::device::TerminalDevice;

/// Default buffer capacity: one page (§4.6).
pub const DEFAULT_PAGE_SIZE: usize = 4096;

pub struct Sink<'a> {
    device: &'a mut dyn TerminalDevice,
    encoding: Encoding,
    page_size: usize,
    buf: String,
}

impl<'a> Sink<'a> {
    #[must_use]
    pub fn new(device: &'a mut dyn TerminalDevice, encoding: Encoding, page_size: usize) -> Self {
        Self { device, encoding, page_size, buf: String::with_capacity(page_size) }
    }

    /// Appends raw text, flushing first if it would overflow the page.
    pub fn write_str(&mut self, text: &str) {
        if self.buf.len() + text.len() > self.page_size {
            self.flush();
        }
        if text.len() > self.page_size {
            self.device.write(text.as_bytes());
        } else {
            self.buf.push_str(text);
        }
    }

    pub fn write_control_sequence(&mut self, seq: &ControlSequence) {
        let encoded = encode(seq, self.encoding);
        self.write_str(&encoded);
    }

    /// Drains any buffered bytes to the device.
    pub fn flush(&mut self) {
        if !self.buf.is_empty() {
            self.device.write(self.buf.as_bytes());
            self.buf.clear();
        }
    }
}

impl Drop for Sink<'_> {
    fn drop(&mut self) { self.flush(); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Size;
    use crate::testing::MemoryDevice;

    #[test]
    fn small_writes_stay_buffered_until_flush() {
        let mut dev = MemoryDevice::new(Size::new(80, 24));
        {
            let mut sink = Sink::new(&mut dev, Encoding::SevenBit, DEFAULT_PAGE_SIZE);
            sink.write_str("hello");
        }
        assert_eq!(dev.written(), b"hello");
    }

    #[test]
    fn overflowing_the_page_flushes_before_appending() {
        let mut dev = MemoryDevice::new(Size::new(80, 24));
        {
            let mut sink = Sink::new(&mut dev, Encoding::SevenBit, 8);
            sink.write_str("1234567");
            sink.write_str("89");
        }
        assert_eq!(dev.written(), b"123456789");
    }

    #[test]
    fn drop_flushes_remaining_bytes() {
        let mut dev = MemoryDevice::new(Size::new(80, 24));
        {
            let mut sink = Sink::new(&mut dev, Encoding::SevenBit, DEFAULT_PAGE_SIZE);
            sink.write_control_sequence(&ControlSequence::CursorHorizontalAbsolute(1));
        }
        assert_eq!(dev.written(), b"\x1b[G");
    }
}
