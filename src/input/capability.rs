// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! Capability query (§4.1, §5, §6, §7): emits `CSI c` and waits for the terminal's
//! Device Attributes reply, falling back to "unknown" if none arrives within a
//! caller-supplied timeout (default 250 ms, §6). This is the one explicit timeout in
//! the whole design (§5).

use super::event::{DeviceAttributes, Event};
use super::parser::Parser;
use crate::ansi::{ControlSequence, DeviceAttributesKind, DeviceAttributesPayload, Encoding};
use crate::device::TerminalDevice;
use std::time::Duration;

use super::POLL_INTERVAL;

/// Writes a primary Device Attributes request to `device` and waits up to `timeout`
/// for a `Response` event to come back through `parser`. Resolves to
/// [`DeviceAttributes::unknown`] on timeout (§7: "Capability-query timeout. Reported
/// as `unknown` capabilities; no exception").
pub async fn query_capabilities<D: TerminalDevice>(
    device: &mut D,
    parser: &mut Parser,
    encoding: Encoding,
    timeout: Duration,
) -> DeviceAttributes {
    let request = ControlSequence::DeviceAttributes(DeviceAttributesPayload::Request(DeviceAttributesKind::Primary));
    device.write(crate::ansi::encode(&request, encoding).as_bytes());

    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        let bytes = device.read();
        if !bytes.is_empty() {
            for event in parser.feed(&bytes) {
                if let Event::Response(attrs) = event {
                    return attrs;
                }
            }
        }
        if tokio::time::Instant::now() >= deadline {
            tracing::debug!("capability query timed out; reporting unknown capabilities");
            return DeviceAttributes::unknown();
        }
        tokio::time::sleep(POLL_INTERVAL.min(deadline.saturating_duration_since(tokio::time::Instant::now()))).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Size;
    use crate::testing::MemoryDevice;

    #[tokio::test]
    async fn returns_unknown_after_timeout_with_no_response() {
        let mut device = MemoryDevice::new(Size::new(80, 24));
        let mut parser = Parser::new();
        let attrs = query_capabilities(&mut device, &mut parser, Encoding::SevenBit, Duration::from_millis(20)).await;
        assert_eq!(attrs, DeviceAttributes::unknown());
        assert_eq!(device.written(), b"\x1b[c");
    }

    #[tokio::test]
    async fn returns_parsed_response_when_it_arrives_before_timeout() {
        let mut device = MemoryDevice::new(Size::new(80, 24));
        device.queue_read(b"\x1b[?1;2c".to_vec());
        let mut parser = Parser::new();
        let attrs = query_capabilities(&mut device, &mut parser, Encoding::SevenBit, Duration::from_millis(200)).await;
        assert_eq!(attrs, DeviceAttributes::Specific { device_type: 1, service: 2 });
    }
}
