// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! The input parser (§4.8) and the event types it produces (§3). Independent of the
//! rendering pipeline: depends only on [`crate::ansi`]'s device-attributes types.

mod capability;
pub mod event;
pub mod parser;

pub use capability::query_capabilities;
pub use event::{DeviceAttributes, Event, KeyCode, KeyState, Modifiers, MouseAction, MouseEvent};
pub use parser::Parser;

use crate::device::TerminalDevice;
use futures_core::Stream;
use std::time::Duration;

/// How long [`event_stream`] sleeps between polls of a device that currently has no
/// bytes available (§5: "input read when no bytes are available" is the task's
/// suspension point; [`TerminalDevice::read`] is synchronous and non-blocking by
/// contract here, so this loop stands in for the real backend's blocking read).
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(4);

/// A lazy, restartable stream of [`Event`]s read from `device` through `parser`
/// (§6's Renderer surface: "Lazy, restartable stream of `Event`s; ends on terminal
/// close"). `parser` is caller-owned so its partial state survives across separate
/// calls to this function, matching "restartable" — dropping and recreating the
/// stream does not lose a sequence that was split mid-chunk.
///
/// This crate's only `TerminalDevice` is an in-memory test double with no notion of
/// "closed"; a real platform backend ends the stream by having `read` signal EOF,
/// which is outside this crate's scope (§1 Non-goals).
pub fn event_stream<'a, D: TerminalDevice>(
    device: &'a mut D,
    parser: &'a mut Parser,
) -> impl Stream<Item = Event> + 'a {
    async_stream::stream! {
        loop {
            let bytes = device.read();
            if bytes.is_empty() {
                tokio::time::sleep(POLL_INTERVAL).await;
                continue;
            }
            for event in parser.feed(&bytes) {
                tracing::trace!(?event, "input event");
                yield event;
            }
        }
    }
}
