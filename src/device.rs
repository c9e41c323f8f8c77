// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! [`TerminalDevice`]: the opaque platform collaborator this crate never implements
//! for real (§1 Non-goals, §6). Raw-mode syscalls, the real byte-level read/write, and
//! window-size polling all live on the other side of this trait; the only concrete
//! implementation in this crate is [`crate::testing::MemoryDevice`], used by tests.

use crate::core::Size;

/// Canonical (cooked, line-buffered) vs raw (unbuffered, no echo) terminal input
/// mode (§6: "Switch between canonical and raw").
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TerminalMode {
    Canonical,
    Raw,
}

/// A terminal's byte-sink, input-byte source, size observer, and mode enter/leave
/// hooks, per §1's "opaque Terminal Device" and the §6 interface table.
///
/// `write` is contractually best-effort and blocking; errors are swallowed at this
/// boundary (§7: "Platform I/O errors on writes... silently ignored"). `read` yields
/// the next available chunk, which may be empty; it is the input task's suspension
/// point (§5).
pub trait TerminalDevice: Send {
    fn write(&mut self, bytes: &[u8]);

    fn read(&mut self) -> Vec<u8>;

    fn size(&self) -> Size;

    /// # Errors
    /// Returns `Err` if the platform could not switch into `mode`; `Renderer::new`
    /// treats this as fatal to construction (§6).
    fn enter(&mut self, mode: TerminalMode) -> crate::error::Result<()>;

    /// # Errors
    /// Returns `Err` if the platform could not restore the original mode. The caller
    /// only reports this; it never retries (§7).
    fn restore(&mut self) -> crate::error::Result<()>;
}
