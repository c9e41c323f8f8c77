// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! Byte-level ANSI/VT introducers and DEC private-mode numbers (§4.1, §6, GLOSSARY).

/// 7-bit CSI introducer: `ESC [`.
pub const CSI_7BIT: &str = "\x1b[";
/// 8-bit CSI introducer: a single `0x9B` byte.
pub const CSI_8BIT: &str = "\u{9b}";

/// 7-bit OSC introducer: `ESC ]`.
pub const OSC_7BIT: &str = "\x1b]";
/// 8-bit OSC introducer: a single `0x9D` byte.
pub const OSC_8BIT: &str = "\u{9d}";

pub const CSI_PARAM_SEPARATOR: char = ';';

/// DEC private mode 2026: Synchronized Update (GLOSSARY).
pub const DECSET_SYNCHRONIZED_UPDATE: u16 = 2026;
/// DEC private mode 25: cursor visibility (DECTCEM).
pub const DECSET_CURSOR_VISIBILITY: u16 = 25;
/// DEC private mode 1049: alternate screen buffer with save/restore cursor.
pub const DECSET_ALTERNATE_SCREEN: u16 = 1049;
/// DEC private mode 2004: bracketed paste.
pub const DECSET_BRACKETED_PASTE: u16 = 2004;

/// Printable-character range accepted by `FillRectangularArea` (DECFRA), per §4.1: the
/// call is a programming error outside `32..=126` or `160..=255`.
pub const DECFRA_PRINTABLE_LOW: u32 = 32;
pub const DECFRA_PRINTABLE_HIGH: u32 = 126;
pub const DECFRA_PRINTABLE_EXT_LOW: u32 = 160;
pub const DECFRA_PRINTABLE_EXT_HIGH: u32 = 225;
