// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! [`ControlSequence`]: the closed sum type enumerating the ANSI/VT command alphabet
//! this crate can emit (§4.1). It is both the renderer's output alphabet and, via its
//! response-shaped variants, a description of what the input parser can observe coming
//! the other way — those variants are *never* valid to emit (§7).

use crate::ansi::graphic_rendition::GraphicRendition;
use crate::buffer::Rect;
use smallvec::SmallVec;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EraseMode {
    /// From the cursor/line start to its end.
    ToEnd,
    /// From the start to the cursor/line start.
    ToStart,
    /// The entire line or display.
    All,
}

impl EraseMode {
    #[must_use]
    pub(crate) fn code(self) -> u16 {
        match self {
            EraseMode::ToEnd => 0,
            EraseMode::ToStart => 1,
            EraseMode::All => 2,
        }
    }
}

/// A DEC private mode this crate knows how to toggle (§4.6, §5).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Mode {
    SynchronizedUpdate,
    CursorVisibility,
    AlternateScreen,
    BracketedPaste,
}

impl Mode {
    #[must_use]
    pub(crate) fn number(self) -> u16 {
        match self {
            Mode::SynchronizedUpdate => crate::ansi::constants::DECSET_SYNCHRONIZED_UPDATE,
            Mode::CursorVisibility => crate::ansi::constants::DECSET_CURSOR_VISIBILITY,
            Mode::AlternateScreen => crate::ansi::constants::DECSET_ALTERNATE_SCREEN,
            Mode::BracketedPaste => crate::ansi::constants::DECSET_BRACKETED_PASTE,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum DeviceAttributesKind {
    Primary,
    Secondary,
    Tertiary,
}

/// Device-attributes queries are valid output; the *responses* are not (§4.1, §7) —
/// they only ever arrive from the terminal and are translated by the input parser into
/// `Event::Response` (§4.8), never constructed here for emission.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum DeviceAttributesPayload {
    Request(DeviceAttributesKind),
    Response { kind: DeviceAttributesKind, params: SmallVec<[u16; 8]> },
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ControlSequence {
    // Cursor motion.
    CursorPosition { row: u16, col: u16 },
    CursorUp(u16),
    CursorDown(u16),
    CursorForward(u16),
    CursorBack(u16),
    CursorNextLine(u16),
    CursorPreviousLine(u16),
    CursorHorizontalAbsolute(u16),

    // Erasing.
    EraseDisplay(EraseMode),
    EraseLine(EraseMode),
    /// Erase Character (ECH): erase `n` cells forward without moving the cursor —
    /// the spec's "erase field".
    EraseCharacter(u16),
    /// DECERA: erase a rectangular area — the spec's "erase area".
    EraseRectangularArea(Rect),
    /// DECFRA: fill a rectangular area with one character (§4.1). The character must
    /// lie in the printable set; constructing an encoder call with one outside it is a
    /// programming error (§7).
    FillRectangularArea { character: char, area: Rect },

    // Scrolling.
    ScrollUp(u16),
    ScrollDown(u16),

    // Rendition and modes.
    SelectGraphicRendition(SmallVec<[GraphicRendition; 4]>),
    SetMode(Mode),
    ResetMode(Mode),

    /// REP: repeat the last graphic character `n` times — used by the run-length
    /// segmenter's `Run` encoding (§4.3, §4.6).
    Repeat(u16),

    /// CSI c / CSI > c / CSI = c as output; also models the *response* shape so the
    /// encoder can recognize and reject it (§7).
    DeviceAttributes(DeviceAttributesPayload),

    /// CSI row;col R — a cursor-position *report*. Only ever arrives from the
    /// terminal; never valid as output (§4.1, §7).
    CurrentPositionReport { row: u16, col: u16 },
}

impl ControlSequence {
    /// True for the variants that only ever arrive *from* the terminal. Emitting one
    /// is a programming error (§7).
    #[must_use]
    pub fn is_response_shaped(&self) -> bool {
        matches!(
            self,
            ControlSequence::CurrentPositionReport { .. }
                | ControlSequence::DeviceAttributes(DeviceAttributesPayload::Response { .. })
        )
    }
}
