// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! A single terminal cell: a character/style pair, plus the wide-character
//! continuation-cell convention (§3).

use crate::style::Style;

/// Sentinel character occupying the cell trailing a width-2 leader.
pub const CONTINUATION_CHAR: char = '\u{0000}';

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub character: char,
    pub style: Style,
}

impl Cell {
    #[must_use]
    pub fn new(character: char, style: Style) -> Self { Self { character, style } }

    /// The blank cell: `(' ', default-style)`.
    #[must_use]
    pub fn blank() -> Self { Self::new(' ', Style::default_style()) }

    /// A continuation cell trailing a wide-character leader, sharing its style.
    #[must_use]
    pub fn continuation(style: Style) -> Self { Self::new(CONTINUATION_CHAR, style) }

    #[must_use]
    pub fn is_continuation(&self) -> bool { self.character == CONTINUATION_CHAR }
}

impl Default for Cell {
    fn default() -> Self { Self::blank() }
}
