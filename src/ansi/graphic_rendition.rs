// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! [`GraphicRendition`]: the individual codes a `SelectGraphicRendition` list is built
//! from (§4.1, §4.4).

use crate::style::{AnsiIdentifier, Color, Intensity};
use smallvec::SmallVec;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum GraphicRendition {
    Reset,
    Bold,
    /// SGR 22: turns off both bold and dim. The dialect's "bold-off" code (§4.4).
    Normal,
    Italic,
    /// SGR 23.
    ItalicOff,
    Underline,
    /// SGR 24.
    UnderlineOff,
    Blink,
    /// SGR 25.
    BlinkOff,
    Strikethrough,
    /// SGR 29.
    StrikethroughOff,
    Foreground(Color),
    Background(Color),
}

impl GraphicRendition {
    /// Numeric SGR parameter tokens, in emission order, for this single rendition.
    /// `Foreground`/`Background` with an `Rgb` color expand to `38;2;r;g;b` /
    /// `48;2;r;g;b` (§4.1).
    #[must_use]
    pub fn codes(self) -> SmallVec<[u16; 5]> {
        match self {
            GraphicRendition::Reset => SmallVec::from_slice(&[0]),
            GraphicRendition::Bold => SmallVec::from_slice(&[1]),
            GraphicRendition::Normal => SmallVec::from_slice(&[22]),
            GraphicRendition::Italic => SmallVec::from_slice(&[3]),
            GraphicRendition::ItalicOff => SmallVec::from_slice(&[23]),
            GraphicRendition::Underline => SmallVec::from_slice(&[4]),
            GraphicRendition::UnderlineOff => SmallVec::from_slice(&[24]),
            GraphicRendition::Blink => SmallVec::from_slice(&[5]),
            GraphicRendition::BlinkOff => SmallVec::from_slice(&[25]),
            GraphicRendition::Strikethrough => SmallVec::from_slice(&[9]),
            GraphicRendition::StrikethroughOff => SmallVec::from_slice(&[29]),
            GraphicRendition::Foreground(color) => fg_codes(color),
            GraphicRendition::Background(color) => bg_codes(color),
        }
    }
}

fn fg_codes(color: Color) -> SmallVec<[u16; 5]> {
    match color {
        Color::None | Color::Ansi(AnsiIdentifier::Default, Intensity::Normal) => {
            SmallVec::from_slice(&[39])
        }
        Color::Ansi(id, Intensity::Normal) => SmallVec::from_slice(&[30 + id as u16]),
        Color::Ansi(id, Intensity::Bright) => SmallVec::from_slice(&[90 + id as u16]),
        Color::Rgb(r, g, b) => SmallVec::from_slice(&[38, 2, u16::from(r), u16::from(g), u16::from(b)]),
    }
}

fn bg_codes(color: Color) -> SmallVec<[u16; 5]> {
    match color {
        Color::None | Color::Ansi(AnsiIdentifier::Default, Intensity::Normal) => {
            SmallVec::from_slice(&[49])
        }
        Color::Ansi(id, Intensity::Normal) => SmallVec::from_slice(&[40 + id as u16]),
        Color::Ansi(id, Intensity::Bright) => SmallVec::from_slice(&[100 + id as u16]),
        Color::Rgb(r, g, b) => SmallVec::from_slice(&[48, 2, u16::from(r), u16::from(g), u16::from(b)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_foreground_uses_extended_color_form() {
        let codes = GraphicRendition::Foreground(Color::Rgb(1, 2, 3)).codes();
        assert_eq!(&codes[..], &[38, 2, 1, 2, 3]);
    }

    #[test]
    fn bright_ansi_background_uses_100_range() {
        let codes = GraphicRendition::Background(Color::Ansi(AnsiIdentifier::Red, Intensity::Bright)).codes();
        assert_eq!(&codes[..], &[101]);
    }

    #[test]
    fn none_foreground_is_default_code() {
        let codes = GraphicRendition::Foreground(Color::None).codes();
        assert_eq!(&codes[..], &[39]);
    }
}
