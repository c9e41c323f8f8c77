// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! The three color kinds a [`super::Style`] can hold, and their packing into the
//! 24-bit foreground/background fields of the style's 64-bit representation.

use strum_macros::{EnumIter, FromRepr};

/// The eight standard ANSI hues plus `Default` (terminal's own foreground/background).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, EnumIter, FromRepr)]
#[repr(u8)]
pub enum AnsiIdentifier {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    Default = 8,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, EnumIter, FromRepr)]
#[repr(u8)]
pub enum Intensity {
    Normal = 0,
    Bright = 1,
}

/// A foreground or background color. `None` means "not set" (inherit the terminal's
/// default for that channel), distinct from `Ansi(Default, _)` which is the explicit
/// SGR "default color" code.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Color {
    #[default]
    None,
    Ansi(AnsiIdentifier, Intensity),
    Rgb(u8, u8, u8),
}

impl Color {
    /// Packs into a `(kind: u2, bits: u24)` pair. `kind` feeds the 2-bit slot of the
    /// style's color-presence byte; `bits` feeds the channel's 24-bit field.
    pub(crate) fn pack(self) -> (u8, u32) {
        match self {
            Color::None => (0, 0),
            Color::Ansi(id, intensity) => {
                let bits = (u32::from(id as u8) << 1) | u32::from(intensity as u8);
                (1, bits)
            }
            Color::Rgb(r, g, b) => {
                let bits = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
                (2, bits)
            }
        }
    }

    pub(crate) fn unpack(kind: u8, bits: u32) -> Self {
        match kind {
            1 => {
                let id = AnsiIdentifier::from_repr(((bits >> 1) & 0xF) as u8)
                    .unwrap_or(AnsiIdentifier::Default);
                let intensity = if bits & 1 == 1 { Intensity::Bright } else { Intensity::Normal };
                Color::Ansi(id, intensity)
            }
            2 => {
                let r = ((bits >> 16) & 0xFF) as u8;
                let g = ((bits >> 8) & 0xFF) as u8;
                let b = (bits & 0xFF) as u8;
                Color::Rgb(r, g, b)
            }
            _ => Color::None,
        }
    }
}
