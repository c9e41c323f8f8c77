// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! [`Style`]: a `(foreground, background, attributes)` triple packed into a single
//! `u64` so that equality — the invariant the damage detector relies on (§3) — is a
//! single integer comparison.
//!
//! Bit layout, highest to lowest:
//!
//! ```text
//! 63..40  background color bits (24)
//! 39..16  foreground color bits (24)
//! 15..8   attribute bits (5 used, 3 reserved)
//! 7..0    color-presence flags: bg-kind (bits 7..6), fg-kind (bits 5..4), reserved (3..0)
//! ```

use super::attrs::Attributes;
use super::color::Color;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style(u64);

impl std::fmt::Debug for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Style")
            .field("fg", &self.fg())
            .field("bg", &self.bg())
            .field("attrs", &self.attrs())
            .finish()
    }
}

impl Style {
    #[must_use]
    pub fn new(fg: Color, bg: Color, attrs: Attributes) -> Self {
        let (fg_kind, fg_bits) = fg.pack();
        let (bg_kind, bg_bits) = bg.pack();
        let packed = (u64::from(bg_bits) << 40)
            | (u64::from(fg_bits) << 16)
            | (u64::from(attrs.pack()) << 8)
            | (u64::from(bg_kind) << 6)
            | (u64::from(fg_kind) << 4);
        Style(packed)
    }

    /// The blank/default style: no color, no attributes.
    #[must_use]
    pub fn default_style() -> Self { Style::default() }

    #[must_use]
    pub fn fg(&self) -> Color {
        let kind = ((self.0 >> 4) & 0b11) as u8;
        let bits = ((self.0 >> 16) & 0xFF_FFFF) as u32;
        Color::unpack(kind, bits)
    }

    #[must_use]
    pub fn bg(&self) -> Color {
        let kind = ((self.0 >> 6) & 0b11) as u8;
        let bits = ((self.0 >> 40) & 0xFF_FFFF) as u32;
        Color::unpack(kind, bits)
    }

    #[must_use]
    pub fn attrs(&self) -> Attributes {
        Attributes::unpack(((self.0 >> 8) & 0xFF) as u8)
    }

    #[must_use]
    pub fn with_fg(self, fg: Color) -> Self { Style::new(fg, self.bg(), self.attrs()) }

    #[must_use]
    pub fn with_bg(self, bg: Color) -> Self { Style::new(self.fg(), bg, self.attrs()) }

    #[must_use]
    pub fn with_attrs(self, attrs: Attributes) -> Self { Style::new(self.fg(), self.bg(), attrs) }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn bits(&self) -> u64 { self.0 }
}
