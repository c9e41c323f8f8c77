// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! The SGR state tracker (§4.4): computes the minimum rendition list to move the
//! terminal from its last-known style to a target style.

use crate::ansi::GraphicRendition;
use crate::style::{Attributes, Color, Style};
use smallvec::SmallVec;

/// Attributes with no individual "off" code in the dialect [`crate::ansi::encoder`]
/// emits. Every attribute this crate models (bold, italic, underline, blink,
/// strikethrough) has one (22/23/24/25/29 respectively), so this set is empty for the
/// shipped encoder; the tracker still implements the general rule so the irreversible
/// branch activates correctly if a future attribute lacks an off code.
const IRREVERSIBLE: Attributes = Attributes {
    bold: false,
    italic: false,
    underline: false,
    blink: false,
    strikethrough: false,
};

fn attrs_intersect(a: Attributes, b: Attributes) -> bool {
    (a.bold && b.bold)
        || (a.italic && b.italic)
        || (a.underline && b.underline)
        || (a.blink && b.blink)
        || (a.strikethrough && b.strikethrough)
}

/// Tracks the terminal's current graphic-rendition state for one output sink. Created
/// fresh per buffered output (§4.4: "non-copyable by contract... created when a
/// buffered output begins and dropped when it ends").
#[derive(Debug)]
pub struct SgrStateTracker {
    current: Style,
}

impl SgrStateTracker {
    #[must_use]
    pub fn new() -> Self { Self { current: Style::default_style() } }

    #[must_use]
    pub fn current(&self) -> Style { self.current }

    /// Computes the rendition list moving the terminal from `self.current` to
    /// `target`, then updates `self.current` to `target`. Returns `[]` if they are
    /// already equal (including on a second call with the same `target` — the
    /// idempotency property in §8).
    pub fn transition(&mut self, target: Style) -> SmallVec<[GraphicRendition; 4]> {
        if self.current == target { return SmallVec::new(); }

        let cur_attrs = self.current.attrs();
        let tgt_attrs = target.attrs();
        let removed = cur_attrs.removed_since(tgt_attrs);

        let mut out = SmallVec::new();
        let mut effective_attrs = cur_attrs;
        let mut effective_fg = self.current.fg();
        let mut effective_bg = self.current.bg();

        if attrs_intersect(removed, IRREVERSIBLE) {
            out.push(GraphicRendition::Reset);
            effective_attrs = Attributes::default();
            effective_fg = Color::None;
            effective_bg = Color::None;
        }

        if effective_fg != target.fg() {
            out.push(GraphicRendition::Foreground(target.fg()));
        }
        if effective_bg != target.bg() {
            out.push(GraphicRendition::Background(target.bg()));
        }

        let toggled = effective_attrs.toggled(tgt_attrs);
        if toggled.bold {
            out.push(if tgt_attrs.bold { GraphicRendition::Bold } else { GraphicRendition::Normal });
        }
        if toggled.italic {
            out.push(if tgt_attrs.italic { GraphicRendition::Italic } else { GraphicRendition::ItalicOff });
        }
        if toggled.underline {
            out.push(if tgt_attrs.underline { GraphicRendition::Underline } else { GraphicRendition::UnderlineOff });
        }
        if toggled.strikethrough {
            out.push(if tgt_attrs.strikethrough { GraphicRendition::Strikethrough } else { GraphicRendition::StrikethroughOff });
        }
        if toggled.blink {
            out.push(if tgt_attrs.blink { GraphicRendition::Blink } else { GraphicRendition::BlinkOff });
        }

        self.current = target;
        out
    }
}

impl Default for SgrStateTracker {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::AnsiIdentifier::Red;
    use crate::style::Intensity::Normal;

    #[test]
    fn repeated_transition_to_the_same_style_returns_empty_the_second_time() {
        let mut tracker = SgrStateTracker::new();
        let target = Style::new(Color::Ansi(Red, Normal), Color::None, Attributes { bold: true, ..Attributes::default() });
        let first = tracker.transition(target);
        assert!(!first.is_empty());
        let second = tracker.transition(target);
        assert!(second.is_empty());
    }

    #[test]
    fn sgr_minimality_scenario_from_spec() {
        // Scenario 3, §8: default -> {fg=red, bold} -> {fg=red, bold, italic}.
        let mut tracker = SgrStateTracker::new();
        let red_bold = Style::new(Color::Ansi(Red, Normal), Color::None, Attributes { bold: true, ..Attributes::default() });
        let first = tracker.transition(red_bold);
        assert_eq!(
            &first[..],
            &[GraphicRendition::Foreground(Color::Ansi(Red, Normal)), GraphicRendition::Bold]
        );

        let red_bold_italic = Style::new(
            Color::Ansi(Red, Normal),
            Color::None,
            Attributes { bold: true, italic: true, ..Attributes::default() },
        );
        let second = tracker.transition(red_bold_italic);
        assert_eq!(&second[..], &[GraphicRendition::Italic]);
    }

    #[test]
    fn transition_to_default_emits_off_codes_not_reset_given_reversible_attrs() {
        let mut tracker = SgrStateTracker::new();
        let bold = Style::new(Color::None, Color::None, Attributes { bold: true, ..Attributes::default() });
        tracker.transition(bold);
        let back_to_default = tracker.transition(Style::default_style());
        assert_eq!(&back_to_default[..], &[GraphicRendition::Normal]);
    }
}
