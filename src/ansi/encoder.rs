// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! Encodes a [`ControlSequence`] to its canonical byte string in either the 7-bit or
//! 8-bit dialect (§4.1). A given output session picks one [`Encoding`] and sticks with
//! it; the encoder itself is stateless.

use super::constants::{
    CSI_7BIT, CSI_8BIT, CSI_PARAM_SEPARATOR, DECFRA_PRINTABLE_EXT_HIGH, DECFRA_PRINTABLE_EXT_LOW,
    DECFRA_PRINTABLE_HIGH, DECFRA_PRINTABLE_LOW, OSC_7BIT, OSC_8BIT,
};
use super::control_sequence::{ControlSequence, DeviceAttributesKind, DeviceAttributesPayload};
use crate::error::fatal_bug;
use std::fmt::Write as _;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Encoding {
    SevenBit,
    EightBit,
}

impl Encoding {
    fn csi(self) -> &'static str {
        match self {
            Encoding::SevenBit => CSI_7BIT,
            Encoding::EightBit => CSI_8BIT,
        }
    }

    fn osc(self) -> &'static str {
        match self {
            Encoding::SevenBit => OSC_7BIT,
            Encoding::EightBit => OSC_8BIT,
        }
    }
}

/// Appends `n` to `out` unless it equals `default`, in which case the field is
/// elided (§4.1: "numeric parameters equal to their default... are elided").
fn push_param(out: &mut String, n: u16, default: u16) {
    if n != default {
        let _ = write!(out, "{n}");
    }
}

fn push_joined(out: &mut String, params: &[u16]) {
    for (i, p) in params.iter().enumerate() {
        if i > 0 { out.push(CSI_PARAM_SEPARATOR); }
        let _ = write!(out, "{p}");
    }
}

/// Encodes `seq` in the given `encoding`. Panics (via [`fatal_bug!`]) if `seq` is
/// response-shaped, or is a `FillRectangularArea`/`EraseRectangularArea` whose
/// character falls outside the printable set — both are programming errors (§7), not
/// runtime conditions.
#[must_use]
pub fn encode(seq: &ControlSequence, encoding: Encoding) -> String {
    if seq.is_response_shaped() {
        fatal_bug!("attempted to encode a response-shaped control sequence as output: {:?}", seq);
    }

    let csi = encoding.csi();
    let mut out = String::new();

    match seq {
        ControlSequence::CursorPosition { row, col } => {
            out.push_str(csi);
            // Column-only motions (row at default 1) encode as a leading empty field:
            // `;<col>H` (§4.1).
            push_param(&mut out, *row, 1);
            out.push(CSI_PARAM_SEPARATOR);
            push_param(&mut out, *col, 1);
            out.push('H');
        }
        ControlSequence::CursorUp(n) => { out.push_str(csi); push_param(&mut out, *n, 1); out.push('A'); }
        ControlSequence::CursorDown(n) => { out.push_str(csi); push_param(&mut out, *n, 1); out.push('B'); }
        ControlSequence::CursorForward(n) => { out.push_str(csi); push_param(&mut out, *n, 1); out.push('C'); }
        ControlSequence::CursorBack(n) => { out.push_str(csi); push_param(&mut out, *n, 1); out.push('D'); }
        ControlSequence::CursorNextLine(n) => { out.push_str(csi); push_param(&mut out, *n, 1); out.push('E'); }
        ControlSequence::CursorPreviousLine(n) => { out.push_str(csi); push_param(&mut out, *n, 1); out.push('F'); }
        ControlSequence::CursorHorizontalAbsolute(n) => { out.push_str(csi); push_param(&mut out, *n, 1); out.push('G'); }

        ControlSequence::EraseDisplay(mode) => { out.push_str(csi); push_param(&mut out, mode.code(), 0); out.push('J'); }
        ControlSequence::EraseLine(mode) => { out.push_str(csi); push_param(&mut out, mode.code(), 0); out.push('K'); }
        ControlSequence::EraseCharacter(n) => { out.push_str(csi); push_param(&mut out, *n, 1); out.push('X'); }

        ControlSequence::EraseRectangularArea(area) => {
            out.push_str(csi);
            push_joined(&mut out, &[area.top.0, area.left.0, area.bottom.0, area.right.0]);
            out.push_str("$z");
        }
        ControlSequence::FillRectangularArea { character, area } => {
            let cp = u32::from(*character);
            let printable = (DECFRA_PRINTABLE_LOW..=DECFRA_PRINTABLE_HIGH).contains(&cp)
                || (DECFRA_PRINTABLE_EXT_LOW..=DECFRA_PRINTABLE_EXT_HIGH).contains(&cp);
            if !printable {
                fatal_bug!("FillRectangularArea character {:?} is outside the printable set", character);
            }
            out.push_str(csi);
            push_joined(&mut out, &[cp as u16, area.top.0, area.left.0, area.bottom.0, area.right.0]);
            out.push_str("$x");
        }

        ControlSequence::ScrollUp(n) => { out.push_str(csi); push_param(&mut out, *n, 1); out.push('S'); }
        ControlSequence::ScrollDown(n) => { out.push_str(csi); push_param(&mut out, *n, 1); out.push('T'); }

        ControlSequence::SelectGraphicRendition(renditions) => {
            out.push_str(csi);
            let codes: Vec<u16> = renditions.iter().flat_map(|r| r.codes()).collect();
            push_joined(&mut out, &codes);
            out.push('m');
        }
        ControlSequence::SetMode(mode) => {
            out.push_str(csi);
            out.push('?');
            let _ = write!(out, "{}", mode.number());
            out.push('h');
        }
        ControlSequence::ResetMode(mode) => {
            out.push_str(csi);
            out.push('?');
            let _ = write!(out, "{}", mode.number());
            out.push('l');
        }
        ControlSequence::Repeat(n) => { out.push_str(csi); push_param(&mut out, *n, 1); out.push('b'); }

        ControlSequence::DeviceAttributes(DeviceAttributesPayload::Request(kind)) => {
            out.push_str(csi);
            match kind {
                DeviceAttributesKind::Primary => {}
                DeviceAttributesKind::Secondary => out.push('>'),
                DeviceAttributesKind::Tertiary => out.push('='),
            }
            out.push('c');
        }
        ControlSequence::DeviceAttributes(DeviceAttributesPayload::Response { .. }) => unreachable!("rejected above"),
        ControlSequence::CurrentPositionReport { .. } => unreachable!("rejected above"),
    }

    // OSC variants are not modeled in `ControlSequence` yet (no [MODULE] operation
    // requires one); `encoding.osc()` is kept for future OSC-introduced sequences and
    // exercised directly by `osc_introducer` below.
    let _ = encoding.osc();

    out
}

/// The raw OSC introducer bytes for `encoding`, exposed for callers that need to emit
/// an out-of-band OSC payload (e.g. window title) the control-sequence model itself
/// does not enumerate.
#[must_use]
pub fn osc_introducer(encoding: Encoding) -> &'static str { encoding.osc() }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::control_sequence::Mode;
    use crate::ansi::graphic_rendition::GraphicRendition;
    use crate::style::{AnsiIdentifier, Color, Intensity};
    use smallvec::smallvec;

    #[test]
    fn cursor_position_elides_default_row() {
        let seq = ControlSequence::CursorPosition { row: 1, col: 5 };
        assert_eq!(encode(&seq, Encoding::SevenBit), "\x1b[;5H");
    }

    #[test]
    fn cursor_up_elides_default_count() {
        assert_eq!(encode(&ControlSequence::CursorUp(1), Encoding::SevenBit), "\x1b[A");
        assert_eq!(encode(&ControlSequence::CursorUp(5), Encoding::SevenBit), "\x1b[5A");
    }

    #[test]
    fn eight_bit_encoding_uses_single_byte_introducer() {
        assert_eq!(encode(&ControlSequence::CursorUp(1), Encoding::EightBit), "\u{9b}A");
    }

    #[test]
    fn sgr_concatenates_rendition_codes() {
        let seq = ControlSequence::SelectGraphicRendition(smallvec![
            GraphicRendition::Foreground(Color::Ansi(AnsiIdentifier::Red, Intensity::Normal)),
            GraphicRendition::Bold,
        ]);
        assert_eq!(encode(&seq, Encoding::SevenBit), "\x1b[31;1m");
    }

    #[test]
    fn extended_rgb_color_uses_38_2_form() {
        let seq = ControlSequence::SelectGraphicRendition(smallvec![GraphicRendition::Foreground(Color::Rgb(10, 20, 30))]);
        assert_eq!(encode(&seq, Encoding::SevenBit), "\x1b[38;2;10;20;30m");
    }

    #[test]
    fn set_mode_encodes_dec_private_sequence() {
        assert_eq!(encode(&ControlSequence::SetMode(Mode::SynchronizedUpdate), Encoding::SevenBit), "\x1b[?2026h");
        assert_eq!(encode(&ControlSequence::ResetMode(Mode::SynchronizedUpdate), Encoding::SevenBit), "\x1b[?2026l");
    }

    #[test]
    #[should_panic(expected = "programming error")]
    fn encoding_a_response_shaped_sequence_is_fatal() {
        let _ = encode(&ControlSequence::CurrentPositionReport { row: 1, col: 1 }, Encoding::SevenBit);
    }

    #[test]
    #[should_panic(expected = "programming error")]
    fn fill_rectangular_area_with_non_printable_char_is_fatal() {
        use crate::core::{col, row};
        use crate::buffer::Rect;
        let area = Rect::new(row(1), col(1), row(1), col(1));
        let _ = encode(&ControlSequence::FillRectangularArea { character: '\u{07}', area }, Encoding::SevenBit);
    }
}
