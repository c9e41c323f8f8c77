// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! The push-driven input state machine (§4.8): incrementally decodes terminal byte
//! streams into [`Event`]s, tolerating partial and malformed input.
//!
//! [`Parser::feed`] is restartable across arbitrarily small chunks — unconsumed bytes
//! live in [`State`] between calls, not in a side buffer the caller has to manage. The
//! one exception is a lone trailing `ESC`: per §8 scenario 5, `Escape` must persist
//! across a `feed` boundary (a later chunk may still complete an arrow-key sequence),
//! so only [`Parser::finish`] — called once the input stream has genuinely closed —
//! resolves a still-pending `Escape` into a standalone key event.

use super::event::{Event, KeyCode, Modifiers};
use crate::ansi::{DeviceAttributesKind, DeviceAttributesPayload};
use smallvec::SmallVec;

const MAX_CSI_PARAMS: usize = 16;

#[derive(Debug)]
enum State {
    Normal,
    Escape,
    Utf8 { buf: SmallVec<[u8; 4]>, need: u8 },
    Csi { params: SmallVec<[u16; MAX_CSI_PARAMS]>, current: Option<u16>, intermediates: SmallVec<[u8; 4]> },
    Ss3,
    Osc { esc_pending: bool },
    Dcs { esc_pending: bool },
}

/// A restartable VT input state machine (§4.8). One `Parser` owns the partial state of
/// one input byte stream; it has no knowledge of the device it reads from.
#[derive(Debug)]
pub struct Parser {
    state: State,
}

impl Default for Parser {
    fn default() -> Self { Self::new() }
}

impl Parser {
    #[must_use]
    pub fn new() -> Self { Self { state: State::Normal } }

    /// Feeds `bytes` through the state machine and returns the events they produced,
    /// in order. May be called with chunks of any size, including empty or single-byte
    /// slices; a sequence split across any byte boundary yields the same events as the
    /// whole sequence fed at once (§8).
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Event> {
        let mut out = Vec::new();
        for &b in bytes {
            self.step(b, &mut out);
        }
        out
    }

    /// Resolves a pending standalone `Escape` once the input stream has closed. Any
    /// other pending partial sequence (an incomplete CSI/OSC/DCS/UTF-8 run) is simply
    /// dropped, since there are no more bytes to ever complete it.
    pub fn finish(&mut self) -> Vec<Event> {
        let mut out = Vec::new();
        if matches!(self.state, State::Escape) {
            out.push(Event::key(KeyCode::Escape, Modifiers::NONE));
        }
        self.state = State::Normal;
        out
    }

    fn step(&mut self, b: u8, out: &mut Vec<Event>) {
        tracing::trace!(byte = format_args!("{b:#04x}"), state = ?self.state, "input byte");
        match &self.state {
            State::Normal => self.step_normal(b, out),
            State::Escape => self.step_escape(b, out),
            State::Utf8 { .. } => self.step_utf8(b, out),
            State::Csi { .. } => self.step_csi(b, out),
            State::Ss3 => self.step_ss3(b, out),
            State::Osc { .. } => self.step_osc(b, out),
            State::Dcs { .. } => self.step_dcs(b, out),
        }
    }

    fn step_normal(&mut self, b: u8, out: &mut Vec<Event>) {
        match b {
            0x1B => self.state = State::Escape,
            0x00..=0x7F => out.push(Event::key(KeyCode::from_control_ascii(b), Modifiers::control_for(b))),
            0xC2..=0xDF => self.state = State::Utf8 { buf: smallvec::smallvec![b], need: 1 },
            0xE0..=0xEF => self.state = State::Utf8 { buf: smallvec::smallvec![b], need: 2 },
            0xF0..=0xF4 => self.state = State::Utf8 { buf: smallvec::smallvec![b], need: 3 },
            // Continuation bytes or invalid lead bytes arriving in Normal state: not a
            // valid sequence start. Drop and stay in Normal (§4.8 error recovery).
            _ => {}
        }
    }

    fn step_escape(&mut self, b: u8, out: &mut Vec<Event>) {
        self.state = State::Normal;
        match b {
            b'O' => self.state = State::Ss3,
            b'[' => self.state = State::Csi { params: SmallVec::new(), current: None, intermediates: SmallVec::new() },
            b']' => self.state = State::Osc { esc_pending: false },
            b'P' => self.state = State::Dcs { esc_pending: false },
            _ => { let _ = out; } // anything else: drop and return to Normal.
        }
    }

    fn step_utf8(&mut self, b: u8, out: &mut Vec<Event>) {
        let State::Utf8 { buf, need } = &mut self.state else { unreachable!() };
        if !(0x80..=0xBF).contains(&b) {
            // Premature non-continuation byte: malformed, drop and return to Normal.
            self.state = State::Normal;
            return;
        }
        buf.push(b);
        *need -= 1;
        if *need == 0 {
            if let Some(c) = std::str::from_utf8(buf).ok().and_then(|s| s.chars().next()) {
                out.push(Event::key(KeyCode::Char(c), Modifiers::NONE));
            }
            self.state = State::Normal;
        }
    }

    fn step_csi(&mut self, b: u8, out: &mut Vec<Event>) {
        let State::Csi { params, current, intermediates } = &mut self.state else { unreachable!() };
        match b {
            b'0'..=b'9' => {
                let digit = u16::from(b - b'0');
                *current = Some(current.unwrap_or(0).saturating_mul(10).saturating_add(digit));
            }
            b';' => {
                if params.len() < MAX_CSI_PARAMS {
                    params.push(current.take().unwrap_or(0));
                } else {
                    *current = None;
                }
            }
            0x20..=0x2F | 0x3C..=0x3F => {
                intermediates.push(b);
            }
            0x40..=0x7E => {
                if current.is_some() && params.len() < MAX_CSI_PARAMS {
                    params.push(current.take().unwrap_or(0));
                }
                let params = std::mem::take(params);
                let intermediates = std::mem::take(intermediates);
                self.state = State::Normal;
                dispatch_csi(b, &params, &intermediates, out);
            }
            _ => {
                // Unrecognized byte mid-sequence: drop, return to Normal.
                self.state = State::Normal;
            }
        }
    }

    fn step_ss3(&mut self, b: u8, out: &mut Vec<Event>) {
        self.state = State::Normal;
        match b {
            b'A' => out.push(Event::key(KeyCode::Up, Modifiers::NONE)),
            b'B' => out.push(Event::key(KeyCode::Down, Modifiers::NONE)),
            b'C' => out.push(Event::key(KeyCode::Right, Modifiers::NONE)),
            b'D' => out.push(Event::key(KeyCode::Left, Modifiers::NONE)),
            b'P' => out.push(Event::key(KeyCode::Function(1), Modifiers::NONE)),
            b'Q' => out.push(Event::key(KeyCode::Function(2), Modifiers::NONE)),
            b'R' => out.push(Event::key(KeyCode::Function(3), Modifiers::NONE)),
            b'S' => out.push(Event::key(KeyCode::Function(4), Modifiers::NONE)),
            _ => {} // unknown: not emitted.
        }
    }

    fn step_osc(&mut self, b: u8, _out: &mut Vec<Event>) {
        let State::Osc { esc_pending } = &mut self.state else { unreachable!() };
        if *esc_pending {
            // Whatever follows ESC terminates the OSC string (§4.8: "until ... ESC
            // \\"); unknown sequences are never emitted (§4.8 translation table).
            self.state = State::Normal;
            return;
        }
        match b {
            0x07 => self.state = State::Normal,
            0x1B => *esc_pending = true,
            _ => {}
        }
    }

    fn step_dcs(&mut self, b: u8, _out: &mut Vec<Event>) {
        let State::Dcs { esc_pending } = &mut self.state else { unreachable!() };
        if *esc_pending {
            self.state = State::Normal;
            return;
        }
        if b == 0x1B {
            *esc_pending = true;
        }
    }
}

/// Maps a navigation/function-key code from a `CSI <n>~` sequence (standard xterm
/// extended-key numbering), per SPEC_FULL §4.8's xterm modifier-forms resolution.
fn tilde_keycode(n: u16) -> Option<KeyCode> {
    Some(match n {
        1 | 7 => KeyCode::Home,
        2 => KeyCode::Insert,
        3 => KeyCode::Delete,
        4 | 8 => KeyCode::End,
        5 => KeyCode::PageUp,
        6 => KeyCode::PageDown,
        11 => KeyCode::Function(1),
        12 => KeyCode::Function(2),
        13 => KeyCode::Function(3),
        14 => KeyCode::Function(4),
        15 => KeyCode::Function(5),
        17 => KeyCode::Function(6),
        18 => KeyCode::Function(7),
        19 => KeyCode::Function(8),
        20 => KeyCode::Function(9),
        21 => KeyCode::Function(10),
        23 => KeyCode::Function(11),
        24 => KeyCode::Function(12),
        _ => return None,
    })
}

fn dispatch_csi(final_byte: u8, params: &[u16], intermediates: &[u8], out: &mut Vec<Event>) {
    // CSI 1;<mods><final> is the xterm modifier-parameterised form for cursor/nav
    // keys (SPEC_FULL §4.8); bare `CSI <final>` (no params) is the unmodified form
    // the base dispatch table (§4.8) already covers.
    let xterm_mods = if params.len() >= 2 { Modifiers::from_xterm_param(params[1]) } else { Modifiers::NONE };

    match final_byte {
        b'A' => out.push(Event::key(KeyCode::Up, xterm_mods)),
        b'B' => out.push(Event::key(KeyCode::Down, xterm_mods)),
        b'C' => out.push(Event::key(KeyCode::Right, xterm_mods)),
        b'D' => out.push(Event::key(KeyCode::Left, xterm_mods)),
        b'H' => out.push(Event::key(KeyCode::Home, xterm_mods)),
        b'F' => out.push(Event::key(KeyCode::End, xterm_mods)),
        b'P' | b'Q' | b'R' | b'S' if params.is_empty() && intermediates.is_empty() => {
            // Bare CSI P/Q/R/S: F1-F4 without modifiers (SPEC_FULL §4.8).
            let n = final_byte - b'P' + 1;
            out.push(Event::key(KeyCode::Function(n), Modifiers::NONE));
        }
        b'~' => {
            if let Some(code) = params.first().copied().and_then(tilde_keycode) {
                out.push(Event::key(code, xterm_mods));
            }
        }
        b'u' => {
            // CSI-u (fixterms/kitty keyboard protocol): params[0] is the Unicode
            // codepoint, params[1] the xterm-style modifier field.
            if let Some(c) = params.first().copied().and_then(|cp| char::from_u32(u32::from(cp))) {
                out.push(Event::key(KeyCode::Char(c), xterm_mods));
            }
        }
        b'c' => {
            let kind = if intermediates.contains(&b'?') {
                Some(DeviceAttributesKind::Primary)
            } else if intermediates.contains(&b'>') {
                Some(DeviceAttributesKind::Secondary)
            } else if intermediates.contains(&b'=') {
                Some(DeviceAttributesKind::Tertiary)
            } else {
                None
            };
            if let Some(kind) = kind {
                let payload = DeviceAttributesPayload::Response { kind, params: params.iter().copied().collect() };
                if let Some(event) = Event::response(&payload) {
                    out.push(event);
                }
            }
        }
        _ => {} // unknown: not emitted.
    }
}

impl KeyCode {
    /// Translates a raw ASCII byte from `Normal` state (§4.8's `character(c)` ->
    /// `Key{char: c, keycode: 0, ...}`), special-casing the C0 control range so
    /// Ctrl+letter arrives as `Char(letter)` with `ctrl` set rather than an opaque
    /// control byte, and the handful of control codes with a dedicated key identity.
    fn from_control_ascii(b: u8) -> KeyCode {
        match b {
            0x1B => KeyCode::Escape,
            0x09 => KeyCode::Tab,
            0x0D => KeyCode::Enter,
            0x7F | 0x08 => KeyCode::Backspace,
            0x01..=0x1A => KeyCode::Char((b - 0x01 + b'a') as char),
            _ => KeyCode::Char(b as char),
        }
    }
}

impl Modifiers {
    fn control_for(b: u8) -> Modifiers {
        if matches!(b, 0x01..=0x1A) { Modifiers { ctrl: true, ..Modifiers::NONE } } else { Modifiers::NONE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::event::{DeviceAttributes as DA, KeyState};

    #[test]
    fn ascii_character_produces_char_event() {
        let mut p = Parser::new();
        let events = p.feed(b"A");
        assert_eq!(events, vec![Event::key(KeyCode::Char('A'), Modifiers::NONE)]);
    }

    #[test]
    fn partial_input_across_two_feeds_completes_an_arrow_key() {
        // §8 scenario 5: [0x1B] then [0x5B, 0x41] -> no events, then one cursor-up.
        let mut p = Parser::new();
        assert!(p.feed(&[0x1B]).is_empty());
        let events = p.feed(&[0x5B, 0x41]);
        assert_eq!(events, vec![Event::key(KeyCode::Up, Modifiers::NONE)]);
    }

    #[test]
    fn splitting_a_sequence_at_any_boundary_yields_the_same_events() {
        let whole = b"\x1b[A";
        let mut baseline = Parser::new();
        let expected = baseline.feed(whole);

        for split in 0..=whole.len() {
            let mut p = Parser::new();
            let mut events = p.feed(&whole[..split]);
            events.extend(p.feed(&whole[split..]));
            assert_eq!(events, expected, "split at {split}");
        }
    }

    #[test]
    fn concatenating_two_sequences_concatenates_their_events() {
        let mut p = Parser::new();
        let mut combined = p.feed(b"\x1b[A");
        combined.extend(p.feed(b"\x1b[B"));

        let mut reference = Parser::new();
        let expected = reference.feed(b"\x1b[A\x1b[B");
        assert_eq!(combined, expected);
    }

    #[test]
    fn lone_trailing_escape_resolves_only_on_finish() {
        let mut p = Parser::new();
        assert!(p.feed(&[0x1B]).is_empty());
        let events = p.finish();
        assert_eq!(events, vec![Event::key(KeyCode::Escape, Modifiers::NONE)]);
    }

    #[test]
    fn device_attributes_primary_response_round_trips() {
        let mut p = Parser::new();
        let events = p.feed(b"\x1b[?1;2c");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], Event::Response(DA::Specific { device_type: 1, service: 2 }));
    }

    #[test]
    fn device_attributes_secondary_response_preserves_feature_list() {
        let mut p = Parser::new();
        let events = p.feed(b"\x1b[>1;10;0c");
        assert_eq!(events[0], Event::Response(DA::Compatible { family: 1, features: smallvec::smallvec![10, 0] }));
    }

    #[test]
    fn malformed_csi_consumes_one_byte_and_recovers() {
        let mut p = Parser::new();
        // ESC [ followed by a byte outside every CSI byte class: treated as invalid
        // and dropped; the parser must still make forward progress on the next byte.
        let mut events = p.feed(&[0x1B, b'[', 0x01]);
        events.extend(p.feed(b"x"));
        assert_eq!(events, vec![Event::key(KeyCode::Char('x'), Modifiers::NONE)]);
    }

    #[test]
    fn utf8_multibyte_character_decodes_across_continuation_bytes() {
        let mut p = Parser::new();
        // 'é' = U+00E9 = 0xC3 0xA9 in UTF-8.
        let events = p.feed(&[0xC3, 0xA9]);
        assert_eq!(events, vec![Event::key(KeyCode::Char('é'), Modifiers::NONE)]);
    }

    #[test]
    fn xterm_modifier_form_decodes_shift_on_arrow_key() {
        let mut p = Parser::new();
        // CSI 1;2A: shift+Up (xterm modifier field 2 = shift).
        let events = p.feed(b"\x1b[1;2A");
        assert_eq!(events, vec![Event::key(KeyCode::Up, Modifiers { shift: true, ..Modifiers::NONE })]);
    }

    #[test]
    fn tilde_form_decodes_function_and_navigation_keys() {
        let mut p = Parser::new();
        assert_eq!(p.feed(b"\x1b[3~"), vec![Event::key(KeyCode::Delete, Modifiers::NONE)]);
        assert_eq!(p.feed(b"\x1b[15~"), vec![Event::key(KeyCode::Function(5), Modifiers::NONE)]);
    }

    #[test]
    fn bare_csi_p_dispatches_to_f1_without_modifiers() {
        let mut p = Parser::new();
        assert_eq!(p.feed(b"\x1b[P"), vec![Event::key(KeyCode::Function(1), Modifiers::NONE)]);
    }

    #[test]
    fn osc_sequence_is_consumed_silently() {
        let mut p = Parser::new();
        let events = p.feed(b"\x1b]0;title\x07A");
        assert_eq!(events, vec![Event::key(KeyCode::Char('A'), Modifiers::NONE)]);
    }

    #[test]
    fn csi_u_decodes_unicode_codepoint_with_modifiers() {
        let mut p = Parser::new();
        let events = p.feed(b"\x1b[97;5u"); // 'a' with ctrl (mods field 5 = ctrl+1).
        assert_eq!(events, vec![Event::key(KeyCode::Char('a'), Modifiers { ctrl: true, ..Modifiers::NONE })]);
    }

    #[test]
    fn all_events_are_key_press_state() {
        let mut p = Parser::new();
        let events = p.feed(b"q");
        assert!(matches!(events[0], Event::Key { state: KeyState::Press, .. }));
    }
}
