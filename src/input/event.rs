// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! [`Event`]: the unified output of the input parser (§3, §4.8) — keyboard, mouse,
//! resize, and device-attribute-response events, translated from the VT input grammar.

use crate::ansi::{DeviceAttributesKind, DeviceAttributesPayload};
use crate::core::{Position, Size};
use smallvec::SmallVec;

/// Keyboard modifier bits. The source parser this crate is modeled on never decodes
/// these from the wire (§9's modifier-reporting open question); `ansistage` decodes
/// them from CSI-u and xterm modifier-parameterised forms (SPEC_FULL §4.8).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub super_key: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false, super_key: false };

    #[must_use]
    pub fn any(&self) -> bool { self.shift || self.ctrl || self.alt || self.super_key }

    /// Decodes an xterm/CSI-u modifier parameter: `1` is "no modifiers", and the
    /// remaining value is a bitmask of shift(1)/alt(2)/ctrl(4)/super(8) plus one.
    #[must_use]
    pub(crate) fn from_xterm_param(param: u16) -> Modifiers {
        if param == 0 { return Modifiers::NONE; }
        let bits = param.saturating_sub(1);
        Modifiers {
            shift: bits & 0b0001 != 0,
            alt: bits & 0b0010 != 0,
            ctrl: bits & 0b0100 != 0,
            super_key: bits & 0b1000 != 0,
        }
    }
}

/// Keyboard press/release state. The grammar in §4.8 only ever produces `Press`
/// events; `Release` exists so the type is ready for a backend that can observe key-up
/// (e.g. the kitty keyboard protocol's release reporting), matching the `press|release`
/// alternative in §3's `Event` definition.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum KeyState {
    Press,
    Release,
}

/// A keyboard key code (§3, §4.8's translation table). Modeled as a closed sum type
/// rather than the source's raw integer keycode space (Design Notes: "sum types over
/// inheritance").
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum KeyCode {
    Char(char),
    Function(u8),
    Escape,
    Enter,
    Backspace,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    /// A recognized-but-unmapped sequence; never produced by the dispatch table in
    /// §4.8, reserved for forward compatibility.
    Unknown,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MouseAction {
    Pressed,
    Released,
    Move,
    ScrollUp,
    ScrollDown,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct MouseEvent {
    pub point: Position,
    pub action: MouseAction,
    pub modifiers: Modifiers,
}

/// The terminal's response to a Device Attributes query (§4.1, §6's "Capability
/// query"). `Specific` is the VT100-style `CSI <type>;<service> c` reply; `Compatible`
/// is the VT220+ `CSI <family>;f1;f2;... c` reply.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum DeviceAttributes {
    Specific { device_type: u16, service: u16 },
    Compatible { family: u16, features: SmallVec<[u16; 8]> },
}

impl DeviceAttributes {
    /// The timeout fallback (§6, §7): "Times out to 'unknown' (= `specific(vt101,
    /// base)`)".
    pub const VT101_BASE_TYPE: u16 = 1;
    pub const BASE_SERVICE: u16 = 0;

    #[must_use]
    pub fn unknown() -> Self {
        DeviceAttributes::Specific { device_type: Self::VT101_BASE_TYPE, service: Self::BASE_SERVICE }
    }

    pub(crate) fn from_payload(kind: DeviceAttributesKind, params: &[u16]) -> Self {
        match kind {
            DeviceAttributesKind::Primary => DeviceAttributes::Specific {
                device_type: params.first().copied().unwrap_or(Self::VT101_BASE_TYPE),
                service: params.get(1).copied().unwrap_or(Self::BASE_SERVICE),
            },
            DeviceAttributesKind::Secondary | DeviceAttributesKind::Tertiary => DeviceAttributes::Compatible {
                family: params.first().copied().unwrap_or(0),
                features: params.get(1..).unwrap_or(&[]).iter().copied().collect(),
            },
        }
    }
}

/// One decoded terminal input event (§3).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Event {
    Key { char: Option<char>, keycode: KeyCode, modifiers: Modifiers, state: KeyState },
    Mouse(MouseEvent),
    Resize { size: Size },
    Response(DeviceAttributes),
}

impl Event {
    #[must_use]
    pub(crate) fn key(keycode: KeyCode, modifiers: Modifiers) -> Event {
        let char = if let KeyCode::Char(c) = keycode { Some(c) } else { None };
        Event::Key { char, keycode, modifiers, state: KeyState::Press }
    }

    pub(crate) fn response(payload: &DeviceAttributesPayload) -> Option<Event> {
        match payload {
            DeviceAttributesPayload::Response { kind, params } => {
                Some(Event::Response(DeviceAttributes::from_payload(*kind, params)))
            }
            DeviceAttributesPayload::Request(_) => None,
        }
    }
}
