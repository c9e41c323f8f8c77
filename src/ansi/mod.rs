// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! The ANSI/VT control-sequence model and its encoder (§4.1): [`ControlSequence`] is
//! the closed output alphabet the renderer, motion optimiser, and SGR tracker all
//! target; [`encode`] is its only consumer-facing encoder.

pub mod constants;
pub mod control_sequence;
pub mod encoder;
pub mod graphic_rendition;

pub use control_sequence::{
    ControlSequence, DeviceAttributesKind, DeviceAttributesPayload, EraseMode, Mode,
};
pub use encoder::{encode, osc_introducer, Encoding};
pub use graphic_rendition::GraphicRendition;
