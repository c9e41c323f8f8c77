// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! Packed graphic-rendition state: [`Color`], [`Attributes`], and the [`Style`] that
//! combines them into a single comparable `u64`.

pub mod attrs;
pub mod color;
#[allow(clippy::module_inception)]
pub mod style;

pub use attrs::Attributes;
pub use color::{AnsiIdentifier, Color, Intensity};
pub use style::Style;
