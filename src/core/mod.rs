// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! Geometry primitives and the display-width seam. Leaf module: nothing else in the
//! crate's dependency order (see crate root docs) depends on anything but this.

pub mod char_width;
pub mod units;

pub use char_width::{CharWidth, UnicodeWidth};
pub use units::{col, row, ColIndex, Position, RowIndex, Size};
