// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! [`Buffer`]: a densely-packed, uniquely-owned grid of [`Cell`]s (§3).

use super::cell::Cell;
use crate::core::{col, row, CharWidth, ColIndex, Position, RowIndex, Size};
use crate::style::Style;

/// An inclusive rectangular region, 1-based, used by [`Buffer::fill`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Rect {
    pub top: RowIndex,
    pub left: ColIndex,
    pub bottom: RowIndex,
    pub right: ColIndex,
}

impl Rect {
    #[must_use]
    pub fn new(top: RowIndex, left: ColIndex, bottom: RowIndex, right: ColIndex) -> Self {
        Self { top, left, bottom, right }
    }

    /// Clips `self` to `[1, size.height] x [1, size.width]`. May produce an empty
    /// (inverted) rect if `self` lies entirely outside `size`.
    #[must_use]
    fn clip(self, size: Size) -> Self {
        Self {
            top: row(self.top.0.max(1)),
            left: col(self.left.0.max(1)),
            bottom: row(self.bottom.0.min(size.height)),
            right: col(self.right.0.min(size.width)),
        }
    }

    fn is_empty(&self) -> bool { self.top.0 > self.bottom.0 || self.left.0 > self.right.0 }
}

/// A `Size` plus a row-major array of `width * height` cells. Created filled with
/// blanks; mutated only through [`Buffer::write`], [`Buffer::fill`], [`Buffer::clear`],
/// or [`Buffer::set`].
#[derive(Clone, Debug)]
pub struct Buffer {
    size: Size,
    cells: Vec<Cell>,
}

impl Buffer {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self { cells: vec![Cell::blank(); size.area()], size }
    }

    #[must_use]
    pub fn size(&self) -> Size { self.size }

    #[must_use]
    pub fn cells(&self) -> &[Cell] { &self.cells }

    /// Out-of-bounds read yields a blank cell.
    #[must_use]
    pub fn get(&self, pos: Position) -> Cell {
        if !pos.valid(self.size) { return Cell::blank(); }
        self.cells[pos.offset(self.size)]
    }

    /// Out-of-bounds write is a silent no-op.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if !pos.valid(self.size) { return; }
        let i = pos.offset(self.size);
        self.cells[i] = cell;
    }

    /// Resets every cell to blank.
    pub fn clear(&mut self) {
        for c in &mut self.cells { *c = Cell::blank(); }
    }

    /// Fills a rectangular region with `cell`, clipped to the buffer's bounds. An
    /// empty clipped rect writes nothing.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let clipped = rect.clip(self.size);
        if clipped.is_empty() { return; }
        for r in clipped.top.0..=clipped.bottom.0 {
            for c in clipped.left.0..=clipped.right.0 {
                self.set(Position::new(row(r), col(c)), cell);
            }
        }
    }

    /// Writes `text` starting at `pos` with `style`, honoring `\n` (advance one row),
    /// `\r` (column 1 of the same row), `\t` (next multiple-of-8 column, clamped to the
    /// last column), and wide-character leader/continuation placement. A width-0
    /// character is ignored. Returns the final cursor position.
    pub fn write(&mut self, text: &str, pos: Position, style: Style, width: &dyn CharWidth) -> Position {
        if !pos.valid(self.size) { return pos; }
        let mut cur = pos;
        for ch in text.chars() {
            match ch {
                '\n' => {
                    cur = Position::new(cur.row + 1, col(1));
                    continue;
                }
                '\r' => {
                    cur = Position::new(cur.row, col(1));
                    continue;
                }
                '\t' => {
                    let next_stop = ((cur.col.0 - 1) / 8 + 1) * 8 + 1;
                    cur = Position::new(cur.row, col(next_stop.min(self.size.width)));
                    continue;
                }
                _ => {}
            }

            let w = width.width(ch);
            if w == 0 { continue; }

            if w == 2 && cur.col.0 == self.size.width {
                // Leader would sit at the rightmost column: wrap to next row first.
                cur = Position::new(cur.row + 1, col(1));
            }

            self.set(cur, Cell::new(ch, style));
            if w == 2 {
                self.set(Position::new(cur.row, cur.col + 1), Cell::continuation(style));
                cur = Position::new(cur.row, cur.col + 2);
            } else {
                cur = Position::new(cur.row, cur.col + 1);
            }
        }
        cur
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UnicodeWidth;

    #[test]
    fn out_of_bounds_read_is_blank() {
        let buf = Buffer::new(Size::new(3, 3));
        assert_eq!(buf.get(Position::new(row(99), col(1))), Cell::blank());
    }

    #[test]
    fn out_of_bounds_write_is_noop() {
        let mut buf = Buffer::new(Size::new(3, 3));
        buf.set(Position::new(row(99), col(1)), Cell::new('x', Style::default_style()));
        assert_eq!(buf.get(Position::new(row(1), col(1))), Cell::blank());
    }

    #[test]
    fn fill_clips_to_bounds_and_empty_clip_writes_nothing() {
        let mut buf = Buffer::new(Size::new(3, 3));
        let marker = Cell::new('#', Style::default_style());
        buf.fill(Rect::new(row(10), col(10), row(20), col(20)), marker);
        assert!(buf.cells().iter().all(|c| *c == Cell::blank()));

        buf.fill(Rect::new(row(1), col(1), row(3), col(3)), marker);
        assert!(buf.cells().iter().all(|c| *c == marker));
    }

    #[test]
    fn newline_advances_one_row_return_goes_to_column_one() {
        let mut buf = Buffer::new(Size::new(10, 3));
        let end = buf.write("ab\ncd\r12", Position::new(row(1), col(1)), Style::default_style(), &UnicodeWidth);
        assert_eq!(end, Position::new(row(2), col(3)));
        assert_eq!(buf.get(Position::new(row(1), col(1))).character, 'a');
        assert_eq!(buf.get(Position::new(row(2), col(1))).character, '1');
        assert_eq!(buf.get(Position::new(row(2), col(2))).character, '2');
    }

    #[test]
    fn tab_advances_to_next_multiple_of_eight_clamped() {
        let mut buf = Buffer::new(Size::new(10, 1));
        let end = buf.write("\t", Position::new(row(1), col(3)), Style::default_style(), &UnicodeWidth);
        assert_eq!(end.col, col(9));
        let end2 = buf.write("\t", Position::new(row(1), col(9)), Style::default_style(), &UnicodeWidth);
        assert_eq!(end2.col, col(10));
    }

    #[test]
    fn wide_char_at_rightmost_column_wraps_before_placement() {
        let mut buf = Buffer::new(Size::new(4, 2));
        buf.write("abc", Position::new(row(1), col(1)), Style::default_style(), &UnicodeWidth);
        let end = buf.write("世", Position::new(row(1), col(4)), Style::default_style(), &UnicodeWidth);
        assert_eq!(buf.get(Position::new(row(1), col(4))).character, ' ');
        assert_eq!(buf.get(Position::new(row(2), col(1))).character, '世');
        assert!(buf.get(Position::new(row(2), col(2))).is_continuation());
        assert_eq!(end, Position::new(row(2), col(3)));
    }
}
