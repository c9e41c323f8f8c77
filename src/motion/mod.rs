// Copyright (c) 2025 ansistage contributors. Licensed under Apache License, Version 2.0.

//! The cursor-motion optimiser (§4.5): picks the byte-shortest [`ControlSequence`]
//! sequence moving the cursor from one position to another.

use crate::ansi::{encode, ControlSequence, Encoding};
use crate::core::Position;

/// Returns the byte-shortest sequence of [`ControlSequence`]s moving the cursor from
/// `from` to `to`, measured in `encoding`. Empty if `from == to`.
#[must_use]
pub fn motion_optimise(from: Position, to: Position, encoding: Encoding) -> Vec<ControlSequence> {
    if from == to { return Vec::new(); }

    let (dr, dc) = to - from;
    let mut candidates: Vec<Vec<ControlSequence>> = vec![vec![ControlSequence::CursorPosition {
        row: to.row.0,
        col: to.col.0,
    }]];

    if to.col.0 == 1 && dr != 0 {
        candidates.push(vec![if dr > 0 {
            ControlSequence::CursorNextLine(dr as u16)
        } else {
            ControlSequence::CursorPreviousLine((-dr) as u16)
        }]);
    }

    if dr == 0 {
        candidates.push(vec![ControlSequence::CursorHorizontalAbsolute(to.col.0)]);
        if dc > 0 {
            candidates.push(vec![ControlSequence::CursorForward(dc as u16)]);
        } else if dc < 0 {
            candidates.push(vec![ControlSequence::CursorBack((-dc) as u16)]);
        }
    } else {
        let vertical = if dr > 0 { ControlSequence::CursorDown(dr as u16) } else { ControlSequence::CursorUp((-dr) as u16) };
        if dc == 0 {
            candidates.push(vec![vertical]);
        } else {
            candidates.push(vec![vertical.clone(), ControlSequence::CursorHorizontalAbsolute(to.col.0)]);
            if dc > 0 {
                candidates.push(vec![vertical, ControlSequence::CursorForward(dc as u16)]);
            } else {
                candidates.push(vec![vertical, ControlSequence::CursorBack((-dc) as u16)]);
            }
        }
    }

    candidates
        .into_iter()
        .min_by_key(|seq| encoded_len(seq, encoding))
        .unwrap_or_default()
}

#[must_use]
fn encoded_len(seq: &[ControlSequence], encoding: Encoding) -> usize {
    seq.iter().map(|c| encode(c, encoding).len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{col, row};

    #[test]
    fn scenario_from_spec_prefers_horizontal_absolute_over_cursor_position_or_back() {
        // §8 scenario 1: (5,10) -> (5,1) on an 80-wide buffer must pick `CSI G`.
        let from = Position::new(row(5), col(10));
        let to = Position::new(row(5), col(1));
        let seq = motion_optimise(from, to, Encoding::SevenBit);
        assert_eq!(seq, vec![ControlSequence::CursorHorizontalAbsolute(1)]);
        let encoded = seq.iter().map(|c| encode(c, Encoding::SevenBit)).collect::<String>();
        assert_eq!(encoded, "\x1b[G");
        assert_eq!(encoded.len(), 3);
    }

    #[test]
    fn no_motion_when_positions_are_equal() {
        let p = Position::new(row(4), col(4));
        assert!(motion_optimise(p, p, Encoding::SevenBit).is_empty());
    }

    #[test]
    fn never_longer_than_plain_cursor_position() {
        for from_row in 1..6u16 {
            for from_col in 1..6u16 {
                for to_row in 1..6u16 {
                    for to_col in 1..6u16 {
                        let from = Position::new(row(from_row), col(from_col));
                        let to = Position::new(row(to_row), col(to_col));
                        let optimised = motion_optimise(from, to, Encoding::SevenBit);
                        let optimised_len = encoded_len(&optimised, Encoding::SevenBit);
                        let baseline_len =
                            encode(&ControlSequence::CursorPosition { row: to_row, col: to_col }, Encoding::SevenBit).len();
                        assert!(optimised_len <= baseline_len, "{from:?} -> {to:?}");
                    }
                }
            }
        }
    }
}
