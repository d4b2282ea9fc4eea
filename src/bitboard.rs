// SPDX-License-Identifier: GPL-3.0-or-later

use crate::types::Square;

/// A set of board squares as one bit per square. The bit index is the
/// dense 0-63 form of a 0x88 square: the odd (off-board) half of each
/// 16-slot rank is squeezed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitboard(pub u64);

pub const EMPTY: Bitboard = Bitboard(0);
pub const ALL_SQUARES: Bitboard = Bitboard(!0u64);

pub fn to_bit_square(s: Square) -> u32 {
    ((s.0 & !7) >> 1) | (s.0 & 7)
}

pub fn to_x88_square(bit: u32) -> Square {
    Square(((bit & !7) << 1) | (bit & 7))
}

pub fn popcount(bb: Bitboard) -> u32 {
    bb.0.count_ones()
}

impl Bitboard {
    pub fn add(self, s: Square) -> Bitboard {
        Bitboard(self.0 | (1 << to_bit_square(s)))
    }

    pub fn remove(self, s: Square) -> Bitboard {
        Bitboard(self.0 & !(1 << to_bit_square(s)))
    }

    pub fn contains(self, s: Square) -> bool {
        self.0 & (1 << to_bit_square(s)) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    // The square of the lowest set bit. Must not be called on an empty
    // bitboard.
    pub fn lsb(self) -> Square {
        debug_assert!(!self.is_empty());
        to_x88_square(self.0.trailing_zeros())
    }
}

impl Iterator for Bitboard {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_empty() {
            None
        } else {
            let s = self.lsb();
            self.0 &= self.0 - 1;
            Some(s)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FILE_A, FILE_H, RANK_1, RANK_8};

    #[test]
    fn test_bit_square_roundtrip() {
        for r in RANK_1..=RANK_8 {
            for f in FILE_A..=FILE_H {
                let sq = Square::make(f, r);
                let bit = to_bit_square(sq);
                assert!(bit < 64);
                assert_eq!(to_x88_square(bit), sq);
            }
        }
    }

    #[test]
    fn test_add_all_squares_fills_the_board() {
        let mut bb = EMPTY;
        for r in RANK_1..=RANK_8 {
            for f in FILE_A..=FILE_H {
                bb = bb.add(Square::make(f, r));
            }
        }
        assert_eq!(bb, ALL_SQUARES);
    }

    #[test]
    fn test_remove_all_squares_empties_the_board() {
        let mut bb = ALL_SQUARES;
        for r in RANK_1..=RANK_8 {
            for f in FILE_A..=FILE_H {
                bb = bb.remove(Square::make(f, r));
            }
        }
        assert_eq!(bb, EMPTY);
    }

    #[test]
    fn test_add_remove_single_square() {
        let bb = EMPTY.add(Square::E4);
        assert!(bb.contains(Square::E4));
        assert!(!bb.contains(Square::E5));
        assert_eq!(popcount(bb), 1);
        assert_eq!(bb.remove(Square::E4), EMPTY);
        // Removing an absent square is a no-op.
        assert_eq!(bb.remove(Square::A1), bb);
    }

    #[test]
    fn test_iteration_is_ascending_without_duplicates() {
        let bb = EMPTY
            .add(Square::H8)
            .add(Square::A1)
            .add(Square::E4)
            .add(Square::C2);
        let squares: Vec<Square> = bb.collect();
        assert_eq!(
            squares,
            vec![Square::A1, Square::C2, Square::E4, Square::H8]
        );
    }

    #[test]
    fn test_iteration_covers_every_square_once() {
        let squares: Vec<Square> = ALL_SQUARES.collect();
        assert_eq!(squares.len(), 64);
        for w in squares.windows(2) {
            assert!(to_bit_square(w[0]) < to_bit_square(w[1]));
        }
    }

    #[test]
    fn test_lsb() {
        let bb = EMPTY.add(Square::G7).add(Square::B3);
        assert_eq!(bb.lsb(), Square::B3);
    }
}
