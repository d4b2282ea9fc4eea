// SPDX-License-Identifier: GPL-3.0-or-later

use crate::bitboard::{self, Bitboard};
use crate::types::direction::{self, Direction};
use crate::types::{
    CastlingRight, Color, Move, Piece, PieceType, Square, BISHOP, BLACK_OO, BLACK_OOO, CASTLING,
    ENPASSANT, KING, KNIGHT, MAX_PLY, NO_CASTLING, NO_COLOR, NO_PIECE, PAWN, PAWN_DOUBLE,
    PROMOTION, QUEEN, ROOK, WHITE_OO, WHITE_OOO,
};

// The three fields that cannot be recomputed by reversing a move and so
// have to be saved before making one.
#[derive(Debug, Clone)]
struct StateInfo {
    castling_rights: CastlingRight,
    ep_square: Square,
    halfmove_clock: u32,
}

/// The board state: a 0x88 piece-by-square array kept in lockstep with
/// per-color/per-piece-type bitboards, plus castling rights, the en
/// passant square and the move clocks.
///
/// A Position starts empty and is populated through `put_piece`,
/// `set_castling_right` and direct field assignment (the surface the FEN
/// parser uses). It is then mutated in place by `make_move`/`undo_move`
/// pairs, which must nest in LIFO order.
#[derive(Debug, Clone)]
pub struct Position {
    pub side_to_move: Color,
    pub castling_rights: CastlingRight,
    pub ep_square: Square,
    pub halfmove_clock: u32,
    pub halfmove_number: u32,

    board: [Piece; 128],
    by_color_type: [[Bitboard; 6]; 2],

    states: Vec<StateInfo>,
}

impl Position {
    pub fn new() -> Position {
        Position {
            side_to_move: NO_COLOR,
            castling_rights: NO_CASTLING,
            ep_square: Square::NONE,
            halfmove_clock: 0,
            halfmove_number: 0,
            board: [NO_PIECE; 128],
            by_color_type: [[bitboard::EMPTY; 6]; 2],
            states: Vec::with_capacity(MAX_PLY),
        }
    }

    pub fn piece_on(&self, s: Square) -> Piece {
        debug_assert!(s.is_ok());
        self.board[s.0 as usize]
    }

    pub fn pieces(&self, c: Color, pt: PieceType) -> Bitboard {
        self.by_color_type[c.0 as usize][pt.0 as usize]
    }

    // put_piece() and remove_piece() are the only mutation primitives
    // touching the board array and the bitboards, keeping the two
    // representations in lockstep.
    pub fn put_piece(&mut self, pc: Piece, s: Square) {
        debug_assert!(s.is_ok());
        debug_assert!(self.board[s.0 as usize] == NO_PIECE);

        let c = pc.color();
        let pt = pc.piece_type();
        self.board[s.0 as usize] = pc;
        self.by_color_type[c.0 as usize][pt.0 as usize] =
            self.pieces(c, pt).add(s);
    }

    pub fn remove_piece(&mut self, s: Square) -> Piece {
        debug_assert!(s.is_ok());

        let pc = self.board[s.0 as usize];
        if pc == NO_PIECE {
            return NO_PIECE;
        }
        let c = pc.color();
        let pt = pc.piece_type();
        self.board[s.0 as usize] = NO_PIECE;
        self.by_color_type[c.0 as usize][pt.0 as usize] =
            self.pieces(c, pt).remove(s);
        pc
    }

    pub fn set_castling_right(&mut self, cr: CastlingRight) {
        self.castling_rights |= cr;
    }

    // make_move() plays a move on the board. The move is assumed to be
    // pseudo-legal for the side to move; anything else is a caller
    // contract violation.
    pub fn make_move(&mut self, m: Move) {
        self.push_state();

        let mt = m.move_type();
        let from = m.from();
        let to = m.to();
        let pc = m.piece();
        let us = pc.color();
        let captured = m.captured();

        if captured != NO_PIECE {
            let mut capture_sq = to;
            if mt == ENPASSANT {
                capture_sq += direction::pawn_push(!us);
            }
            self.remove_piece(capture_sq);
            self.clear_castling(capture_sq);
        }

        self.remove_piece(from);
        if mt == PROMOTION {
            self.put_piece(Piece::make(us, m.promotion()), to);
        } else {
            self.put_piece(pc, to);
        }

        if mt == CASTLING {
            let (rook_from, rook_to) = match to {
                Square::G1 => (Square::H1, Square::F1),
                Square::C1 => (Square::A1, Square::D1),
                Square::G8 => (Square::H8, Square::F8),
                Square::C8 => (Square::A8, Square::D8),
                _ => panic!("invalid castling target square: {:?}", to),
            };
            let rook = self.remove_piece(rook_from);
            self.put_piece(rook, rook_to);
        }

        self.clear_castling(from);

        self.ep_square = if mt == PAWN_DOUBLE {
            to + direction::pawn_push(!us)
        } else {
            Square::NONE
        };

        self.side_to_move = !self.side_to_move;

        if pc.piece_type() == PAWN || captured != NO_PIECE {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        self.halfmove_number += 1;
    }

    // undo_move() restores the position to exactly the state before
    // make_move(). It must be called with the identical move, in reverse
    // order of the makes.
    pub fn undo_move(&mut self, m: Move) {
        let mt = m.move_type();
        let from = m.from();
        let to = m.to();
        let pc = m.piece();
        let us = pc.color();
        let captured = m.captured();

        self.halfmove_number -= 1;

        self.side_to_move = !self.side_to_move;

        if mt == CASTLING {
            let (rook_from, rook_to) = match to {
                Square::G1 => (Square::H1, Square::F1),
                Square::C1 => (Square::A1, Square::D1),
                Square::G8 => (Square::H8, Square::F8),
                Square::C8 => (Square::A8, Square::D8),
                _ => panic!("invalid castling target square: {:?}", to),
            };
            let rook = self.remove_piece(rook_to);
            self.put_piece(rook, rook_from);
        }

        self.remove_piece(to);
        self.put_piece(pc, from);

        if captured != NO_PIECE {
            let mut capture_sq = to;
            if mt == ENPASSANT {
                capture_sq += direction::pawn_push(!us);
            }
            self.put_piece(captured, capture_sq);
        }

        self.pop_state();
    }

    fn push_state(&mut self) {
        self.states.push(StateInfo {
            castling_rights: self.castling_rights,
            ep_square: self.ep_square,
            halfmove_clock: self.halfmove_clock,
        });
    }

    fn pop_state(&mut self) {
        let st = self
            .states
            .pop()
            .expect("undo_move without a matching make_move");
        self.castling_rights = st.castling_rights;
        self.ep_square = st.ep_square;
        self.halfmove_clock = st.halfmove_clock;
    }

    // Vacating a king or rook home square, by move or capture, forfeits
    // the castling rights keyed to it.
    fn clear_castling(&mut self, s: Square) {
        match s {
            Square::A1 => self.castling_rights &= !WHITE_OOO,
            Square::H1 => self.castling_rights &= !WHITE_OO,
            Square::A8 => self.castling_rights &= !BLACK_OOO,
            Square::H8 => self.castling_rights &= !BLACK_OO,
            Square::E1 => self.castling_rights &= !(WHITE_OO | WHITE_OOO),
            Square::E8 => self.castling_rights &= !(BLACK_OO | BLACK_OOO),
            _ => (),
        }
    }

    pub fn is_check(&self) -> bool {
        self.is_check_for(self.side_to_move)
    }

    pub fn is_check_for(&self, c: Color) -> bool {
        self.is_attacked(self.pieces(c, KING).lsb(), !c)
    }

    // is_attacked() answers whether any piece of the given color could
    // capture on the target square in one ply. Cheap piece classes are
    // probed first for early exit.
    pub fn is_attacked(&self, target: Square, attacker: Color) -> bool {
        self.attacked_by_pawn(target, attacker)
            || self.attacked_by(
                target,
                Piece::make(attacker, KNIGHT),
                &direction::KNIGHT_DIRECTIONS,
            )
            || self.attacked_by_slider(
                target,
                Piece::make(attacker, BISHOP),
                Piece::make(attacker, QUEEN),
                &direction::BISHOP_DIRECTIONS,
            )
            || self.attacked_by_slider(
                target,
                Piece::make(attacker, ROOK),
                Piece::make(attacker, QUEEN),
                &direction::ROOK_DIRECTIONS,
            )
            || self.attacked_by(
                target,
                Piece::make(attacker, KING),
                &direction::KING_DIRECTIONS,
            )
    }

    fn attacked_by_pawn(&self, target: Square, attacker: Color) -> bool {
        let pawn = Piece::make(attacker, PAWN);
        for d in direction::PAWN_CAPTURES[attacker.0 as usize] {
            let s = target - d;
            if s.is_ok() && self.board[s.0 as usize] == pawn {
                return true;
            }
        }
        false
    }

    fn attacked_by(&self, target: Square, attacker_pc: Piece, directions: &[Direction]) -> bool {
        for &d in directions {
            let s = target + d;
            if s.is_ok() && self.board[s.0 as usize] == attacker_pc {
                return true;
            }
        }
        false
    }

    // Walk each ray until the first occupied square; only that square
    // decides the direction, blocked is blocked.
    fn attacked_by_slider(
        &self,
        target: Square,
        attacker_pc: Piece,
        attacker_queen: Piece,
        directions: &[Direction],
    ) -> bool {
        for &d in directions {
            let mut s = target + d;
            while s.is_ok() {
                let pc = self.board[s.0 as usize];
                if pc != NO_PIECE {
                    if pc == attacker_pc || pc == attacker_queen {
                        return true;
                    }
                    break;
                }
                s += d;
            }
        }
        false
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

// Structural equality over the public state and both board
// representations; the undo stack is transient bookkeeping and does not
// take part.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.ep_square == other.ep_square
            && self.halfmove_clock == other.halfmove_clock
            && self.halfmove_number == other.halfmove_number
            && self.board == other.board
            && self.by_color_type == other.by_color_type
    }
}

impl Eq for Position {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ANY_CASTLING, BLACK, B_KING, B_PAWN, B_QUEEN, B_ROOK, NORMAL, NO_PIECE_TYPE, WHITE,
        W_KING, W_KNIGHT, W_PAWN, W_ROOK,
    };

    fn kings_only() -> Position {
        let mut pos = Position::new();
        pos.put_piece(W_KING, Square::E1);
        pos.put_piece(B_KING, Square::E8);
        pos.side_to_move = WHITE;
        pos
    }

    #[test]
    fn test_board_and_bitboards_stay_in_lockstep() {
        let mut pos = Position::new();
        pos.put_piece(W_KNIGHT, Square::G1);
        assert_eq!(pos.piece_on(Square::G1), W_KNIGHT);
        assert!(pos.pieces(WHITE, KNIGHT).contains(Square::G1));

        assert_eq!(pos.remove_piece(Square::G1), W_KNIGHT);
        assert_eq!(pos.piece_on(Square::G1), NO_PIECE);
        assert!(pos.pieces(WHITE, KNIGHT).is_empty());

        assert_eq!(pos.remove_piece(Square::G1), NO_PIECE);
    }

    #[test]
    fn test_make_move_flips_active_color() {
        let mut pos = kings_only();
        let m = Move::make(NORMAL, Square::E1, Square::E2, W_KING, NO_PIECE, NO_PIECE_TYPE);
        pos.make_move(m);
        assert_eq!(pos.side_to_move, BLACK);
        pos.undo_move(m);
        assert_eq!(pos.side_to_move, WHITE);
    }

    #[test]
    fn test_make_undo_restores_the_position() {
        let mut pos = kings_only();
        pos.put_piece(W_ROOK, Square::A1);
        pos.put_piece(B_QUEEN, Square::A7);
        pos.set_castling_right(WHITE_OOO);
        let before = pos.clone();

        let m = Move::make(NORMAL, Square::A1, Square::A7, W_ROOK, B_QUEEN, NO_PIECE_TYPE);
        pos.make_move(m);
        assert_ne!(pos, before);
        pos.undo_move(m);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_moving_a_rook_clears_its_castling_right() {
        let mut pos = kings_only();
        pos.put_piece(W_ROOK, Square::A1);
        pos.put_piece(W_ROOK, Square::H1);
        pos.castling_rights = ANY_CASTLING;

        let m = Move::make(NORMAL, Square::H1, Square::H5, W_ROOK, NO_PIECE, NO_PIECE_TYPE);
        pos.make_move(m);
        assert_eq!(pos.castling_rights, WHITE_OOO | BLACK_OO | BLACK_OOO);
        pos.undo_move(m);
        assert_eq!(pos.castling_rights, ANY_CASTLING);
    }

    #[test]
    fn test_moving_the_king_clears_both_castling_rights() {
        let mut pos = kings_only();
        pos.castling_rights = ANY_CASTLING;
        let m = Move::make(NORMAL, Square::E1, Square::D1, W_KING, NO_PIECE, NO_PIECE_TYPE);
        pos.make_move(m);
        assert_eq!(pos.castling_rights, BLACK_OO | BLACK_OOO);
    }

    #[test]
    fn test_capturing_a_home_rook_clears_the_right() {
        let mut pos = kings_only();
        pos.put_piece(B_ROOK, Square::H8);
        pos.put_piece(W_ROOK, Square::H1);
        pos.castling_rights = ANY_CASTLING;

        // White never moved, yet losing the h8 rook costs black kingside.
        let m = Move::make(NORMAL, Square::H1, Square::H8, W_ROOK, B_ROOK, NO_PIECE_TYPE);
        pos.make_move(m);
        assert_eq!(pos.castling_rights, WHITE_OOO | BLACK_OOO);
        pos.undo_move(m);
        assert_eq!(pos.castling_rights, ANY_CASTLING);
    }

    #[test]
    fn test_castling_relocates_the_rook() {
        let mut pos = kings_only();
        pos.put_piece(W_ROOK, Square::H1);
        pos.set_castling_right(WHITE_OO);
        let before = pos.clone();

        let m = Move::make(CASTLING, Square::E1, Square::G1, W_KING, NO_PIECE, NO_PIECE_TYPE);
        pos.make_move(m);
        assert_eq!(pos.piece_on(Square::G1), W_KING);
        assert_eq!(pos.piece_on(Square::F1), W_ROOK);
        assert_eq!(pos.piece_on(Square::H1), NO_PIECE);
        assert_eq!(pos.castling_rights, NO_CASTLING);
        pos.undo_move(m);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_double_push_sets_the_en_passant_square() {
        let mut pos = kings_only();
        pos.put_piece(W_PAWN, Square::E2);
        let m = Move::make(PAWN_DOUBLE, Square::E2, Square::E4, W_PAWN, NO_PIECE, NO_PIECE_TYPE);
        pos.make_move(m);
        assert_eq!(pos.ep_square, Square::E3);
        pos.undo_move(m);
        assert_eq!(pos.ep_square, Square::NONE);
    }

    #[test]
    fn test_en_passant_removes_the_passed_pawn() {
        let mut pos = kings_only();
        pos.put_piece(W_PAWN, Square::E5);
        pos.put_piece(B_PAWN, Square::D5);
        pos.ep_square = Square::D6;
        let before = pos.clone();

        let m = Move::make(ENPASSANT, Square::E5, Square::D6, W_PAWN, B_PAWN, NO_PIECE_TYPE);
        pos.make_move(m);
        assert_eq!(pos.piece_on(Square::D6), W_PAWN);
        assert_eq!(pos.piece_on(Square::D5), NO_PIECE);
        assert_eq!(pos.piece_on(Square::E5), NO_PIECE);
        pos.undo_move(m);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_promotion_replaces_the_pawn() {
        let mut pos = kings_only();
        pos.put_piece(W_PAWN, Square::B7);
        let before = pos.clone();

        let m = Move::make(PROMOTION, Square::B7, Square::B8, W_PAWN, NO_PIECE, QUEEN);
        pos.make_move(m);
        assert_eq!(pos.piece_on(Square::B8), Piece::make(WHITE, QUEEN));
        assert!(pos.pieces(WHITE, PAWN).is_empty());
        pos.undo_move(m);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_halfmove_clock() {
        let mut pos = kings_only();
        pos.put_piece(W_ROOK, Square::A1);
        pos.put_piece(B_PAWN, Square::A7);
        pos.halfmove_clock = 7;

        let quiet = Move::make(NORMAL, Square::E1, Square::D1, W_KING, NO_PIECE, NO_PIECE_TYPE);
        pos.make_move(quiet);
        assert_eq!(pos.halfmove_clock, 8);

        let pawn = Move::make(NORMAL, Square::A7, Square::A6, B_PAWN, NO_PIECE, NO_PIECE_TYPE);
        pos.make_move(pawn);
        assert_eq!(pos.halfmove_clock, 0);
        pos.undo_move(pawn);
        assert_eq!(pos.halfmove_clock, 8);
        pos.undo_move(quiet);
        assert_eq!(pos.halfmove_clock, 7);
    }

    #[test]
    fn test_halfmove_number_counts_plies() {
        let mut pos = kings_only();
        pos.halfmove_number = 24;
        let m = Move::make(NORMAL, Square::E1, Square::E2, W_KING, NO_PIECE, NO_PIECE_TYPE);
        pos.make_move(m);
        assert_eq!(pos.halfmove_number, 25);
        pos.undo_move(m);
        assert_eq!(pos.halfmove_number, 24);
    }

    #[test]
    fn test_is_attacked() {
        let mut pos = kings_only();
        pos.put_piece(B_ROOK, Square::E6);
        assert!(pos.is_attacked(Square::E4, BLACK));
        assert!(pos.is_attacked(Square::A6, BLACK));
        assert!(!pos.is_attacked(Square::D4, BLACK));

        // A blocker on the ray cuts the attack.
        pos.put_piece(W_PAWN, Square::E3);
        assert!(pos.is_attacked(Square::E4, BLACK));
        assert!(!pos.is_attacked(Square::E2, BLACK));
    }

    #[test]
    fn test_pawn_attacks_are_diagonal_only() {
        let mut pos = kings_only();
        pos.put_piece(B_PAWN, Square::D5);
        assert!(pos.is_attacked(Square::C4, BLACK));
        assert!(pos.is_attacked(Square::E4, BLACK));
        assert!(!pos.is_attacked(Square::D4, BLACK));
        assert!(!pos.is_attacked(Square::C6, BLACK));
    }

    #[test]
    fn test_is_check() {
        let mut pos = kings_only();
        assert!(!pos.is_check());
        pos.put_piece(B_ROOK, Square::E5);
        assert!(pos.is_check());
        assert!(pos.is_check_for(WHITE));
        assert!(!pos.is_check_for(BLACK));
    }
}
