// SPDX-License-Identifier: GPL-3.0-or-later

use crate::position::Position;
use crate::types::direction::{self, Direction};
use crate::types::{
    piece_type_value, Move, Square, Value, BISHOP, BLACK, BLACK_OO, BLACK_OOO, CASTLING,
    ENPASSANT, KING, KING_VALUE, KNIGHT, MAX_MOVES, NORMAL, NO_CASTLING, NO_PIECE, NO_PIECE_TYPE,
    PAWN, PAWN_DOUBLE, PROMOTION, QUEEN, RANK_1, RANK_4, RANK_5, RANK_8, ROOK, WHITE, WHITE_OO,
    WHITE_OOO,
};

#[derive(Debug, Clone, Copy)]
pub struct ExtMove {
    pub m: Move,
    value: Value,
}

/// A reusable, caller-owned move buffer of fixed capacity.
pub struct MoveList {
    list: [ExtMove; MAX_MOVES],
    size: usize,
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList {
            list: [ExtMove {
                m: Move::NONE,
                value: Value(0),
            }; MAX_MOVES],
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        self.size = 0;
    }

    fn add(&mut self, m: Move) {
        self.list[self.size].m = m;
        self.list[self.size].value = Value(0);
        self.size += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.list[..self.size].iter().map(|e| e.m)
    }

    pub fn contains(&self, m: Move) -> bool {
        self.iter().any(|x| x == m)
    }

    // Simplified MVV-LVA: prefer cheap attackers, then expensive victims.
    fn rate(&mut self) {
        for e in self.list[..self.size].iter_mut() {
            let mut v = KING_VALUE.0 / piece_type_value(e.m.piece().piece_type()).0;
            let captured = e.m.captured();
            if captured != NO_PIECE {
                v += 10 * piece_type_value(captured.piece_type()).0;
            }
            e.value = Value(v);
        }
    }

    // Stable insertion sort, descending by value; equal ratings keep
    // their generation order.
    fn sort(&mut self) {
        for i in 1..self.size {
            let e = self.list[i];
            let mut j = i;
            while j > 0 && self.list[j - 1].value < e.value {
                self.list[j] = self.list[j - 1];
                j -= 1;
            }
            self.list[j] = e;
        }
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = ExtMove;
    fn index(&self, i: usize) -> &Self::Output {
        &self.list[..self.size][i]
    }
}

/// Fills the list with every pseudo-legal move for the side to move,
/// rated and sorted by the capture heuristic.
pub fn generate(list: &mut MoveList, pos: &Position) {
    list.clear();
    add_all_moves(list, pos);
    if !pos.is_check() {
        let king_sq = pos.pieces(pos.side_to_move, KING).lsb();
        add_castling_moves(list, pos, king_sq);
    }

    list.rate();
    list.sort();
}

/// Like `generate`, but keeps captures only - unless the side to move is
/// in check, in which case every evasion candidate stays in.
pub fn generate_quiescent(list: &mut MoveList, pos: &Position) {
    list.clear();
    add_all_moves(list, pos);
    if !pos.is_check() {
        let size = list.size;
        list.size = 0;
        for i in 0..size {
            let m = list.list[i].m;
            if m.captured() != NO_PIECE {
                list.add(m);
            }
        }
    }

    list.rate();
    list.sort();
}

/// Fills the list with strictly legal moves: each pseudo-legal candidate
/// is made, rejected if it leaves the mover's own king in check, and
/// undone. Survivors keep their order.
pub fn generate_legal(list: &mut MoveList, pos: &mut Position) {
    generate(list, pos);

    let size = list.size;
    list.size = 0;
    for i in 0..size {
        let m = list.list[i].m;
        pos.make_move(m);
        if !pos.is_check_for(!pos.side_to_move) {
            list.add(m);
        }
        pos.undo_move(m);
    }
}

fn add_all_moves(list: &mut MoveList, pos: &Position) {
    let us = pos.side_to_move;

    for sq in pos.pieces(us, PAWN) {
        add_pawn_moves(list, pos, sq);
    }
    for sq in pos.pieces(us, KNIGHT) {
        add_piece_moves(list, pos, sq, &direction::KNIGHT_DIRECTIONS);
    }
    for sq in pos.pieces(us, BISHOP) {
        add_piece_moves(list, pos, sq, &direction::BISHOP_DIRECTIONS);
    }
    for sq in pos.pieces(us, ROOK) {
        add_piece_moves(list, pos, sq, &direction::ROOK_DIRECTIONS);
    }
    for sq in pos.pieces(us, QUEEN) {
        add_piece_moves(list, pos, sq, &direction::QUEEN_DIRECTIONS);
    }
    let king_sq = pos.pieces(us, KING).lsb();
    add_piece_moves(list, pos, king_sq, &direction::KING_DIRECTIONS);
}

fn add_pawn_moves(list: &mut MoveList, pos: &Position, pawn_sq: Square) {
    let pawn = pos.piece_on(pawn_sq);
    let us = pawn.color();
    let promotion_rank = if us == WHITE { RANK_8 } else { RANK_1 };

    for d in direction::PAWN_CAPTURES[us.0 as usize] {
        let to = pawn_sq + d;
        if !to.is_ok() {
            continue;
        }
        let target = pos.piece_on(to);
        if target != NO_PIECE {
            if target.color() == !us {
                if to.rank() == promotion_rank {
                    for pt in [QUEEN, ROOK, BISHOP, KNIGHT] {
                        list.add(Move::make(PROMOTION, pawn_sq, to, pawn, target, pt));
                    }
                } else {
                    list.add(Move::make(NORMAL, pawn_sq, to, pawn, target, NO_PIECE_TYPE));
                }
            }
        } else if to == pos.ep_square {
            let capture_sq = to + direction::pawn_push(!us);
            let target = pos.piece_on(capture_sq);
            list.add(Move::make(ENPASSANT, pawn_sq, to, pawn, target, NO_PIECE_TYPE));
        }
    }

    let d = direction::pawn_push(us);
    let to = pawn_sq + d;
    if to.is_ok() && pos.piece_on(to) == NO_PIECE {
        if to.rank() == promotion_rank {
            for pt in [QUEEN, ROOK, BISHOP, KNIGHT] {
                list.add(Move::make(PROMOTION, pawn_sq, to, pawn, NO_PIECE, pt));
            }
        } else {
            list.add(Move::make(NORMAL, pawn_sq, to, pawn, NO_PIECE, NO_PIECE_TYPE));

            let to = to + d;
            let double_rank = if us == WHITE { RANK_4 } else { RANK_5 };
            if to.is_ok() && pos.piece_on(to) == NO_PIECE && to.rank() == double_rank {
                list.add(Move::make(PAWN_DOUBLE, pawn_sq, to, pawn, NO_PIECE, NO_PIECE_TYPE));
            }
        }
    }
}

fn add_piece_moves(list: &mut MoveList, pos: &Position, from: Square, directions: &[Direction]) {
    let pc = pos.piece_on(from);
    let sliding = pc.piece_type().is_sliding();
    let them = !pc.color();

    for &d in directions {
        let mut to = from + d;
        while to.is_ok() {
            let target = pos.piece_on(to);
            if target != NO_PIECE {
                if target.color() == them {
                    list.add(Move::make(NORMAL, from, to, pc, target, NO_PIECE_TYPE));
                }
                break;
            }
            list.add(Move::make(NORMAL, from, to, pc, NO_PIECE, NO_PIECE_TYPE));
            if !sliding {
                break;
            }
            to += d;
        }
    }
}

// Castling needs the intervening squares empty and the king's transit
// square safe. The destination square is deliberately not probed here;
// the legality filter in generate_legal covers it.
fn add_castling_moves(list: &mut MoveList, pos: &Position, king_sq: Square) {
    let king = pos.piece_on(king_sq);

    if king.color() == WHITE {
        if pos.castling_rights & WHITE_OO != NO_CASTLING
            && pos.piece_on(Square::F1) == NO_PIECE
            && pos.piece_on(Square::G1) == NO_PIECE
            && !pos.is_attacked(Square::F1, BLACK)
        {
            list.add(Move::make(CASTLING, king_sq, Square::G1, king, NO_PIECE, NO_PIECE_TYPE));
        }
        if pos.castling_rights & WHITE_OOO != NO_CASTLING
            && pos.piece_on(Square::B1) == NO_PIECE
            && pos.piece_on(Square::C1) == NO_PIECE
            && pos.piece_on(Square::D1) == NO_PIECE
            && !pos.is_attacked(Square::D1, BLACK)
        {
            list.add(Move::make(CASTLING, king_sq, Square::C1, king, NO_PIECE, NO_PIECE_TYPE));
        }
    } else {
        if pos.castling_rights & BLACK_OO != NO_CASTLING
            && pos.piece_on(Square::F8) == NO_PIECE
            && pos.piece_on(Square::G8) == NO_PIECE
            && !pos.is_attacked(Square::F8, WHITE)
        {
            list.add(Move::make(CASTLING, king_sq, Square::G8, king, NO_PIECE, NO_PIECE_TYPE));
        }
        if pos.castling_rights & BLACK_OOO != NO_CASTLING
            && pos.piece_on(Square::B8) == NO_PIECE
            && pos.piece_on(Square::C8) == NO_PIECE
            && pos.piece_on(Square::D8) == NO_PIECE
            && !pos.is_attacked(Square::D8, WHITE)
        {
            list.add(Move::make(CASTLING, king_sq, Square::C8, king, NO_PIECE, NO_PIECE_TYPE));
        }
    }
}
