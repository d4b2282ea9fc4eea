// SPDX-License-Identifier: GPL-3.0-or-later

pub mod direction;

pub use direction::Direction;

pub const MAX_MOVES: usize = 256;
pub const MAX_PLY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

pub const WHITE: Color = Color(0);
pub const BLACK: Color = Color(1);
pub const NO_COLOR: Color = Color(2);

impl std::ops::Not for Color {
    type Output = Color;
    fn not(self) -> Self {
        debug_assert!(self == WHITE || self == BLACK);
        Color(self.0 ^ 1)
    }
}

pub type File = u32;
pub type Rank = u32;

pub const FILE_A: File = 0;
pub const FILE_B: File = 1;
pub const FILE_C: File = 2;
pub const FILE_D: File = 3;
pub const FILE_E: File = 4;
pub const FILE_F: File = 5;
pub const FILE_G: File = 6;
pub const FILE_H: File = 7;
pub const FILE_NONE: File = 8;

pub const RANK_1: Rank = 0;
pub const RANK_2: Rank = 1;
pub const RANK_3: Rank = 2;
pub const RANK_4: Rank = 3;
pub const RANK_5: Rank = 4;
pub const RANK_6: Rank = 5;
pub const RANK_7: Rank = 6;
pub const RANK_8: Rank = 7;
pub const RANK_NONE: Rank = 8;

// Squares use the 0x88 scheme: value = rank * 16 + file. Only the low
// half of each 16-slot rank is on the board, which makes off-board
// detection a single mask test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Square(pub u32);

impl Square {
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A2: Square = Square(16);
    pub const B2: Square = Square(17);
    pub const C2: Square = Square(18);
    pub const D2: Square = Square(19);
    pub const E2: Square = Square(20);
    pub const F2: Square = Square(21);
    pub const G2: Square = Square(22);
    pub const H2: Square = Square(23);
    pub const A3: Square = Square(32);
    pub const B3: Square = Square(33);
    pub const C3: Square = Square(34);
    pub const D3: Square = Square(35);
    pub const E3: Square = Square(36);
    pub const F3: Square = Square(37);
    pub const G3: Square = Square(38);
    pub const H3: Square = Square(39);
    pub const A4: Square = Square(48);
    pub const B4: Square = Square(49);
    pub const C4: Square = Square(50);
    pub const D4: Square = Square(51);
    pub const E4: Square = Square(52);
    pub const F4: Square = Square(53);
    pub const G4: Square = Square(54);
    pub const H4: Square = Square(55);
    pub const A5: Square = Square(64);
    pub const B5: Square = Square(65);
    pub const C5: Square = Square(66);
    pub const D5: Square = Square(67);
    pub const E5: Square = Square(68);
    pub const F5: Square = Square(69);
    pub const G5: Square = Square(70);
    pub const H5: Square = Square(71);
    pub const A6: Square = Square(80);
    pub const B6: Square = Square(81);
    pub const C6: Square = Square(82);
    pub const D6: Square = Square(83);
    pub const E6: Square = Square(84);
    pub const F6: Square = Square(85);
    pub const G6: Square = Square(86);
    pub const H6: Square = Square(87);
    pub const A7: Square = Square(96);
    pub const B7: Square = Square(97);
    pub const C7: Square = Square(98);
    pub const D7: Square = Square(99);
    pub const E7: Square = Square(100);
    pub const F7: Square = Square(101);
    pub const G7: Square = Square(102);
    pub const H7: Square = Square(103);
    pub const A8: Square = Square(112);
    pub const B8: Square = Square(113);
    pub const C8: Square = Square(114);
    pub const D8: Square = Square(115);
    pub const E8: Square = Square(116);
    pub const F8: Square = Square(117);
    pub const G8: Square = Square(118);
    pub const H8: Square = Square(119);

    pub const NONE: Square = Square(127);

    pub fn file(self) -> File {
        self.0 & 0xf
    }

    pub fn rank(self) -> Rank {
        self.0 >> 4
    }

    pub fn is_ok(self) -> bool {
        self.0 & 0x88 == 0
    }

    pub fn make(f: File, r: Rank) -> Square {
        Square((r << 4) | f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PieceType(pub u32);

pub const PAWN: PieceType = PieceType(0);
pub const KNIGHT: PieceType = PieceType(1);
pub const BISHOP: PieceType = PieceType(2);
pub const ROOK: PieceType = PieceType(3);
pub const QUEEN: PieceType = PieceType(4);
pub const KING: PieceType = PieceType(5);
pub const NO_PIECE_TYPE: PieceType = PieceType(6);

pub const PIECE_TYPES: [PieceType; 6] = [PAWN, KNIGHT, BISHOP, ROOK, QUEEN, KING];

impl PieceType {
    pub fn is_sliding(self) -> bool {
        self == BISHOP || self == ROOK || self == QUEEN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Value(pub i32);

pub const PAWN_VALUE: Value = Value(100);
pub const KNIGHT_VALUE: Value = Value(325);
pub const BISHOP_VALUE: Value = Value(325);
pub const ROOK_VALUE: Value = Value(500);
pub const QUEEN_VALUE: Value = Value(975);
pub const KING_VALUE: Value = Value(20000);

const PIECE_TYPE_VALUE: [Value; 6] = [
    PAWN_VALUE,
    KNIGHT_VALUE,
    BISHOP_VALUE,
    ROOK_VALUE,
    QUEEN_VALUE,
    KING_VALUE,
];

pub fn piece_type_value(pt: PieceType) -> Value {
    PIECE_TYPE_VALUE[pt.0 as usize]
}

// Pieces are encoded as color * 6 + piece type, 0..=11, with 12 as the
// empty-square sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece(pub u32);

pub const W_PAWN: Piece = Piece(0);
pub const W_KNIGHT: Piece = Piece(1);
pub const W_BISHOP: Piece = Piece(2);
pub const W_ROOK: Piece = Piece(3);
pub const W_QUEEN: Piece = Piece(4);
pub const W_KING: Piece = Piece(5);
pub const B_PAWN: Piece = Piece(6);
pub const B_KNIGHT: Piece = Piece(7);
pub const B_BISHOP: Piece = Piece(8);
pub const B_ROOK: Piece = Piece(9);
pub const B_QUEEN: Piece = Piece(10);
pub const B_KING: Piece = Piece(11);
pub const NO_PIECE: Piece = Piece(12);

impl Piece {
    pub fn make(c: Color, pt: PieceType) -> Piece {
        debug_assert!(c == WHITE || c == BLACK);
        debug_assert!(pt != NO_PIECE_TYPE);
        Piece(c.0 * 6 + pt.0)
    }

    pub fn color(self) -> Color {
        debug_assert!(self != NO_PIECE);
        Color(self.0 / 6)
    }

    pub fn piece_type(self) -> PieceType {
        debug_assert!(self != NO_PIECE);
        PieceType(self.0 % 6)
    }
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingSide {
    KING,
    QUEEN,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRight(pub u32);

pub const NO_CASTLING: CastlingRight = CastlingRight(0);
pub const WHITE_OO: CastlingRight = CastlingRight(1);
pub const WHITE_OOO: CastlingRight = CastlingRight(2);
pub const BLACK_OO: CastlingRight = CastlingRight(4);
pub const BLACK_OOO: CastlingRight = CastlingRight(8);
pub const ANY_CASTLING: CastlingRight = CastlingRight(15);

impl CastlingRight {
    pub fn make(c: Color, cs: CastlingSide) -> CastlingRight {
        use crate::types::CastlingSide::KING;
        match (c, cs) {
            (WHITE, KING) => WHITE_OO,
            (WHITE, _) => WHITE_OOO,
            (_, KING) => BLACK_OO,
            (_, _) => BLACK_OOO,
        }
    }
}

impl std::ops::BitAnd<CastlingRight> for CastlingRight {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        CastlingRight(self.0 & rhs.0)
    }
}

impl std::ops::BitOr<CastlingRight> for CastlingRight {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        CastlingRight(self.0 | rhs.0)
    }
}

impl std::ops::BitAndAssign<CastlingRight> for CastlingRight {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl std::ops::BitOrAssign<CastlingRight> for CastlingRight {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl std::ops::Not for CastlingRight {
    type Output = CastlingRight;
    fn not(self) -> Self {
        CastlingRight(!self.0 & ANY_CASTLING.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveType(pub u32);

pub const NORMAL: MoveType = MoveType(0);
pub const PAWN_DOUBLE: MoveType = MoveType(1);
pub const PROMOTION: MoveType = MoveType(2);
pub const ENPASSANT: MoveType = MoveType(3);
pub const CASTLING: MoveType = MoveType(4);
pub const NO_MOVE_TYPE: MoveType = MoveType(5);

// A move packed into 30 bits, low to high:
//
//  0 -  2: move type
//  3 -  9: origin square
// 10 - 16: target square
// 17 - 21: origin piece
// 22 - 26: target piece (NO_PIECE if not a capture)
// 27 - 29: promotion piece type (NO_PIECE_TYPE if not a promotion)
//
// The constructor does not validate field widths; callers guarantee each
// value fits, otherwise adjacent fields are corrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move(pub u32);

const MOVE_TYPE_SHIFT: u32 = 0;
const MOVE_TYPE_MASK: u32 = 0x7 << MOVE_TYPE_SHIFT;
const ORIGIN_SQUARE_SHIFT: u32 = 3;
const ORIGIN_SQUARE_MASK: u32 = 0x7f << ORIGIN_SQUARE_SHIFT;
const TARGET_SQUARE_SHIFT: u32 = 10;
const TARGET_SQUARE_MASK: u32 = 0x7f << TARGET_SQUARE_SHIFT;
const ORIGIN_PIECE_SHIFT: u32 = 17;
const ORIGIN_PIECE_MASK: u32 = 0x1f << ORIGIN_PIECE_SHIFT;
const TARGET_PIECE_SHIFT: u32 = 22;
const TARGET_PIECE_MASK: u32 = 0x1f << TARGET_PIECE_SHIFT;
const PROMOTION_SHIFT: u32 = 27;
const PROMOTION_MASK: u32 = 0x7 << PROMOTION_SHIFT;

impl Move {
    pub const NONE: Move = Move(
        (NO_MOVE_TYPE.0 << MOVE_TYPE_SHIFT)
            | (Square::NONE.0 << ORIGIN_SQUARE_SHIFT)
            | (Square::NONE.0 << TARGET_SQUARE_SHIFT)
            | (NO_PIECE.0 << ORIGIN_PIECE_SHIFT)
            | (NO_PIECE.0 << TARGET_PIECE_SHIFT)
            | (NO_PIECE_TYPE.0 << PROMOTION_SHIFT),
    );

    pub fn make(
        mt: MoveType,
        from: Square,
        to: Square,
        pc: Piece,
        captured: Piece,
        promotion: PieceType,
    ) -> Move {
        Move(
            (mt.0 << MOVE_TYPE_SHIFT)
                | (from.0 << ORIGIN_SQUARE_SHIFT)
                | (to.0 << TARGET_SQUARE_SHIFT)
                | (pc.0 << ORIGIN_PIECE_SHIFT)
                | (captured.0 << TARGET_PIECE_SHIFT)
                | (promotion.0 << PROMOTION_SHIFT),
        )
    }

    pub fn move_type(self) -> MoveType {
        MoveType((self.0 & MOVE_TYPE_MASK) >> MOVE_TYPE_SHIFT)
    }

    pub fn from(self) -> Square {
        Square((self.0 & ORIGIN_SQUARE_MASK) >> ORIGIN_SQUARE_SHIFT)
    }

    pub fn to(self) -> Square {
        Square((self.0 & TARGET_SQUARE_MASK) >> TARGET_SQUARE_SHIFT)
    }

    pub fn piece(self) -> Piece {
        Piece((self.0 & ORIGIN_PIECE_MASK) >> ORIGIN_PIECE_SHIFT)
    }

    pub fn captured(self) -> Piece {
        Piece((self.0 & TARGET_PIECE_MASK) >> TARGET_PIECE_SHIFT)
    }

    pub fn promotion(self) -> PieceType {
        PieceType((self.0 & PROMOTION_MASK) >> PROMOTION_SHIFT)
    }
}
