// SPDX-License-Identifier: GPL-3.0-or-later

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::position::Position;
use crate::types::{
    File, Piece, PieceType, Rank, Square, BISHOP, BLACK, BLACK_OO, BLACK_OOO, FILE_A, FILE_H,
    FILE_NONE, KING, KNIGHT, NO_CASTLING, NO_PIECE, PAWN, QUEEN, RANK_1, RANK_3, RANK_6, RANK_8,
    ROOK, WHITE, WHITE_OO, WHITE_OOO,
};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

static STARTING_POSITION: Lazy<Position> =
    Lazy::new(|| from_fen(STARTING_FEN).expect("the starting FEN parses"));

/// A fresh copy of the standard starting position.
pub fn starting_position() -> Position {
    STARTING_POSITION.clone()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: {0}")]
    Malformed(String),
    #[error("invalid board: {0}")]
    Board(String),
    #[error("invalid rank: {0}")]
    Rank(String),
    #[error("invalid active color: {0}")]
    ActiveColor(String),
    #[error("invalid castling rights: {0}")]
    CastlingRights(String),
    #[error("invalid en passant square: {0}")]
    EnPassantSquare(String),
    #[error("invalid halfmove clock: {0}")]
    HalfmoveClock(String),
    #[error("invalid fullmove number: {0}")]
    FullmoveNumber(String),
}

// from_fen() builds a Position from a FEN string. The halfmove clock and
// fullmove number are optional; everything else is validated against the
// side to move.
pub fn from_fen(fen: &str) -> Result<Position, FenError> {
    let tokens: Vec<&str> = fen.split_whitespace().collect();
    if tokens.len() < 4 || tokens.len() > 6 {
        return Err(FenError::Malformed(fen.to_string()));
    }

    let mut pos = Position::new();

    // Board, rank 8 first.
    let ranks: Vec<&str> = tokens[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::Board(tokens[0].to_string()));
    }
    for (i, rank_str) in ranks.iter().enumerate() {
        let r = RANK_8 - i as Rank;
        let mut f = FILE_A;
        for ch in rank_str.chars() {
            if let Some(pc) = piece_from_char(ch) {
                if f > FILE_H {
                    return Err(FenError::Rank(rank_str.to_string()));
                }
                pos.put_piece(pc, Square::make(f, r));
                f += 1;
            } else if ('1'..='8').contains(&ch) {
                f += ch as File - '0' as File;
            } else {
                return Err(FenError::Rank(rank_str.to_string()));
            }
        }
        if f != FILE_NONE {
            return Err(FenError::Rank(rank_str.to_string()));
        }
    }

    // Active color.
    pos.side_to_move = match tokens[1] {
        "w" => WHITE,
        "b" => BLACK,
        _ => return Err(FenError::ActiveColor(tokens[1].to_string())),
    };

    // Castling rights.
    if tokens[2] != "-" {
        if tokens[2].len() > 4 {
            return Err(FenError::CastlingRights(tokens[2].to_string()));
        }
        for ch in tokens[2].chars() {
            let cr = match ch {
                'K' => WHITE_OO,
                'Q' => WHITE_OOO,
                'k' => BLACK_OO,
                'q' => BLACK_OOO,
                _ => return Err(FenError::CastlingRights(tokens[2].to_string())),
            };
            pos.set_castling_right(cr);
        }
    }

    // En passant square. It must lie behind a double-pushed pawn of the
    // side that just moved.
    if tokens[3] != "-" {
        let sq = square_from_str(tokens[3])
            .ok_or_else(|| FenError::EnPassantSquare(tokens[3].to_string()))?;
        let expected_rank = if pos.side_to_move == WHITE { RANK_6 } else { RANK_3 };
        if sq.rank() != expected_rank {
            return Err(FenError::EnPassantSquare(tokens[3].to_string()));
        }
        pos.ep_square = sq;
    }

    // Clocks.
    if tokens.len() >= 5 {
        pos.halfmove_clock = tokens[4]
            .parse()
            .map_err(|_| FenError::HalfmoveClock(tokens[4].to_string()))?;
    }
    if tokens.len() == 6 {
        let fullmove: u32 = tokens[5]
            .parse()
            .map_err(|_| FenError::FullmoveNumber(tokens[5].to_string()))?;
        pos.halfmove_number = fullmove * 2 + u32::from(pos.side_to_move == BLACK);
    }

    Ok(pos)
}

// to_fen() is the exact inverse of from_fen() for well-formed input.
pub fn to_fen(pos: &Position) -> String {
    let mut fen = String::new();

    for r in (RANK_1..=RANK_8).rev() {
        let mut empty = 0;
        for f in FILE_A..=FILE_H {
            let pc = pos.piece_on(Square::make(f, r));
            if pc == NO_PIECE {
                empty += 1;
            } else {
                if empty > 0 {
                    fen.push_str(&empty.to_string());
                    empty = 0;
                }
                fen.push(piece_to_char(pc));
            }
        }
        if empty > 0 {
            fen.push_str(&empty.to_string());
        }
        if r > RANK_1 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(if pos.side_to_move == WHITE { 'w' } else { 'b' });

    fen.push(' ');
    if pos.castling_rights == NO_CASTLING {
        fen.push('-');
    } else {
        for (cr, ch) in [
            (WHITE_OO, 'K'),
            (WHITE_OOO, 'Q'),
            (BLACK_OO, 'k'),
            (BLACK_OOO, 'q'),
        ] {
            if pos.castling_rights & cr == cr {
                fen.push(ch);
            }
        }
    }

    fen.push(' ');
    if pos.ep_square == Square::NONE {
        fen.push('-');
    } else {
        fen.push_str(&square_to_string(pos.ep_square));
    }

    fen.push_str(&format!(" {}", pos.halfmove_clock));
    fen.push_str(&format!(" {}", pos.halfmove_number / 2));

    fen
}

pub fn piece_from_char(ch: char) -> Option<Piece> {
    let c = if ch.is_ascii_lowercase() { BLACK } else { WHITE };
    piece_type_from_char(ch).map(|pt| Piece::make(c, pt))
}

pub fn piece_type_from_char(ch: char) -> Option<PieceType> {
    match ch.to_ascii_lowercase() {
        'p' => Some(PAWN),
        'n' => Some(KNIGHT),
        'b' => Some(BISHOP),
        'r' => Some(ROOK),
        'q' => Some(QUEEN),
        'k' => Some(KING),
        _ => None,
    }
}

pub fn piece_to_char(pc: Piece) -> char {
    let ch = match pc.piece_type() {
        PAWN => 'p',
        KNIGHT => 'n',
        BISHOP => 'b',
        ROOK => 'r',
        QUEEN => 'q',
        _ => 'k',
    };
    if pc.color() == WHITE {
        ch.to_ascii_uppercase()
    } else {
        ch
    }
}

pub fn square_from_str(s: &str) -> Option<Square> {
    let mut chars = s.chars();
    let file_ch = chars.next()?;
    let rank_ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if !('a'..='h').contains(&file_ch) || !('1'..='8').contains(&rank_ch) {
        return None;
    }
    let f = file_ch as File - 'a' as File;
    let r = rank_ch as Rank - '1' as Rank;
    Some(Square::make(f, r))
}

pub fn square_to_string(s: Square) -> String {
    let file_ch = (b'a' + s.file() as u8) as char;
    let rank_ch = (b'1' + s.rank() as u8) as char;
    format!("{}{}", file_ch, rank_ch)
}
