// SPDX-License-Identifier: GPL-3.0-or-later

//! A chess engine core built on a 0x88 board with piece bitboards:
//! position setup from FEN, incremental make/undo, attack detection,
//! pseudo-legal and legal move generation, and a UCI front end.

pub mod bitboard;
pub mod engine;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod position;
pub mod types;
pub mod uci;
