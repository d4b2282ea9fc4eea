// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Instant;

use crate::fen;
use crate::movegen::{self, MoveList};
use crate::position::Position;

/// Counts the leaf nodes of the legal-move tree below `pos`.
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut list = MoveList::new();
    movegen::generate_legal(&mut list, pos);
    if depth == 1 {
        return list.len() as u64;
    }
    let mut nodes = 0;
    for i in 0..list.len() {
        let m = list[i].m;
        pos.make_move(m);
        nodes += perft(pos, depth - 1);
        pos.undo_move(m);
    }
    nodes
}

/// Walks the starting position one ply at a time up to `depth`, printing
/// node counts and throughput per ply.
pub fn run(depth: u32) {
    let mut pos = fen::starting_position();
    for d in 1..=depth {
        let start = Instant::now();
        let nodes = perft(&mut pos, d);
        let seconds = start.elapsed().as_secs_f64();
        let nps = if seconds > 0.0 {
            nodes as f64 / seconds
        } else {
            0.0
        };
        println!("perft({}) = {} ({:.3}s, {:.0} nps)", d, nodes, seconds, nps);
    }
}
