// SPDX-License-Identifier: GPL-3.0-or-later

use parking_lot::Mutex;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::engine::Engine;
use crate::fen;
use crate::movegen::{self, MoveList};
use crate::perft;
use crate::position::Position;
use crate::types::{Move, BISHOP, KNIGHT, PROMOTION, QUEEN, ROOK};

pub fn engine_info(to_uci: bool) -> String {
    if to_uci {
        format!(
            "id name cadence {}\nid author the cadence developers",
            env!("CARGO_PKG_VERSION")
        )
    } else {
        format!("cadence {}", env!("CARGO_PKG_VERSION"))
    }
}

/// A move in coordinate notation: origin square, target square and, for
/// promotions, the lowercase promotion letter.
pub fn move_to_string(m: Move) -> String {
    let mut s = format!(
        "{}{}",
        fen::square_to_string(m.from()),
        fen::square_to_string(m.to())
    );
    if m.move_type() == PROMOTION {
        s.push(match m.promotion() {
            QUEEN => 'q',
            ROOK => 'r',
            BISHOP => 'b',
            KNIGHT => 'n',
            _ => unreachable!("invalid promotion piece type"),
        });
    }
    s
}

/// Matches a coordinate-notation token against the legal moves of the
/// position. Returns None if the token names no legal move.
pub fn parse_move(pos: &mut Position, token: &str) -> Option<Move> {
    let mut list = MoveList::new();
    movegen::generate_legal(&mut list, pos);
    let found = list.iter().find(|&m| move_to_string(m) == token);
    found
}

/// One text-protocol session: reads commands from `reader`, drives the
/// engine, and writes replies through a shared writer handle (the handle
/// a search thread would also report through).
pub struct Session<R, W, E> {
    reader: R,
    writer: Arc<Mutex<W>>,
    engine: E,
    position: Position,
    debug: bool,
}

impl<R: BufRead, W: Write, E: Engine> Session<R, W, E> {
    pub fn new(reader: R, writer: W, engine: E) -> Session<R, W, E> {
        Session {
            reader,
            writer: Arc::new(Mutex::new(writer)),
            engine,
            position: fen::starting_position(),
            debug: false,
        }
    }

    pub fn shared_writer(&self) -> Arc<Mutex<W>> {
        Arc::clone(&self.writer)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn run(&mut self) -> io::Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                self.engine.quit();
                return Ok(());
            }
            let input = line.trim();
            let (command, args) = match input.split_once(char::is_whitespace) {
                Some((c, a)) => (c, a.trim()),
                None => (input, ""),
            };
            match command {
                "" => continue,
                "uci" => {
                    self.engine.initialize();
                    self.send(&engine_info(true))?;
                    self.send("uciok")?;
                }
                "debug" => self.parse_debug(args)?,
                "isready" => {
                    self.engine.ready();
                    self.send("readyok")?;
                }
                "setoption" => self.parse_setoption(args)?,
                "register" => self.send_debug("Unsupported command: register")?,
                "ucinewgame" => {
                    self.engine.new_game();
                    self.position = fen::starting_position();
                }
                "position" => self.parse_position(args)?,
                "go" => self.parse_go(args)?,
                "stop" => self.engine.stop(),
                "ponderhit" => self.engine.ponder_hit(),
                "quit" => {
                    self.engine.quit();
                    return Ok(());
                }
                _ => self.send_debug(&format!("Unknown command: {}", command))?,
            }
        }
    }

    fn send(&self, line: &str) -> io::Result<()> {
        let mut w = self.writer.lock();
        writeln!(w, "{}", line)?;
        w.flush()
    }

    fn send_debug(&self, msg: &str) -> io::Result<()> {
        if self.debug {
            self.send(&format!("info string {}", msg))?;
        }
        Ok(())
    }

    fn parse_debug(&mut self, args: &str) -> io::Result<()> {
        match args {
            "" => self.debug = !self.debug,
            "on" => self.debug = true,
            "off" => self.debug = false,
            _ => self.send_debug(&format!("Unknown argument: {}", args))?,
        }
        Ok(())
    }

    fn parse_setoption(&mut self, args: &str) -> io::Result<()> {
        let Some(rest) = args.strip_prefix("name") else {
            return self.send_debug("Argument required");
        };
        let rest = rest.trim();
        match rest.split_once(" value ") {
            Some((name, value)) => {
                self.engine.set_option(name.trim(), Some(value.trim()));
            }
            None => self.engine.set_option(rest, None),
        }
        Ok(())
    }

    fn parse_position(&mut self, args: &str) -> io::Result<()> {
        let (setup, moves) = match args.split_once("moves") {
            Some((s, m)) => (s.trim(), m.trim()),
            None => (args, ""),
        };

        let mut pos = if setup == "startpos" {
            fen::starting_position()
        } else if let Some(fen_str) = setup.strip_prefix("fen") {
            match fen::from_fen(fen_str.trim()) {
                Ok(pos) => pos,
                Err(e) => return self.send_debug(&e.to_string()),
            }
        } else {
            return self.send_debug(&format!("Unknown argument: {}", setup));
        };

        for token in moves.split_whitespace() {
            match parse_move(&mut pos, token) {
                Some(m) => pos.make_move(m),
                None => return self.send_debug(&format!("Illegal move: {}", token)),
            }
        }

        self.engine.set_position(pos.clone());
        self.position = pos;
        Ok(())
    }

    fn parse_go(&mut self, args: &str) -> io::Result<()> {
        if let Some(rest) = args.strip_prefix("perft") {
            let Ok(depth) = rest.trim().parse::<u32>() else {
                return self.send_debug("Argument required");
            };
            let mut pos = self.position.clone();
            let nodes = perft::perft(&mut pos, depth);
            return self.send(&format!("info depth {} nodes {}", depth, nodes));
        }

        self.engine.start();
        self.send_debug("search is not implemented")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Cadence;
    use crate::types::{Square, NO_PIECE, WHITE, W_PAWN};
    use std::io::Cursor;

    fn run_session(input: &str) -> (Session<Cursor<String>, Vec<u8>, Cadence>, String) {
        let mut session = Session::new(Cursor::new(input.to_string()), Vec::new(), Cadence::new());
        session.run().unwrap();
        let output = String::from_utf8(session.shared_writer().lock().clone()).unwrap();
        (session, output)
    }

    #[test]
    fn test_uci_handshake() {
        let (_, output) = run_session("uci\nisready\nquit\n");
        assert!(output.contains("id name cadence"));
        assert!(output.contains("uciok"));
        assert!(output.contains("readyok"));
    }

    #[test]
    fn test_position_startpos_with_moves() {
        let (session, _) = run_session("position startpos moves e2e4 c7c5\nquit\n");
        let pos = session.position();
        assert_eq!(pos.piece_on(Square::E4), W_PAWN);
        assert_eq!(pos.piece_on(Square::E2), NO_PIECE);
        assert_eq!(pos.piece_on(Square::C7), NO_PIECE);
        assert_eq!(pos.side_to_move, WHITE);
    }

    #[test]
    fn test_position_fen() {
        let (session, _) =
            run_session("position fen 4k3/8/8/8/8/8/8/4K3 b - - 3 9\nquit\n");
        assert_eq!(fen::to_fen(session.position()), "4k3/8/8/8/8/8/8/4K3 b - - 3 9");
    }

    #[test]
    fn test_illegal_move_is_reported() {
        let (session, output) =
            run_session("debug on\nposition startpos moves e2e5\nquit\n");
        assert!(output.contains("Illegal move: e2e5"));
        // The session position is left untouched.
        assert_eq!(fen::to_fen(session.position()), fen::STARTING_FEN);
    }

    #[test]
    fn test_go_perft() {
        let (_, output) = run_session("position startpos\ngo perft 2\nquit\n");
        assert!(output.contains("info depth 2 nodes 400"));
    }

    #[test]
    fn test_unknown_command_is_debug_only() {
        let (_, quiet) = run_session("banana\nquit\n");
        assert!(!quiet.contains("Unknown command"));
        let (_, loud) = run_session("debug on\nbanana\nquit\n");
        assert!(loud.contains("Unknown command: banana"));
    }

    #[test]
    fn test_move_to_string() {
        let m = Move::make(
            crate::types::NORMAL,
            Square::E2,
            Square::E4,
            W_PAWN,
            NO_PIECE,
            crate::types::NO_PIECE_TYPE,
        );
        assert_eq!(move_to_string(m), "e2e4");

        let p = Move::make(PROMOTION, Square::B7, Square::B8, W_PAWN, NO_PIECE, QUEEN);
        assert_eq!(move_to_string(p), "b7b8q");
    }

    #[test]
    fn test_parse_move_matches_promotions() {
        let mut pos = fen::from_fen("8/5P1k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let m = parse_move(&mut pos, "f7f8n").unwrap();
        assert_eq!(m.move_type(), PROMOTION);
        assert_eq!(m.promotion(), KNIGHT);
        assert!(parse_move(&mut pos, "f7f8x").is_none());
    }
}
