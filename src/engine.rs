// SPDX-License-Identifier: GPL-3.0-or-later

use crate::position::Position;

/// The seam between the protocol layer and the engine proper. The
/// protocol layer parses commands and hands over plain data; results
/// travel back the same way.
pub trait Engine {
    fn initialize(&mut self);
    fn ready(&mut self);
    fn set_option(&mut self, name: &str, value: Option<&str>);
    fn new_game(&mut self);
    fn set_position(&mut self, pos: Position);
    fn start(&mut self);
    fn stop(&mut self);
    fn ponder_hit(&mut self);
    fn quit(&mut self);
}

/// The default engine. Search and evaluation are not implemented yet,
/// so the thinking entry points do nothing.
pub struct Cadence {
    position: Position,
}

impl Cadence {
    pub fn new() -> Cadence {
        Cadence {
            position: crate::fen::starting_position(),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Cadence::new()
    }
}

impl Engine for Cadence {
    fn initialize(&mut self) {}

    fn ready(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: Option<&str>) {}

    fn new_game(&mut self) {
        self.position = crate::fen::starting_position();
    }

    fn set_position(&mut self, pos: Position) {
        self.position = pos;
    }

    // TODO: iterative-deepening search.
    fn start(&mut self) {}

    fn stop(&mut self) {}

    fn ponder_hit(&mut self) {}

    fn quit(&mut self) {}
}
