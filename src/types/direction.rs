use super::{Color, Square, WHITE};

/// A board step in the 0x88 square scheme: one rank is 16 slots wide, so
/// stepping off the board in any direction always sets a bit of 0x88.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction(pub i32);

impl Direction {
    pub const NORTH: Direction = Direction(16);
    pub const EAST: Direction = Direction(1);
    pub const SOUTH: Direction = Direction(-16);
    pub const WEST: Direction = Direction(-1);

    pub const NORTH_EAST: Direction = Direction(17);
    pub const NORTH_WEST: Direction = Direction(15);
    pub const SOUTH_EAST: Direction = Direction(-15);
    pub const SOUTH_WEST: Direction = Direction(-17);
}

impl std::ops::Neg for Direction {
    type Output = Self;
    fn neg(self) -> Self {
        Direction(-self.0)
    }
}

impl std::ops::Add<Direction> for Square {
    type Output = Square;
    fn add(self, rhs: Direction) -> Self {
        Square(u32::wrapping_add(self.0, rhs.0 as u32))
    }
}

impl std::ops::Sub<Direction> for Square {
    type Output = Square;
    fn sub(self, rhs: Direction) -> Self {
        Square(u32::wrapping_sub(self.0, rhs.0 as u32))
    }
}

impl std::ops::AddAssign<Direction> for Square {
    fn add_assign(&mut self, rhs: Direction) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign<Direction> for Square {
    fn sub_assign(&mut self, rhs: Direction) {
        *self = *self - rhs;
    }
}

// The push direction of a pawn of the given color.
pub fn pawn_push(c: Color) -> Direction {
    if c == WHITE {
        Direction::NORTH
    } else {
        Direction::SOUTH
    }
}

// Capture directions of a pawn, indexed by the pawn's color.
pub const PAWN_CAPTURES: [[Direction; 2]; 2] = [
    [Direction::NORTH_EAST, Direction::NORTH_WEST],
    [Direction::SOUTH_EAST, Direction::SOUTH_WEST],
];

pub const KNIGHT_DIRECTIONS: [Direction; 8] = [
    Direction(2 * Direction::NORTH.0 + Direction::EAST.0),
    Direction(2 * Direction::NORTH.0 + Direction::WEST.0),
    Direction(Direction::NORTH.0 + 2 * Direction::EAST.0),
    Direction(Direction::NORTH.0 + 2 * Direction::WEST.0),
    Direction(2 * Direction::SOUTH.0 + Direction::EAST.0),
    Direction(2 * Direction::SOUTH.0 + Direction::WEST.0),
    Direction(Direction::SOUTH.0 + 2 * Direction::EAST.0),
    Direction(Direction::SOUTH.0 + 2 * Direction::WEST.0),
];

pub const BISHOP_DIRECTIONS: [Direction; 4] = [
    Direction::NORTH_EAST,
    Direction::NORTH_WEST,
    Direction::SOUTH_EAST,
    Direction::SOUTH_WEST,
];

pub const ROOK_DIRECTIONS: [Direction; 4] = [
    Direction::NORTH,
    Direction::EAST,
    Direction::SOUTH,
    Direction::WEST,
];

pub const QUEEN_DIRECTIONS: [Direction; 8] = [
    Direction::NORTH,
    Direction::EAST,
    Direction::SOUTH,
    Direction::WEST,
    Direction::NORTH_EAST,
    Direction::NORTH_WEST,
    Direction::SOUTH_EAST,
    Direction::SOUTH_WEST,
];

pub const KING_DIRECTIONS: [Direction; 8] = QUEEN_DIRECTIONS;
