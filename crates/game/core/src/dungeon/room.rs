use crate::state::Position;

/// Axis-aligned room rectangle in tile coordinates.
///
/// `(x1, y1)` and `(x2, y2)` are the outer corners; the carved interior excludes
/// the first row and column, so adjacent rooms always keep a wall between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Room {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub const fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Bounding-box overlap test, inclusive of edges.
    pub const fn intersects(&self, other: &Room) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    /// Positions carved to floor.
    pub fn interior(&self) -> impl Iterator<Item = Position> + '_ {
        ((self.y1 + 1)..self.y2)
            .flat_map(move |y| ((self.x1 + 1)..self.x2).map(move |x| Position::new(x, y)))
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x > self.x1 && position.x < self.x2 && position.y > self.y1 && position.y < self.y2
    }
}
