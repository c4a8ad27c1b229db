use super::Position;

/// Canonical terrain classes for dungeon tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TileKind {
    Floor,
    Wall,
    StairsUp,
    StairsDown,
}

impl TileKind {
    /// Walls are the only tiles that block movement.
    pub fn is_walkable(self) -> bool {
        !matches!(self, TileKind::Wall)
    }

    /// Walls are the only tiles that block line of sight.
    pub fn is_opaque(self) -> bool {
        matches!(self, TileKind::Wall)
    }

    pub fn is_stairs(self) -> bool {
        matches!(self, TileKind::StairsUp | TileKind::StairsDown)
    }
}

/// A single grid cell. Only `seen` changes after generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub kind: TileKind,
    pub seen: bool,
}

impl Tile {
    pub const WALL: Self = Self::new(TileKind::Wall);
    pub const FLOOR: Self = Self::new(TileKind::Floor);

    pub const fn new(kind: TileKind) -> Self {
        Self { kind, seen: false }
    }
}

/// Row-major tile grid for one dungeon level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dungeon {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Dungeon {
    /// Creates a grid where every tile is a wall.
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::WALL; width as usize * height as usize],
        }
    }

    /// Builds a grid from text rows: `#` wall, `.` floor, `<` stairs up, `>` stairs down.
    ///
    /// Any other character is read as floor. Rows shorter than the first row are
    /// padded with walls.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0) as u32;
        let mut dungeon = Self::filled(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().take(width as usize).enumerate() {
                let kind = match glyph {
                    '#' => TileKind::Wall,
                    '<' => TileKind::StairsUp,
                    '>' => TileKind::StairsDown,
                    _ => TileKind::Floor,
                };
                dungeon.set_kind(Position::new(x as i32, y as i32), kind);
            }
        }
        dungeon
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.index(position).map(|index| &self.tiles[index])
    }

    pub fn kind(&self, position: Position) -> Option<TileKind> {
        self.tile(position).map(|tile| tile.kind)
    }

    /// In bounds and not a wall.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.kind(position).is_some_and(TileKind::is_walkable)
    }

    /// Out-of-bounds cells count as opaque.
    pub fn is_opaque(&self, position: Position) -> bool {
        self.kind(position).is_none_or(TileKind::is_opaque)
    }

    /// Overwrites the terrain of one tile. Out-of-bounds writes are ignored.
    pub fn set_kind(&mut self, position: Position, kind: TileKind) {
        if let Some(index) = self.index(position) {
            self.tiles[index].kind = kind;
        }
    }

    /// Flags the given tiles as seen; returns how many changed.
    pub fn mark_seen<'a>(&mut self, positions: impl IntoIterator<Item = &'a Position>) -> usize {
        let mut changed = 0;
        for position in positions {
            if let Some(index) = self.index(*position)
                && !self.tiles[index].seen
            {
                self.tiles[index].seen = true;
                changed += 1;
            }
        }
        changed
    }

    /// Iterates every position of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width as i32;
        (0..self.height as i32).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Iterates `(position, tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        self.positions().zip(self.tiles.iter())
    }
}
