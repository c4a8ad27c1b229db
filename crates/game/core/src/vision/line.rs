use crate::state::{Dungeon, Position};

/// Cells on the Bresenham line from `from` to `to`, both endpoints included.
pub fn bresenham(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);

    let mut cells = Vec::with_capacity((dx - dy) as usize + 1);
    loop {
        cells.push(Position::new(x, y));
        if x == to.x && y == to.y {
            return cells;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// True when nothing opaque lies strictly between `from` and `to`.
///
/// The endpoints themselves never block, so an opaque target is still visible.
pub fn has_line_of_sight(dungeon: &Dungeon, from: Position, to: Position) -> bool {
    let cells = bresenham(from, to);
    let inner = cells.len().saturating_sub(1);
    cells
        .iter()
        .take(inner)
        .skip(1)
        .all(|&cell| !dungeon.is_opaque(cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_includes_both_endpoints() {
        let cells = bresenham(Position::new(0, 0), Position::new(3, 1));
        assert_eq!(cells.first(), Some(&Position::new(0, 0)));
        assert_eq!(cells.last(), Some(&Position::new(3, 1)));
        assert_eq!(cells.len(), 4);
    }

    #[test]
    fn degenerate_line_is_a_single_cell() {
        assert_eq!(
            bresenham(Position::new(2, 2), Position::new(2, 2)),
            vec![Position::new(2, 2)]
        );
    }

    #[test]
    fn walls_block_only_what_lies_behind_them() {
        let dungeon = Dungeon::from_rows(&["#####", "#.#.#", "#####"]);
        let eye = Position::new(1, 1);
        assert!(has_line_of_sight(&dungeon, eye, Position::new(2, 1)));
        assert!(!has_line_of_sight(&dungeon, eye, Position::new(3, 1)));
    }
}
