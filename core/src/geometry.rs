//! Wrap-around coordinate arithmetic for the Halite map.

use crate::{Direction, Position};

/// Dimensions of a toroidal grid where leaving one edge re-enters on the opposite edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Torus {
    width: u32,
    height: u32,
}

impl Torus {
    /// Creates a torus with the provided dimensions.
    ///
    /// # Panics
    ///
    /// Panics when either dimension is zero or does not fit into an `i32`.
    /// Host input is validated before a torus is built, so reaching this is a
    /// programming error.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "torus must be non-empty");
        assert!(
            i32::try_from(width).is_ok() && i32::try_from(height).is_ok(),
            "torus dimensions must fit in i32"
        );
        Self { width, height }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Wraps a position into `[0, width) × [0, height)`.
    #[must_use]
    pub fn normalize(&self, position: Position) -> Position {
        Position::new(
            position.x().rem_euclid(self.width as i32),
            position.y().rem_euclid(self.height as i32),
        )
    }

    /// Neighbouring cell reached by stepping once in `direction`.
    ///
    /// [`Direction::Still`] yields the normalised input position.
    #[must_use]
    pub fn offset(&self, position: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        self.normalize(Position::new(position.x() + dx, position.y() + dy))
    }

    /// Manhattan distance measured along the shorter way around each axis.
    #[must_use]
    pub fn distance(&self, a: Position, b: Position) -> u32 {
        let a = self.normalize(a);
        let b = self.normalize(b);
        let dx = a.x().abs_diff(b.x());
        let dy = a.y().abs_diff(b.y());
        dx.min(self.width - dx) + dy.min(self.height - dy)
    }

    /// Cells on the square ring at Chebyshev distance `depth` from `center`.
    ///
    /// The ring is swept top edge, bottom edge, west edge, then east edge.
    /// Depth zero yields the centre alone. On grids narrower than the ring,
    /// wrapped cells may appear more than once.
    #[must_use]
    pub fn ring_outline(&self, center: Position, depth: u32) -> Vec<Position> {
        if depth == 0 {
            return vec![self.normalize(center)];
        }

        let reach = depth as i32;
        let mut ring = Vec::with_capacity(8 * depth as usize);
        for dx in -reach..=reach {
            ring.push(self.normalize(Position::new(center.x() + dx, center.y() - reach)));
        }
        for dx in -reach..=reach {
            ring.push(self.normalize(Position::new(center.x() + dx, center.y() + reach)));
        }
        for dy in (1 - reach)..reach {
            ring.push(self.normalize(Position::new(center.x() - reach, center.y() + dy)));
        }
        for dy in (1 - reach)..reach {
            ring.push(self.normalize(Position::new(center.x() + reach, center.y() + dy)));
        }
        ring
    }

    /// Axis-aligned directions that shorten the wrapped distance toward `to`.
    ///
    /// Returns at most one horizontal direction followed by at most one
    /// vertical direction, ignoring every collision concern.
    #[must_use]
    pub fn direct_moves(&self, from: Position, to: Position) -> Vec<Direction> {
        let from = self.normalize(from);
        let to = self.normalize(to);
        let mut moves = Vec::with_capacity(2);

        let dx = from.x().abs_diff(to.x());
        let wrapped_dx = self.width - dx;
        if from.x() < to.x() {
            moves.push(if dx > wrapped_dx {
                Direction::West
            } else {
                Direction::East
            });
        } else if from.x() > to.x() {
            moves.push(if dx < wrapped_dx {
                Direction::West
            } else {
                Direction::East
            });
        }

        let dy = from.y().abs_diff(to.y());
        let wrapped_dy = self.height - dy;
        if from.y() < to.y() {
            moves.push(if dy > wrapped_dy {
                Direction::North
            } else {
                Direction::South
            });
        } else if from.y() > to.y() {
            moves.push(if dy < wrapped_dy {
                Direction::North
            } else {
                Direction::South
            });
        }

        moves
    }

    /// Row-major index of a position after normalisation.
    #[must_use]
    pub fn index(&self, position: Position) -> usize {
        let position = self.normalize(position);
        position.y() as usize * self.width as usize + position.x() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_wraps_across_edges() {
        let torus = Torus::new(32, 32);
        assert_eq!(
            torus.offset(Position::new(0, 0), Direction::West),
            Position::new(31, 0)
        );
        assert_eq!(
            torus.offset(Position::new(0, 0), Direction::North),
            Position::new(0, 31)
        );
        assert_eq!(
            torus.offset(Position::new(31, 31), Direction::East),
            Position::new(0, 31)
        );
    }

    #[test]
    fn distance_takes_shorter_way_around() {
        let torus = Torus::new(32, 32);
        assert_eq!(torus.distance(Position::new(0, 0), Position::new(31, 0)), 1);
        assert_eq!(torus.distance(Position::new(0, 0), Position::new(16, 16)), 32);
        assert_eq!(torus.distance(Position::new(2, 3), Position::new(5, 1)), 5);
    }

    #[test]
    fn ring_outline_has_perimeter_cells_only() {
        let torus = Torus::new(32, 32);
        let center = Position::new(10, 10);
        for depth in 1..=4 {
            let ring = torus.ring_outline(center, depth);
            assert_eq!(ring.len(), 8 * depth as usize);
            for cell in &ring {
                let chebyshev = (cell.x() - center.x())
                    .abs()
                    .max((cell.y() - center.y()).abs());
                assert_eq!(chebyshev, depth as i32);
            }
        }
    }

    #[test]
    fn direct_moves_prefer_wrapped_route() {
        let torus = Torus::new(32, 32);
        assert_eq!(
            torus.direct_moves(Position::new(0, 0), Position::new(31, 0)),
            vec![Direction::West]
        );
        assert_eq!(
            torus.direct_moves(Position::new(3, 3), Position::new(5, 1)),
            vec![Direction::East, Direction::North]
        );
        assert!(torus
            .direct_moves(Position::new(4, 4), Position::new(4, 4))
            .is_empty());
    }
}
