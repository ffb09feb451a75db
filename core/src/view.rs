use crate::{Position, Torus};

/// Snapshot of a single map cell for the current turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Halite resting on the cell.
    pub halite: u32,
    /// Whether any ship, friendly or hostile, sits on the cell.
    pub occupied: bool,
    /// Whether a shipyard or drop-off stands on the cell.
    pub structure: bool,
}

impl Cell {
    /// Creates an empty, unoccupied cell holding `halite`.
    #[must_use]
    pub const fn with_halite(halite: u32) -> Self {
        Self {
            halite,
            occupied: false,
            structure: false,
        }
    }
}

/// Read-only view of the map used by every planning system.
#[derive(Clone, Copy, Debug)]
pub struct WorldView<'a> {
    torus: Torus,
    cells: &'a [Cell],
}

impl<'a> WorldView<'a> {
    /// Captures a view backed by row-major `cells`.
    ///
    /// Cells missing from a short slice read as empty and unoccupied.
    #[must_use]
    pub fn new(torus: Torus, cells: &'a [Cell]) -> Self {
        Self { torus, cells }
    }

    /// Geometry of the underlying map.
    #[must_use]
    pub const fn torus(&self) -> Torus {
        self.torus
    }

    /// Snapshot of the cell at `position`.
    #[must_use]
    pub fn cell(&self, position: Position) -> Cell {
        self.cells
            .get(self.torus.index(position))
            .copied()
            .unwrap_or_default()
    }

    /// Halite resting at `position`.
    #[must_use]
    pub fn halite(&self, position: Position) -> u32 {
        self.cell(position).halite
    }

    /// Reports whether any ship occupies `position`.
    #[must_use]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.cell(position).occupied
    }

    /// Reports whether a shipyard or drop-off stands on `position`.
    #[must_use]
    pub fn has_structure(&self, position: Position) -> bool {
        self.cell(position).structure
    }
}
