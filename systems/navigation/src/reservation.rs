use std::collections::HashSet;

use halite_fleet_core::{Position, WorldView};

/// Destinations claimed by the owner's ships during a single turn.
///
/// A table is created empty at the start of the planning pass and dropped
/// with it. Claims are never released.
#[derive(Clone, Debug)]
pub struct ReservationTable<'a> {
    view: WorldView<'a>,
    claimed: HashSet<Position>,
}

impl<'a> ReservationTable<'a> {
    /// Creates an empty table that consults `view` for occupancy.
    #[must_use]
    pub fn new(view: WorldView<'a>) -> Self {
        Self {
            view,
            claimed: HashSet::new(),
        }
    }

    /// Reserves `position` for the rest of the turn. Claiming twice is a no-op.
    pub fn claim(&mut self, position: Position) {
        let position = self.view.torus().normalize(position);
        let _ = self.claimed.insert(position);
    }

    /// Reports whether a ship already claimed `position` this turn.
    #[must_use]
    pub fn is_claimed(&self, position: Position) -> bool {
        let position = self.view.torus().normalize(position);
        self.claimed.contains(&position)
    }

    /// Reports whether `position` is neither claimed nor occupied by any ship.
    #[must_use]
    pub fn is_available(&self, position: Position) -> bool {
        !self.is_claimed(position) && !self.view.is_occupied(position)
    }

    /// Number of distinct claimed positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    /// Reports whether nothing has been claimed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
