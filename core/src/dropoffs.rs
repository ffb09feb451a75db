use crate::{Position, Torus};

/// Ordered, append-only set of the owner's drop-off positions.
///
/// The home shipyard is always the first entry, so the registry is never
/// empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropoffRegistry {
    positions: Vec<Position>,
}

impl DropoffRegistry {
    /// Creates a registry containing only the home shipyard.
    #[must_use]
    pub fn new(home: Position) -> Self {
        Self {
            positions: vec![home],
        }
    }

    /// Registered positions in the order they were added.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of registered drop-offs, home included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Reports whether `position` is a registered drop-off.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }

    /// Appends `position`, returning `false` when it was already registered.
    pub fn register(&mut self, position: Position) -> bool {
        if self.contains(position) {
            return false;
        }
        self.positions.push(position);
        true
    }

    /// Closest drop-off to `from` and its distance; the earliest entry wins ties.
    #[must_use]
    pub fn nearest(&self, torus: &Torus, from: Position) -> Option<(Position, u32)> {
        let mut best: Option<(Position, u32)> = None;
        for &candidate in &self.positions {
            let distance = torus.distance(from, candidate);
            match best {
                Some((_, best_distance)) if best_distance <= distance => {}
                _ => best = Some((candidate, distance)),
            }
        }
        best
    }
}
