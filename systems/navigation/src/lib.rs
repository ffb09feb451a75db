#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collision-aware local navigation that turns a ship's mode into one move.
//!
//! A [`PathPlanner`] lives for a single turn. Every plan it hands out claims
//! the chosen destination in its [`ReservationTable`], so ships planned later
//! in the same turn never pick a cell an earlier ship already took.

mod reservation;
mod scan;

pub use reservation::ReservationTable;
pub use scan::richest_in_window;

use halite_fleet_core::{
    Command, Direction, DropoffRegistry, Mode, NavigationTuning, Position, ShipId, ShipSnapshot,
    Torus, TurnContext, WorldView,
};
use rand::Rng;
use tracing::debug;

/// Outcome of planning a single ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plan {
    /// Step in `direction`, ending the turn on `destination`.
    Move {
        /// Direction of travel, [`Direction::Still`] when staying.
        direction: Direction,
        /// Claimed cell the ship ends the turn on.
        destination: Position,
    },
    /// Turn the ship into a drop-off on its current cell.
    Convert,
}

impl Plan {
    /// Host command carrying out the plan for `ship`.
    #[must_use]
    pub fn into_command(self, ship: ShipId) -> Command {
        match self {
            Self::Move { direction, .. } => Command::Move { ship, direction },
            Self::Convert => Command::ConvertToDropoff { ship },
        }
    }
}

/// Per-turn planner resolving modes into moves.
#[derive(Debug)]
pub struct PathPlanner<'a, R> {
    view: WorldView<'a>,
    reservations: ReservationTable<'a>,
    tuning: &'a NavigationTuning,
    context: TurnContext,
    rng: &'a mut R,
}

impl<'a, R: Rng> PathPlanner<'a, R> {
    /// Starts a planning pass with an empty reservation table.
    pub fn new(
        view: WorldView<'a>,
        tuning: &'a NavigationTuning,
        context: TurnContext,
        rng: &'a mut R,
    ) -> Self {
        Self {
            view,
            reservations: ReservationTable::new(view),
            tuning,
            context,
            rng,
        }
    }

    /// Claims made so far this turn.
    #[must_use]
    pub fn reservations(&self) -> &ReservationTable<'a> {
        &self.reservations
    }

    /// Resolves `mode` into a concrete plan for `ship`.
    ///
    /// Converting ships append their cell to `dropoffs`.
    pub fn plan(
        &mut self,
        mode: Mode,
        ship: &ShipSnapshot,
        dropoffs: &mut DropoffRegistry,
    ) -> Plan {
        let plan = match mode {
            Mode::Collect => self.collect(ship.position),
            Mode::Return => self.return_home(ship.position, dropoffs),
            Mode::Convert => {
                let _ = dropoffs.register(ship.position);
                Plan::Convert
            }
            Mode::Stay => self.stay(ship.position),
        };
        debug!(ship = ship.id.get(), ?mode, ?plan, "planned ship");
        plan
    }

    /// Keeps the ship on `source` and claims it.
    pub fn stay(&mut self, source: Position) -> Plan {
        self.claim_move(Direction::Still, source)
    }

    fn collect(&mut self, source: Position) -> Plan {
        let depth = self.tuning.scan_depth(self.context.turn);
        match richest_in_window(&self.view, source, depth, self.tuning.min_worth_halite) {
            Some(target) => self.greedy_search(source, target, self.tuning.search_depth),
            None => self.stay(source),
        }
    }

    fn return_home(&mut self, source: Position, dropoffs: &DropoffRegistry) -> Plan {
        let torus = self.view.torus();
        let Some((target, _)) = dropoffs.nearest(&torus, source) else {
            return self.stay(source);
        };

        let remaining = usize::try_from(self.context.remaining_turns()).unwrap_or(usize::MAX);
        if remaining <= self.context.fleet_size {
            let moves = torus.direct_moves(source, target);
            return match best_of_two(&torus, source, &moves) {
                Some(direction) => {
                    let destination = torus.offset(source, direction);
                    self.claim_move(direction, destination)
                }
                None => self.stay(source),
            };
        }

        self.greedy_search(source, target, self.tuning.search_depth)
    }

    /// Bounded multi-path greedy search from `source` toward `target`.
    ///
    /// Every available first step roots its own path; each of the `depth`
    /// rounds extends every path by its available neighbour closest to the
    /// target. The first path to touch the target wins outright, otherwise
    /// the path ending closest to it does, with ties broken at random. The
    /// winning first step is claimed. With no available first step the ship
    /// stays and claims `source`.
    pub fn greedy_search(&mut self, source: Position, target: Position, depth: u32) -> Plan {
        let torus = self.view.torus();
        let source = torus.normalize(source);
        let target = torus.normalize(target);
        if source == target {
            return self.stay(source);
        }

        let mut paths = Vec::with_capacity(Direction::CARDINALS.len());
        for direction in Direction::CARDINALS {
            let step = torus.offset(source, direction);
            if !self.reservations.is_available(step) {
                continue;
            }
            if step == target {
                return self.claim_move(direction, step);
            }
            paths.push(CandidatePath::new(direction, step));
        }
        if paths.is_empty() {
            return self.stay(source);
        }

        for _ in 0..depth {
            for path in &mut paths {
                let mut closest: Option<(Position, u32)> = None;
                for direction in Direction::CARDINALS {
                    let next = torus.offset(path.frontier, direction);
                    if !self.reservations.is_available(next) || path.has_visited(next) {
                        continue;
                    }
                    if next == target {
                        let (direction, step) = (path.first_direction, path.first_step);
                        return self.claim_move(direction, step);
                    }
                    let distance = torus.distance(next, target);
                    if closest.map_or(true, |(_, best)| distance < best) {
                        closest = Some((next, distance));
                    }
                }
                if let Some((next, _)) = closest {
                    path.extend(next);
                }
            }
        }

        let Some(shortest) = paths
            .iter()
            .map(|path| torus.distance(path.frontier, target))
            .min()
        else {
            return self.stay(source);
        };
        let tied: Vec<&CandidatePath> = paths
            .iter()
            .filter(|path| torus.distance(path.frontier, target) == shortest)
            .collect();
        let pick = self.rng.gen_range(0..tied.len());
        match tied.get(pick) {
            Some(path) => {
                let (direction, step) = (path.first_direction, path.first_step);
                self.claim_move(direction, step)
            }
            None => self.stay(source),
        }
    }

    fn claim_move(&mut self, direction: Direction, destination: Position) -> Plan {
        self.reservations.claim(destination);
        Plan::Move {
            direction,
            destination,
        }
    }
}

#[derive(Debug)]
struct CandidatePath {
    first_direction: Direction,
    first_step: Position,
    frontier: Position,
    visited: Vec<Position>,
}

impl CandidatePath {
    fn new(first_direction: Direction, first_step: Position) -> Self {
        Self {
            first_direction,
            first_step,
            frontier: first_step,
            visited: vec![first_step],
        }
    }

    fn has_visited(&self, position: Position) -> bool {
        self.visited.contains(&position)
    }

    fn extend(&mut self, next: Position) {
        self.visited.push(next);
        self.frontier = next;
    }
}

/// Picks one of up to two axis-aligned `candidates` leaving `source`.
///
/// A step that wraps back onto `source` is rejected in favour of the other;
/// otherwise the step landing closer to `source` wins, the second on ties.
#[must_use]
pub fn best_of_two(torus: &Torus, source: Position, candidates: &[Direction]) -> Option<Direction> {
    match candidates {
        [] => None,
        [only] => Some(*only),
        [first, second, ..] => {
            let first_distance = torus.distance(source, torus.offset(source, *first));
            let second_distance = torus.distance(source, torus.offset(source, *second));
            if first_distance == 0 {
                Some(*second)
            } else if second_distance == 0 || first_distance < second_distance {
                Some(*first)
            } else {
                Some(*second)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_of_two_handles_short_lists() {
        let torus = Torus::new(8, 8);
        let source = Position::new(3, 3);
        assert_eq!(best_of_two(&torus, source, &[]), None);
        assert_eq!(
            best_of_two(&torus, source, &[Direction::East]),
            Some(Direction::East)
        );
    }

    #[test]
    fn best_of_two_prefers_vertical_on_ties() {
        let torus = Torus::new(8, 8);
        assert_eq!(
            best_of_two(
                &torus,
                Position::new(3, 3),
                &[Direction::East, Direction::South]
            ),
            Some(Direction::South)
        );
    }

    #[test]
    fn best_of_two_rejects_steps_that_wrap_onto_source() {
        let torus = Torus::new(1, 8);
        assert_eq!(
            best_of_two(
                &torus,
                Position::new(0, 3),
                &[Direction::South, Direction::East]
            ),
            Some(Direction::South)
        );
        assert_eq!(
            best_of_two(
                &torus,
                Position::new(0, 3),
                &[Direction::East, Direction::North]
            ),
            Some(Direction::North)
        );
    }

    #[test]
    fn candidate_path_tracks_its_own_cells() {
        let mut path = CandidatePath::new(Direction::East, Position::new(1, 0));
        path.extend(Position::new(2, 0));
        assert!(path.has_visited(Position::new(1, 0)));
        assert!(path.has_visited(Position::new(2, 0)));
        assert!(!path.has_visited(Position::new(3, 0)));
        assert_eq!(path.frontier, Position::new(2, 0));
    }
}
