#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-ship state machine that picks a behavioural mode every turn.
//!
//! The only state carried between turns is the set of ships committed to
//! returning home; every other input is read fresh from the world view.

use std::collections::BTreeSet;

use halite_fleet_core::{
    DecisionTuning, DropoffRegistry, Mode, Ruleset, ShipId, ShipSnapshot, TurnContext, WorldView,
};
use tracing::debug;

/// Classifies ships into [`Mode`]s and remembers committed returns.
#[derive(Clone, Debug)]
pub struct DecisionEngine {
    ruleset: Ruleset,
    tuning: DecisionTuning,
    returning: BTreeSet<ShipId>,
}

impl DecisionEngine {
    /// Creates an engine with no ship committed to returning.
    #[must_use]
    pub fn new(ruleset: Ruleset, tuning: DecisionTuning) -> Self {
        Self {
            ruleset,
            tuning,
            returning: BTreeSet::new(),
        }
    }

    /// Reports whether `ship` is committed to returning home.
    #[must_use]
    pub fn is_returning(&self, ship: ShipId) -> bool {
        self.returning.contains(&ship)
    }

    /// Marks `ship` as committed to returning home.
    pub fn mark_returning(&mut self, ship: ShipId) {
        let _ = self.returning.insert(ship);
    }

    /// Forgets return commitments of ships that are no longer alive.
    pub fn retain_alive(&mut self, alive: &[ShipSnapshot]) {
        self.returning
            .retain(|id| alive.iter().any(|ship| ship.id == *id));
    }

    /// Picks the mode for `ship` this turn.
    ///
    /// Rules are evaluated in priority order: emergency conversion of a full
    /// hold, the end-of-game clock, the cost of leaving the current cell,
    /// an existing return commitment, a new commitment for a nearly full
    /// hold, and finally harvesting.
    pub fn classify(
        &mut self,
        ship: &ShipSnapshot,
        view: &WorldView<'_>,
        dropoffs: &DropoffRegistry,
        context: &TurnContext,
    ) -> Mode {
        let mode = self.decide(ship, view, dropoffs, context);
        debug!(
            ship = ship.id.get(),
            cargo = ship.cargo,
            returning = self.is_returning(ship.id),
            ?mode,
            "classified ship"
        );
        mode
    }

    fn decide(
        &mut self,
        ship: &ShipSnapshot,
        view: &WorldView<'_>,
        dropoffs: &DropoffRegistry,
        context: &TurnContext,
    ) -> Mode {
        let torus = view.torus();
        let cell = view.cell(ship.position);
        let on_dropoff = dropoffs.contains(ship.position);
        let remaining = context.remaining_turns();

        // Normally unreachable: full ships are marked returning well before the hold fills.
        let reserve = self
            .ruleset
            .dropoff_cost
            .saturating_mul(self.tuning.full_convert_cost_multiplier);
        if context.stockpile > reserve
            && ship.is_full(&self.ruleset, self.tuning.full_fraction)
            && !cell.structure
        {
            return Mode::Convert;
        }

        if let Some((_, distance)) = dropoffs.nearest(&torus, ship.position) {
            if distance.saturating_add(self.tuning.return_safety_margin) >= remaining {
                return Mode::Return;
            }
        }

        if self.ruleset.move_cost(cell.halite) > ship.cargo && !on_dropoff {
            return Mode::Stay;
        }

        let fraction = ship.cargo_fraction(&self.ruleset);
        if self.is_returning(ship.id) {
            if fraction < self.tuning.abandon_cargo_fraction
                && remaining > self.tuning.abandon_min_turns_remaining
            {
                let _ = self.returning.remove(&ship.id);
                return self.harvest_mode(cell.halite);
            }
            if on_dropoff {
                let _ = self.returning.remove(&ship.id);
                return Mode::Collect;
            }
            return Mode::Return;
        }

        if fraction > self.tuning.high_cargo_fraction {
            self.mark_returning(ship.id);
            return Mode::Return;
        }

        self.harvest_mode(cell.halite)
    }

    fn harvest_mode(&self, halite: u32) -> Mode {
        if halite < self.tuning.min_worth_halite {
            Mode::Collect
        } else {
            Mode::Stay
        }
    }
}
