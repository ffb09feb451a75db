#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fleet-size budget responsible for emitting ship spawn commands.

use halite_fleet_core::{Command, Ruleset, SpawnTuning, TurnContext};
use tracing::info;

/// Decides once per turn whether the shipyard builds a ship.
#[derive(Clone, Debug)]
pub struct SpawnBudget {
    ship_cost: u32,
    tuning: SpawnTuning,
    fleet_cap: u32,
}

impl SpawnBudget {
    /// Creates a budget starting at the configured fleet cap.
    #[must_use]
    pub fn new(ruleset: &Ruleset, tuning: SpawnTuning) -> Self {
        Self {
            ship_cost: ruleset.ship_cost,
            fleet_cap: tuning.initial_fleet_cap,
            tuning,
        }
    }

    /// Fleet size above which no ship is built.
    #[must_use]
    pub const fn fleet_cap(&self) -> u32 {
        self.fleet_cap
    }

    /// Emits a spawn command when the fleet, stockpile and clock allow it.
    ///
    /// `spendable` is the stockpile left after this turn's other spending and
    /// `shipyard_free` reports that no ship sits on or moves onto the shipyard.
    /// The cap shrinks after a spawn that fills it and on every decay turn.
    pub fn handle(
        &mut self,
        context: &TurnContext,
        spendable: u32,
        shipyard_free: bool,
        out: &mut Vec<Command>,
    ) {
        let fleet = u32::try_from(context.fleet_size).unwrap_or(u32::MAX);
        if shipyard_free && self.can_spawn(fleet, spendable, context) {
            out.push(Command::SpawnShip);
            info!(
                turn = context.turn,
                fleet = fleet.saturating_add(1),
                cap = self.fleet_cap,
                "spawning ship"
            );
            if fleet.saturating_add(1) >= self.fleet_cap
                && self.fleet_cap > self.tuning.fleet_cap_floor
            {
                self.fleet_cap -= 1;
            }
        }

        if context.turn.checked_rem(self.tuning.cap_decay_interval) == Some(0) {
            self.fleet_cap = self.fleet_cap.saturating_sub(1);
        }
    }

    fn can_spawn(&self, fleet: u32, spendable: u32, context: &TurnContext) -> bool {
        let reserve = self.ship_cost.saturating_mul(self.tuning.cost_multiplier);
        fleet < self.fleet_cap
            && spendable >= reserve
            && context.remaining_turns() > self.tuning.stop_turns_remaining
    }
}
