#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Picks at most one ship per turn to become a new drop-off.

use halite_fleet_core::{
    Command, ConversionTuning, DropoffRegistry, Position, Ruleset, ShipId, ShipSnapshot,
    TurnContext, WorldView,
};
use tracing::info;

/// Ship chosen to become a drop-off this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conversion {
    /// Ship being converted; it must not be moved this turn.
    pub ship: ShipId,
    /// Cell the new drop-off stands on.
    pub position: Position,
}

impl Conversion {
    /// Host command performing the conversion.
    #[must_use]
    pub const fn command(&self) -> Command {
        Command::ConvertToDropoff { ship: self.ship }
    }
}

/// Evaluates drop-off spacing across the whole fleet.
#[derive(Clone, Debug)]
pub struct ConversionPlanner {
    ruleset: Ruleset,
    tuning: ConversionTuning,
}

impl ConversionPlanner {
    /// Creates a planner for the given rules and spacing knobs.
    #[must_use]
    pub fn new(ruleset: Ruleset, tuning: ConversionTuning) -> Self {
        Self { ruleset, tuning }
    }

    /// Reports whether the stockpile and clock allow any conversion this turn.
    #[must_use]
    pub fn is_affordable(&self, dropoffs: &DropoffRegistry, context: &TurnContext) -> bool {
        let existing = u32::try_from(dropoffs.len()).unwrap_or(u32::MAX);
        let required = self
            .ruleset
            .dropoff_cost
            .saturating_mul(self.tuning.cost_multiplier)
            .saturating_mul(existing);
        context.stockpile >= required
            && context.remaining_turns() > self.tuning.cutoff_turns_remaining
    }

    /// Chooses the ship whose nearest drop-off lies closest to the ideal spacing.
    ///
    /// Ships closer than `ideal - tolerance` to any drop-off are never chosen.
    /// The winner is registered in `dropoffs` before it is returned.
    pub fn evaluate(
        &self,
        ships: &[ShipSnapshot],
        view: &WorldView<'_>,
        dropoffs: &mut DropoffRegistry,
        context: &TurnContext,
    ) -> Option<Conversion> {
        if !self.is_affordable(dropoffs, context) {
            return None;
        }

        let torus = view.torus();
        let ideal = self.tuning.ideal_spacing;
        let closest_allowed = ideal.saturating_sub(self.tuning.spacing_tolerance);

        let mut best: Option<(&ShipSnapshot, u32, u32)> = None;
        for ship in ships {
            let mut nearest = u32::MAX;
            let mut too_close = false;
            for &dropoff in dropoffs.positions() {
                let distance = torus.distance(ship.position, dropoff);
                if distance < closest_allowed {
                    too_close = true;
                    break;
                }
                nearest = nearest.min(distance);
            }
            if too_close || nearest == u32::MAX {
                continue;
            }

            let deviation = nearest.abs_diff(ideal);
            let better = match best {
                None => true,
                Some((_, best_deviation, best_distance)) => {
                    deviation < best_deviation
                        || (deviation == best_deviation && nearest < best_distance)
                }
            };
            if better {
                best = Some((ship, deviation, nearest));
            }
        }

        let (ship, deviation, nearest) = best?;
        if deviation > self.tuning.spacing_tolerance
            || dropoffs.contains(ship.position)
            || view.has_structure(ship.position)
        {
            return None;
        }

        let _ = dropoffs.register(ship.position);
        info!(
            ship = ship.id.get(),
            x = ship.position.x(),
            y = ship.position.y(),
            spacing = nearest,
            "converting ship into drop-off"
        );
        Some(Conversion {
            ship: ship.id,
            position: ship.position,
        })
    }
}
