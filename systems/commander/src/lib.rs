#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-turn orchestration of the decision, navigation, conversion and
//! spawning systems.
//!
//! The commander owns every piece of state that outlives a turn: return
//! commitments, the drop-off registry, the spawn budget and the seeded
//! random source. Reservations live only inside [`Commander::plan_turn`].

use halite_fleet_core::{Command, DropoffRegistry, Mode, Ruleset, ShipId, Tuning};
use halite_fleet_system_conversion::ConversionPlanner;
use halite_fleet_system_decision::DecisionEngine;
use halite_fleet_system_navigation::{PathPlanner, Plan};
use halite_fleet_system_spawning::SpawnBudget;
use halite_fleet_world::{query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Configuration parameters required to construct the commander.
#[derive(Clone, Debug)]
pub struct Config {
    tuning: Tuning,
    seed: u64,
}

impl Config {
    /// Creates a configuration from tuning knobs and the tie-break seed.
    #[must_use]
    pub const fn new(tuning: Tuning, seed: u64) -> Self {
        Self { tuning, seed }
    }
}

/// Plans every command the bot submits for a turn.
#[derive(Debug)]
pub struct Commander {
    ruleset: Ruleset,
    tuning: Tuning,
    decision: DecisionEngine,
    conversion: ConversionPlanner,
    spawning: SpawnBudget,
    dropoffs: DropoffRegistry,
    rng: ChaCha8Rng,
}

impl Commander {
    /// Creates a commander for the game mirrored by `world`.
    #[must_use]
    pub fn new(world: &World, config: Config) -> Self {
        let ruleset = *query::ruleset(world);
        let tuning = config.tuning;
        Self {
            decision: DecisionEngine::new(ruleset, tuning.decision.clone()),
            conversion: ConversionPlanner::new(ruleset, tuning.conversion.clone()),
            spawning: SpawnBudget::new(&ruleset, tuning.spawning.clone()),
            dropoffs: DropoffRegistry::new(query::shipyard(world)),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            ruleset,
            tuning,
        }
    }

    /// Drop-offs known to the bot, home shipyard first.
    #[must_use]
    pub fn dropoffs(&self) -> &DropoffRegistry {
        &self.dropoffs
    }

    /// Reports whether `ship` is committed to returning home.
    #[must_use]
    pub fn is_returning(&self, ship: ShipId) -> bool {
        self.decision.is_returning(ship)
    }

    /// Plans the commands for the turn currently mirrored by `world`.
    ///
    /// At most one ship converts and at most one ship spawns. Ships are
    /// planned in ascending id order, each claiming its destination before
    /// the next one is considered.
    pub fn plan_turn(&mut self, world: &World) -> Vec<Command> {
        let view = query::world_view(world);
        let context = query::turn_context(world);
        let ships = query::own_ships(world);
        let shipyard = query::shipyard(world);

        self.decision.retain_alive(&ships);
        for position in query::own_dropoffs(world) {
            let _ = self.dropoffs.register(position);
        }

        let mut commands = Vec::with_capacity(ships.len() + 2);
        let mut spendable = context.stockpile;
        let conversion = self
            .conversion
            .evaluate(&ships, &view, &mut self.dropoffs, &context);
        if let Some(conversion) = conversion {
            commands.push(conversion.command());
            spendable = spendable.saturating_sub(self.ruleset.dropoff_cost);
        }
        let mut converted = conversion.is_some();

        let mut planner = PathPlanner::new(view, &self.tuning.navigation, context, &mut self.rng);
        for ship in &ships {
            if conversion.is_some_and(|conversion| conversion.ship == ship.id) {
                continue;
            }
            let mut mode = self
                .decision
                .classify(ship, &view, &self.dropoffs, &context);
            if mode == Mode::Convert && converted {
                mode = Mode::Return;
            }
            let plan = planner.plan(mode, ship, &mut self.dropoffs);
            if plan == Plan::Convert {
                converted = true;
                spendable = spendable.saturating_sub(self.ruleset.dropoff_cost);
            }
            commands.push(plan.into_command(ship.id));
        }
        let shipyard_free =
            !planner.reservations().is_claimed(shipyard) && !view.is_occupied(shipyard);

        self.spawning
            .handle(&context, spendable, shipyard_free, &mut commands);
        debug!(
            turn = context.turn,
            ships = ships.len(),
            commands = commands.len(),
            stockpile = context.stockpile,
            fleet_cap = self.spawning.fleet_cap(),
            "planned turn"
        );
        commands
    }
}
