#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative mirror of the Halite host state.

use halite_fleet_core::{Cell, PlayerId, Position, Ruleset, ShipSnapshot, Torus, Update};
use thiserror::Error;
use tracing::warn;

/// Everything the host announces before the first turn.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSetup {
    /// Static game constants.
    pub ruleset: Ruleset,
    /// Identifier of the player this bot controls.
    pub my_id: PlayerId,
    /// Map dimensions.
    pub torus: Torus,
    /// Shipyard location of every player.
    pub shipyards: Vec<(PlayerId, Position)>,
    /// Initial halite per cell in row-major order.
    pub halite: Vec<u32>,
}

/// Reasons a [`GameSetup`] cannot seed a world.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// The halite grid does not cover the map exactly.
    #[error("halite grid holds {actual} cells but the map needs {expected}")]
    HaliteGridMismatch {
        /// Cells required by the map dimensions.
        expected: usize,
        /// Cells provided by the host.
        actual: usize,
    },
    /// The controlled player has no shipyard.
    #[error("player {0} has no shipyard")]
    MissingShipyard(u32),
}

#[derive(Clone, Debug)]
struct Player {
    id: PlayerId,
    shipyard: Position,
    halite: u32,
    ships: Vec<ShipSnapshot>,
    dropoffs: Vec<Position>,
}

/// Represents the authoritative game state as last reported by the host.
#[derive(Clone, Debug)]
pub struct World {
    ruleset: Ruleset,
    torus: Torus,
    my_id: PlayerId,
    players: Vec<Player>,
    cells: Vec<Cell>,
    turn: u32,
}

impl World {
    /// Builds the world from the host's start-up announcement.
    pub fn new(setup: GameSetup) -> Result<Self, WorldError> {
        let expected = setup.torus.cell_count();
        if setup.halite.len() != expected {
            return Err(WorldError::HaliteGridMismatch {
                expected,
                actual: setup.halite.len(),
            });
        }
        if !setup
            .shipyards
            .iter()
            .any(|(player, _)| *player == setup.my_id)
        {
            return Err(WorldError::MissingShipyard(setup.my_id.get()));
        }

        let mut players: Vec<Player> = setup
            .shipyards
            .iter()
            .map(|&(id, shipyard)| Player {
                id,
                shipyard: setup.torus.normalize(shipyard),
                halite: 0,
                ships: Vec::new(),
                dropoffs: Vec::new(),
            })
            .collect();
        players.sort_by_key(|player| player.id);

        let mut world = Self {
            ruleset: setup.ruleset,
            torus: setup.torus,
            my_id: setup.my_id,
            players,
            cells: setup.halite.into_iter().map(Cell::with_halite).collect(),
            turn: 0,
        };
        world.reset_structures();
        Ok(world)
    }

    fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    fn me(&self) -> Option<&Player> {
        self.players.iter().find(|player| player.id == self.my_id)
    }

    fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        let index = self.torus.index(position);
        self.cells.get_mut(index)
    }

    fn reset_structures(&mut self) {
        for cell in &mut self.cells {
            cell.occupied = false;
            cell.structure = false;
        }
        let shipyards: Vec<Position> = self.players.iter().map(|player| player.shipyard).collect();
        for shipyard in shipyards {
            if let Some(cell) = self.cell_mut(shipyard) {
                cell.structure = true;
            }
        }
    }
}

/// Applies a host observation to the world.
pub fn apply(world: &mut World, update: Update) {
    match update {
        Update::TurnStarted { turn } => {
            world.turn = turn;
            for player in &mut world.players {
                player.ships.clear();
                player.dropoffs.clear();
            }
            world.reset_structures();
        }
        Update::PlayerStatus { player, halite } => match world.player_mut(player) {
            Some(state) => state.halite = halite,
            None => warn!(player = player.get(), "status for unknown player"),
        },
        Update::ShipObserved { player, ship } => {
            let ship = ShipSnapshot {
                position: world.torus.normalize(ship.position),
                ..ship
            };
            match world.player_mut(player) {
                Some(state) => state.ships.push(ship),
                None => {
                    warn!(player = player.get(), ship = ship.id.get(), "ship for unknown player");
                }
            }
            if let Some(cell) = world.cell_mut(ship.position) {
                cell.occupied = true;
            }
        }
        Update::DropoffObserved { player, position } => {
            let position = world.torus.normalize(position);
            match world.player_mut(player) {
                Some(state) => state.dropoffs.push(position),
                None => warn!(player = player.get(), "drop-off for unknown player"),
            }
            if let Some(cell) = world.cell_mut(position) {
                cell.structure = true;
            }
        }
        Update::CellHalite { position, halite } => {
            if let Some(cell) = world.cell_mut(position) {
                cell.halite = halite;
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use halite_fleet_core::{
        PlayerId, Position, Ruleset, ShipSnapshot, Torus, TurnContext, WorldView,
    };

    use super::World;

    /// Captures a read-only view of the map.
    #[must_use]
    pub fn world_view(world: &World) -> WorldView<'_> {
        WorldView::new(world.torus, &world.cells)
    }

    /// Map geometry.
    #[must_use]
    pub fn torus(world: &World) -> Torus {
        world.torus
    }

    /// Static game constants.
    #[must_use]
    pub fn ruleset(world: &World) -> &Ruleset {
        &world.ruleset
    }

    /// Identifier of the controlled player.
    #[must_use]
    pub fn my_id(world: &World) -> PlayerId {
        world.my_id
    }

    /// Number of players in the game.
    #[must_use]
    pub fn player_count(world: &World) -> usize {
        world.players.len()
    }

    /// Most recent turn number.
    #[must_use]
    pub fn turn(world: &World) -> u32 {
        world.turn
    }

    /// Controlled player's ships sorted by identifier.
    #[must_use]
    pub fn own_ships(world: &World) -> Vec<ShipSnapshot> {
        let mut ships = world
            .me()
            .map(|player| player.ships.clone())
            .unwrap_or_default();
        ships.sort_by_key(|ship| ship.id);
        ships
    }

    /// Drop-offs the host reports for the controlled player, shipyard excluded.
    #[must_use]
    pub fn own_dropoffs(world: &World) -> Vec<Position> {
        world
            .me()
            .map(|player| player.dropoffs.clone())
            .unwrap_or_default()
    }

    /// Controlled player's shipyard.
    #[must_use]
    pub fn shipyard(world: &World) -> Position {
        world
            .me()
            .map_or_else(|| Position::new(0, 0), |player| player.shipyard)
    }

    /// Turn facts the planning systems need.
    #[must_use]
    pub fn turn_context(world: &World) -> TurnContext {
        let (stockpile, fleet_size) = world
            .me()
            .map_or((0, 0), |player| (player.halite, player.ships.len()));
        TurnContext {
            turn: world.turn,
            max_turns: world.ruleset.max_turns,
            stockpile,
            fleet_size,
        }
    }
}
