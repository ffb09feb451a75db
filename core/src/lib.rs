#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Halite fleet bot.
//!
//! This crate defines the vocabulary that connects the host adapter, the
//! world mirror, and the pure per-turn systems. The adapter translates host
//! frames into [`Update`] values, the world applies them, and systems read
//! immutable [`WorldView`] snapshots before answering with [`Command`]
//! batches that the adapter serialises back to the host.

mod dropoffs;
mod geometry;
mod tuning;
mod view;

use serde::Deserialize;

pub use dropoffs::DropoffRegistry;
pub use geometry::Torus;
pub use tuning::{
    ConversionTuning, DecisionTuning, NavigationTuning, SpawnTuning, Tuning, TuningError,
};
pub use view::{Cell, WorldView};

/// Movement directions understood by the host, including standing still.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Movement toward decreasing `y`.
    North,
    /// Movement toward increasing `y`.
    South,
    /// Movement toward increasing `x`.
    East,
    /// Movement toward decreasing `x`.
    West,
    /// No movement.
    Still,
}

impl Direction {
    /// Cardinal directions in the order the planner explores them.
    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Unit offset applied to a position when moving in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::Still => (0, 0),
        }
    }

    /// Direction that undoes this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::Still => Self::Still,
        }
    }

    /// Single-character code used by the host protocol.
    #[must_use]
    pub const fn protocol_char(self) -> char {
        match self {
            Self::North => 'n',
            Self::South => 's',
            Self::East => 'e',
            Self::West => 'w',
            Self::Still => 'o',
        }
    }
}

/// Location of a grid cell.
///
/// Positions handed out by [`Torus`] are always normalised into the grid
/// bounds, so two positions naming the same wrapped cell compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a position from raw coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column of the position.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row of the position.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }
}

/// Unique identifier assigned to a ship by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipId(u32);

impl ShipId {
    /// Creates a new ship identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a player by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new player identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable representation of a single ship used for planning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShipSnapshot {
    /// Identifier assigned to the ship.
    pub id: ShipId,
    /// Cell currently occupied by the ship.
    pub position: Position,
    /// Halite carried in the ship's hold.
    pub cargo: u32,
}

impl ShipSnapshot {
    /// Fraction of the hold that is filled, in `[0, 1]` for valid cargo.
    #[must_use]
    pub fn cargo_fraction(&self, ruleset: &Ruleset) -> f64 {
        if ruleset.max_cargo == 0 {
            return 1.0;
        }
        f64::from(self.cargo) / f64::from(ruleset.max_cargo)
    }

    /// Reports whether the hold counts as full under the provided fraction.
    #[must_use]
    pub fn is_full(&self, ruleset: &Ruleset, full_fraction: f64) -> bool {
        self.cargo >= ruleset.max_cargo || self.cargo_fraction(ruleset) >= full_fraction
    }
}

/// Behavioural mode selected for a ship each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Travel toward the richest nearby cell.
    Collect,
    /// Travel toward the nearest drop-off.
    Return,
    /// Turn the ship into a drop-off.
    Convert,
    /// Remain on the current cell.
    Stay,
}

/// Commands the bot submits to the host each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Moves a ship one cell, or keeps it in place for [`Direction::Still`].
    Move {
        /// Ship receiving the order.
        ship: ShipId,
        /// Direction of travel.
        direction: Direction,
    },
    /// Converts a ship into a drop-off on its current cell.
    ConvertToDropoff {
        /// Ship being converted.
        ship: ShipId,
    },
    /// Builds a new ship at the shipyard.
    SpawnShip,
}

/// Host observations applied to the world mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Update {
    /// Announces a new turn; ships and drop-offs are re-sent after it.
    TurnStarted {
        /// Turn number reported by the host.
        turn: u32,
    },
    /// Reports a player's banked halite.
    PlayerStatus {
        /// Player being described.
        player: PlayerId,
        /// Halite stockpiled by the player.
        halite: u32,
    },
    /// Reports a live ship.
    ShipObserved {
        /// Owner of the ship.
        player: PlayerId,
        /// Current ship state.
        ship: ShipSnapshot,
    },
    /// Reports a drop-off structure.
    DropoffObserved {
        /// Owner of the drop-off.
        player: PlayerId,
        /// Cell holding the drop-off.
        position: Position,
    },
    /// Reports a changed halite amount on a cell.
    CellHalite {
        /// Cell whose halite changed.
        position: Position,
        /// New halite amount.
        halite: u32,
    },
}

/// Per-turn facts about the owning player needed by the systems.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnContext {
    /// Current turn number.
    pub turn: u32,
    /// Last turn of the game.
    pub max_turns: u32,
    /// Halite banked by the owning player.
    pub stockpile: u32,
    /// Number of ships the owning player controls.
    pub fleet_size: usize,
}

impl TurnContext {
    /// Turns left before the game ends.
    #[must_use]
    pub const fn remaining_turns(&self) -> u32 {
        self.max_turns.saturating_sub(self.turn)
    }
}

/// Static game constants announced by the host at start-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Ruleset {
    /// Maximum halite a ship may carry.
    #[serde(rename = "MAX_ENERGY")]
    pub max_cargo: u32,
    /// Divisor applied to a cell's halite to obtain the cost of leaving it.
    #[serde(rename = "MOVE_COST_RATIO")]
    pub move_cost_ratio: u32,
    /// Divisor applied to a cell's halite to obtain the amount mined per turn.
    #[serde(rename = "EXTRACT_RATIO", default = "default_extract_ratio")]
    pub extract_ratio: u32,
    /// Halite required to build a ship.
    #[serde(rename = "NEW_ENTITY_ENERGY_COST")]
    pub ship_cost: u32,
    /// Halite required to convert a ship into a drop-off.
    #[serde(rename = "DROPOFF_COST")]
    pub dropoff_cost: u32,
    /// Number of turns in the game.
    #[serde(rename = "MAX_TURNS")]
    pub max_turns: u32,
}

const fn default_extract_ratio() -> u32 {
    4
}

impl Ruleset {
    /// Halite a ship must spend to leave a cell holding `halite`.
    ///
    /// The cost rounds up so that any non-empty cell charges at least one.
    #[must_use]
    pub const fn move_cost(&self, halite: u32) -> u32 {
        if self.move_cost_ratio == 0 {
            return 0;
        }
        halite.div_ceil(self.move_cost_ratio)
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            max_cargo: 1_000,
            move_cost_ratio: 10,
            extract_ratio: default_extract_ratio(),
            ship_cost: 1_000,
            dropoff_cost: 4_000,
            max_turns: 400,
        }
    }
}
