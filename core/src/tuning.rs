//! Tunable thresholds that steer every planning system.
//!
//! All values carry defaults so a partial TOML file only needs to name the
//! knobs it changes.

use serde::Deserialize;
use thiserror::Error;

/// Complete set of tuning knobs grouped by the system that reads them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Thresholds for the per-ship mode selection.
    pub decision: DecisionTuning,
    /// Search bounds for the path planner.
    pub navigation: NavigationTuning,
    /// Spacing rules for drop-off conversion.
    pub conversion: ConversionTuning,
    /// Fleet-size budget for spawning new ships.
    pub spawning: SpawnTuning,
}

/// Thresholds consulted by the decision engine.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecisionTuning {
    /// Extra turns added to the trip home before forcing a return.
    pub return_safety_margin: u32,
    /// Cargo fraction above which a ship commits to returning.
    pub high_cargo_fraction: f64,
    /// Cargo fraction below which a committed return may be abandoned.
    pub abandon_cargo_fraction: f64,
    /// Abandoning a return requires strictly more turns than this remaining.
    pub abandon_min_turns_remaining: u32,
    /// Cells holding less halite than this are not worth staying on.
    pub min_worth_halite: u32,
    /// Cargo fraction at which a hold counts as full.
    pub full_fraction: f64,
    /// A full ship converts only when the stockpile exceeds this many drop-off costs.
    pub full_convert_cost_multiplier: u32,
}

impl Default for DecisionTuning {
    fn default() -> Self {
        Self {
            return_safety_margin: 3,
            high_cargo_fraction: 0.9,
            abandon_cargo_fraction: 0.4,
            abandon_min_turns_remaining: 50,
            min_worth_halite: 10,
            full_fraction: 1.0,
            full_convert_cost_multiplier: 2,
        }
    }
}

/// Bounds for the path planner's searches.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationTuning {
    /// Rounds of the bounded greedy search.
    pub search_depth: u32,
    /// Ring depth scanned for halite at the start of the game.
    pub base_scan_depth: u32,
    /// One extra scan ring is added every this many turns.
    pub scan_growth_interval: u32,
    /// Scan candidates must hold strictly more halite than this.
    pub min_worth_halite: u32,
}

impl Default for NavigationTuning {
    fn default() -> Self {
        Self {
            search_depth: 4,
            base_scan_depth: 4,
            scan_growth_interval: 100,
            min_worth_halite: 10,
        }
    }
}

impl NavigationTuning {
    /// Number of scan rings to sweep on `turn`.
    #[must_use]
    pub fn scan_depth(&self, turn: u32) -> u32 {
        let growth = turn.checked_div(self.scan_growth_interval).unwrap_or(0);
        self.base_scan_depth.saturating_add(growth)
    }
}

/// Spacing rules for converting a ship into a drop-off.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionTuning {
    /// Preferred distance between a new drop-off and its nearest neighbour.
    pub ideal_spacing: u32,
    /// Accepted deviation from the ideal spacing.
    pub spacing_tolerance: u32,
    /// Stockpile must reach this many drop-off costs per existing drop-off.
    pub cost_multiplier: u32,
    /// No conversions once this many turns or fewer remain.
    pub cutoff_turns_remaining: u32,
}

impl Default for ConversionTuning {
    fn default() -> Self {
        Self {
            ideal_spacing: 13,
            spacing_tolerance: 2,
            cost_multiplier: 2,
            cutoff_turns_remaining: 230,
        }
    }
}

/// Fleet-size budget used when deciding to build ships.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpawnTuning {
    /// Fleet cap at the start of the game.
    pub initial_fleet_cap: u32,
    /// Spawning never lowers the cap below this floor.
    pub fleet_cap_floor: u32,
    /// Stockpile must reach this many ship costs before spawning.
    pub cost_multiplier: u32,
    /// No spawning once this many turns or fewer remain.
    pub stop_turns_remaining: u32,
    /// The cap shrinks by one on every turn divisible by this interval.
    pub cap_decay_interval: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            initial_fleet_cap: 8,
            fleet_cap_floor: 6,
            cost_multiplier: 3,
            stop_turns_remaining: 100,
            cap_decay_interval: 100,
        }
    }
}

/// Reasons a tuning set is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    /// A fraction fell outside `[0, 1]`.
    #[error("`{name}` must lie within [0, 1], got {value}")]
    FractionOutOfRange {
        /// Name of the offending knob.
        name: &'static str,
        /// Value that was supplied.
        value: f64,
    },
    /// A knob that must be positive was zero.
    #[error("`{name}` must be greater than zero")]
    Zero {
        /// Name of the offending knob.
        name: &'static str,
    },
    /// The abandon threshold was not below the commit threshold.
    #[error("abandon_cargo_fraction ({abandon}) must be below high_cargo_fraction ({high})")]
    InvertedCargoThresholds {
        /// Configured abandon threshold.
        abandon: f64,
        /// Configured commit threshold.
        high: f64,
    },
}

impl Tuning {
    /// Checks that every knob lies in a range the systems can honour.
    pub fn validate(&self) -> Result<(), TuningError> {
        let decision = &self.decision;
        check_fraction("high_cargo_fraction", decision.high_cargo_fraction)?;
        check_fraction("abandon_cargo_fraction", decision.abandon_cargo_fraction)?;
        check_fraction("full_fraction", decision.full_fraction)?;
        if decision.abandon_cargo_fraction >= decision.high_cargo_fraction {
            return Err(TuningError::InvertedCargoThresholds {
                abandon: decision.abandon_cargo_fraction,
                high: decision.high_cargo_fraction,
            });
        }

        check_positive("search_depth", self.navigation.search_depth)?;
        check_positive("base_scan_depth", self.navigation.base_scan_depth)?;
        check_positive("ideal_spacing", self.conversion.ideal_spacing)?;
        Ok(())
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<(), TuningError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::FractionOutOfRange { name, value })
    }
}

fn check_positive(name: &'static str, value: u32) -> Result<(), TuningError> {
    if value == 0 {
        Err(TuningError::Zero { name })
    } else {
        Ok(())
    }
}
