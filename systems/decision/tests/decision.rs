use halite_fleet_core::{
    Cell, DecisionTuning, DropoffRegistry, Mode, Position, Ruleset, ShipId, ShipSnapshot, Torus,
    TurnContext, WorldView,
};
use halite_fleet_system_decision::DecisionEngine;

const HOME: Position = Position::new(16, 16);

fn map_with(torus: Torus, rich: &[(Position, u32)]) -> Vec<Cell> {
    let mut cells = vec![Cell::default(); torus.cell_count()];
    for &(position, halite) in rich {
        cells[torus.index(position)].halite = halite;
    }
    cells[torus.index(HOME)].structure = true;
    cells
}

fn ship(id: u32, position: Position, cargo: u32) -> ShipSnapshot {
    ShipSnapshot {
        id: ShipId::new(id),
        position,
        cargo,
    }
}

fn context(turn: u32) -> TurnContext {
    TurnContext {
        turn,
        max_turns: 400,
        stockpile: 0,
        fleet_size: 1,
    }
}

fn engine() -> DecisionEngine {
    DecisionEngine::new(Ruleset::default(), DecisionTuning::default())
}

#[test]
fn nearly_full_hold_commits_to_return() {
    let torus = Torus::new(32, 32);
    let cells = map_with(torus, &[]);
    let view = WorldView::new(torus, &cells);
    let dropoffs = DropoffRegistry::new(HOME);
    let mut engine = engine();
    let laden = ship(7, Position::new(20, 16), 920);

    assert_eq!(
        engine.classify(&laden, &view, &dropoffs, &context(100)),
        Mode::Return
    );
    assert!(engine.is_returning(laden.id));
}

#[test]
fn committed_return_persists_until_arrival() {
    let torus = Torus::new(32, 32);
    let cells = map_with(torus, &[]);
    let view = WorldView::new(torus, &cells);
    let dropoffs = DropoffRegistry::new(HOME);
    let mut engine = engine();

    let mut turn = 100;
    let mut laden = ship(7, Position::new(20, 16), 920);
    assert_eq!(
        engine.classify(&laden, &view, &dropoffs, &context(turn)),
        Mode::Return
    );

    for x in (17..20).rev() {
        turn += 1;
        laden.position = Position::new(x, 16);
        laden.cargo = 600;
        assert_eq!(
            engine.classify(&laden, &view, &dropoffs, &context(turn)),
            Mode::Return,
            "ship at x={x} should keep returning"
        );
        assert!(engine.is_returning(laden.id));
    }

    laden.position = HOME;
    assert_eq!(
        engine.classify(&laden, &view, &dropoffs, &context(turn + 1)),
        Mode::Collect
    );
    assert!(!engine.is_returning(laden.id));
}

#[test]
fn arrival_at_secondary_dropoff_clears_mark() {
    let torus = Torus::new(32, 32);
    let cells = map_with(torus, &[]);
    let view = WorldView::new(torus, &cells);
    let mut dropoffs = DropoffRegistry::new(HOME);
    let _ = dropoffs.register(Position::new(3, 3));
    let mut engine = engine();
    engine.mark_returning(ShipId::new(2));

    let arrived = ship(2, Position::new(3, 3), 700);
    assert_eq!(
        engine.classify(&arrived, &view, &dropoffs, &context(50)),
        Mode::Collect
    );
    assert!(!engine.is_returning(arrived.id));
}

#[test]
fn light_return_is_abandoned_when_time_allows() {
    let torus = Torus::new(32, 32);
    let position = Position::new(24, 16);
    let cells = map_with(torus, &[(position, 5)]);
    let view = WorldView::new(torus, &cells);
    let dropoffs = DropoffRegistry::new(HOME);
    let mut engine = engine();
    engine.mark_returning(ShipId::new(4));

    let light = ship(4, position, 350);
    assert_eq!(
        engine.classify(&light, &view, &dropoffs, &context(320)),
        Mode::Collect
    );
    assert!(!engine.is_returning(light.id));
}

#[test]
fn abandoned_return_stays_on_rich_cell() {
    let torus = Torus::new(32, 32);
    let position = Position::new(24, 16);
    let cells = map_with(torus, &[(position, 200)]);
    let view = WorldView::new(torus, &cells);
    let dropoffs = DropoffRegistry::new(HOME);
    let mut engine = engine();
    engine.mark_returning(ShipId::new(4));

    let light = ship(4, position, 350);
    assert_eq!(
        engine.classify(&light, &view, &dropoffs, &context(100)),
        Mode::Stay
    );
    assert!(!engine.is_returning(light.id));
}

#[test]
fn light_return_continues_late_in_game() {
    let torus = Torus::new(32, 32);
    let cells = map_with(torus, &[]);
    let view = WorldView::new(torus, &cells);
    let dropoffs = DropoffRegistry::new(HOME);
    let mut engine = engine();
    engine.mark_returning(ShipId::new(4));

    let light = ship(4, Position::new(20, 16), 350);
    assert_eq!(
        engine.classify(&light, &view, &dropoffs, &context(360)),
        Mode::Return
    );
    assert!(engine.is_returning(light.id));
}

#[test]
fn endgame_clock_forces_return() {
    let torus = Torus::new(32, 32);
    let position = Position::new(26, 16);
    let cells = map_with(torus, &[(position, 300)]);
    let view = WorldView::new(torus, &cells);
    let dropoffs = DropoffRegistry::new(HOME);
    let mut engine = engine();

    // Ten steps home plus the safety margin of three covers the thirteen turns left.
    let ship = ship(1, position, 0);
    assert_eq!(
        engine.classify(&ship, &view, &dropoffs, &context(387)),
        Mode::Return
    );
    assert_eq!(
        engine.classify(&ship, &view, &dropoffs, &context(386)),
        Mode::Stay
    );
}

#[test]
fn unaffordable_move_keeps_ship_still() {
    let torus = Torus::new(32, 32);
    let position = Position::new(10, 10);
    let cells = map_with(torus, &[(position, 5)]);
    let view = WorldView::new(torus, &cells);
    let dropoffs = DropoffRegistry::new(HOME);
    let mut engine = engine();
    engine.mark_returning(ShipId::new(5));

    let broke = ship(5, position, 0);
    assert_eq!(
        engine.classify(&broke, &view, &dropoffs, &context(10)),
        Mode::Stay
    );
    assert!(engine.is_returning(broke.id));
}

#[test]
fn empty_ship_on_dropoff_may_leave() {
    let torus = Torus::new(32, 32);
    let cells = map_with(torus, &[(HOME, 40)]);
    let view = WorldView::new(torus, &cells);
    let dropoffs = DropoffRegistry::new(HOME);
    let mut engine = engine();

    let fresh = ship(6, HOME, 0);
    assert_eq!(
        engine.classify(&fresh, &view, &dropoffs, &context(1)),
        Mode::Stay,
        "a rich dropoff cell is still worth sitting on"
    );

    let cells = map_with(torus, &[]);
    let view = WorldView::new(torus, &cells);
    assert_eq!(
        engine.classify(&fresh, &view, &dropoffs, &context(1)),
        Mode::Collect
    );
}

#[test]
fn depleted_cell_means_collect() {
    let torus = Torus::new(32, 32);
    let position = Position::new(5, 5);
    let cells = map_with(torus, &[(position, 9)]);
    let view = WorldView::new(torus, &cells);
    let dropoffs = DropoffRegistry::new(HOME);
    let mut engine = engine();

    assert_eq!(
        engine.classify(&ship(8, position, 100), &view, &dropoffs, &context(20)),
        Mode::Collect
    );
}
