use halite_fleet_core::{Position, WorldView};

/// Richest cell within `depth` rings of `center`.
///
/// Rings are swept outward from depth one. A cell qualifies when it holds
/// strictly more than `min_worth` halite; more halite wins, then the
/// shorter distance, then the cell found first.
#[must_use]
pub fn richest_in_window(
    view: &WorldView<'_>,
    center: Position,
    depth: u32,
    min_worth: u32,
) -> Option<Position> {
    let torus = view.torus();
    let mut best: Option<(Position, u32, u32)> = None;
    for ring in 1..=depth {
        for position in torus.ring_outline(center, ring) {
            let halite = view.halite(position);
            if halite <= min_worth {
                continue;
            }
            let distance = torus.distance(center, position);
            let better = match best {
                None => true,
                Some((_, best_halite, best_distance)) => {
                    halite > best_halite || (halite == best_halite && distance < best_distance)
                }
            };
            if better {
                best = Some((position, halite, distance));
            }
        }
    }
    best.map(|(position, _, _)| position)
}
