//! Corridor carving between parent and child rooms: an L-shaped Manhattan
//! path of unit cells, each cell rolling an optional encounter.

use super::model::{Connection, CorridorSegment, EncounterKind, Room};
use super::seed::SeedStream;

/// Chance that a horizontal corridor cell holds a battle. Horizontal runs
/// model the approach into a layer, so combat biases this pool.
pub(super) const HORIZONTAL_BATTLE_CHANCE: f64 = 0.12;
/// Chance that a vertical corridor cell holds a trap. Vertical runs model
/// flanking routes between siblings, so traps bias this pool.
pub(super) const VERTICAL_TRAP_CHANCE: f64 = 0.08;

/// Carve the raw segment list for one parent -> child edge: every unit cell
/// strictly between the room columns at the parent's row, then every unit
/// cell strictly between the room rows at the child's column, following the
/// direction of travel. Room-footprint filtering happens later, over the
/// finished room list.
pub(super) fn carve_connection(from: &Room, to: &Room, rng: &mut SeedStream) -> Connection {
    let mut segments = Vec::new();

    let x_step = (to.grid_x - from.grid_x).signum();
    if x_step != 0 {
        let mut x = from.grid_x + x_step;
        while x != to.grid_x {
            let encounter = if rng.next_unit() < HORIZONTAL_BATTLE_CHANCE {
                EncounterKind::Battle
            } else {
                EncounterKind::None
            };
            segments.push(CorridorSegment {
                id: format!("seg-h-{}-{}-{x}", from.id, to.id),
                grid_x: x,
                grid_y: from.grid_y,
                encounter,
                revealed: false,
            });
            x += x_step;
        }
    }

    let y_step = (to.grid_y - from.grid_y).signum();
    if y_step != 0 {
        let mut y = from.grid_y + y_step;
        while y != to.grid_y {
            let encounter = if rng.next_unit() < VERTICAL_TRAP_CHANCE {
                EncounterKind::Trap
            } else {
                EncounterKind::None
            };
            segments.push(CorridorSegment {
                id: format!("seg-v-{}-{}-{y}", from.id, to.id),
                grid_x: to.grid_x,
                grid_y: y,
                encounter,
                revealed: false,
            });
            y += y_step;
        }
    }

    Connection { from_id: from.id.clone(), to_id: to.id.clone(), segments }
}
