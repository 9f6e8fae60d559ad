//! Room-overlap filtering: corridor cells that fall inside a room's visual
//! footprint are dropped so corridors terminate at room edges.

use super::model::{Connection, CorridorSegment, Room};

/// Squared grid distance within which a corridor cell counts as part of a
/// room's footprint. Radius 1.5 in the layout maths, so the integer form
/// covers the room cell plus its orthogonal and diagonal neighbors.
const FOOTPRINT_RADIUS_SQ: i64 = 2;

/// Drop every segment whose cell sits inside the footprint of any room.
/// Pure set subtraction: applying it twice equals applying it once. A
/// connection whose segments are all dropped stays valid with an empty list
/// (the rooms touch directly).
pub(super) fn strip_room_footprints(connection: &mut Connection, rooms: &[Room]) {
    connection.segments.retain(|segment| !inside_any_footprint(segment, rooms));
}

fn inside_any_footprint(segment: &CorridorSegment, rooms: &[Room]) -> bool {
    rooms.iter().any(|room| {
        let dx = i64::from(segment.grid_x - room.grid_x);
        let dy = i64::from(segment.grid_y - room.grid_y);
        dx * dx + dy * dy <= FOOTPRINT_RADIUS_SQ
    })
}
