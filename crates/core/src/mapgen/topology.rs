//! Layered room topology: one start room, randomly branching middle layers,
//! and a single boss layer, connected into a tree by round-robin parenting.

use crate::content;

use super::GenerationError;
use super::corridor::carve_connection;
use super::model::{DungeonGraph, GeneratorConfig, Room, RoomType, START_ROOM_ID};
use super::seed::SeedStream;

/// Grid columns between adjacent layers. Wide enough that carved corridors
/// never reach into a neighboring layer's footprints.
pub(super) const TILE_SPACING_X: i32 = 14;
/// Grid rows between siblings within a layer.
pub(super) const TILE_SPACING_Y: i32 = 10;

/// Battle rooms carry double weight; the list is a table, not duplicated
/// entries, so editing candidates cannot silently shift the odds.
const ROOM_TYPE_WEIGHTS: [(RoomType, u32); 5] = [
    (RoomType::Battle, 2),
    (RoomType::Curio, 1),
    (RoomType::Treasure, 1),
    (RoomType::Empty, 1),
    (RoomType::Camp, 1),
];

/// `complexity` drives depth only; per-layer room counts are drawn at random
/// below, so the total room count deliberately tracks `complexity` loosely.
pub(super) fn layer_count(complexity: u32) -> usize {
    (complexity as usize / 2).max(3)
}

/// Build the room tree and carve raw corridors for every parent -> child
/// edge, consuming the shared stream in one deterministic pass. Segments
/// still overlap room footprints here; the caller filters them against the
/// finished room list.
pub(super) fn build_graph(
    rng: &mut SeedStream,
    config: GeneratorConfig,
) -> Result<DungeonGraph, GenerationError> {
    let layers = layer_count(config.complexity);
    let max_rooms_per_layer = config.branching.saturating_add(1).min(3) as i32;

    let mut rooms = vec![Room {
        id: START_ROOM_ID.to_string(),
        room_type: RoomType::Start,
        grid_x: 0,
        grid_y: 0,
        label: content::labels::START_ROOM.to_string(),
        revealed: true,
        enemies: Vec::new(),
    }];
    let mut connections = Vec::new();
    let mut prev_layer_indices: Vec<usize> = vec![0];

    for layer in 1..=layers {
        let is_boss_layer = layer == layers;
        let rooms_in_layer = if is_boss_layer {
            1
        } else {
            rng.range_inclusive(1, max_rooms_per_layer) as usize
        };

        let mut layer_indices = Vec::with_capacity(rooms_in_layer);
        for index in 0..rooms_in_layer {
            let room_type = if is_boss_layer {
                RoomType::Boss
            } else {
                *rng.pick_weighted(&ROOM_TYPE_WEIGHTS)?
            };

            let centered_offset = index as f64 - (rooms_in_layer as f64 - 1.0) / 2.0;
            let grid_y = (centered_offset * f64::from(TILE_SPACING_Y)).round() as i32;

            let enemies = match room_type {
                RoomType::Boss => content::roster_strings(&content::BOSS_ROSTER),
                RoomType::Battle => content::roster_strings(&content::BATTLE_ROSTER),
                _ => Vec::new(),
            };
            let label = if is_boss_layer {
                content::labels::BOSS_ROOM.to_string()
            } else {
                content::labels::chamber(layer, index)
            };

            rooms.push(Room {
                id: format!("room-{layer}-{index}"),
                room_type,
                grid_x: layer as i32 * TILE_SPACING_X,
                grid_y,
                label,
                revealed: false,
                enemies,
            });
            layer_indices.push(rooms.len() - 1);
        }

        // Children round-robin onto the previous layer: every non-start room
        // ends up with exactly one inbound edge.
        for (offset, &room_index) in layer_indices.iter().enumerate() {
            let parent_index = prev_layer_indices[offset % prev_layer_indices.len()];
            connections.push(carve_connection(&rooms[parent_index], &rooms[room_index], rng));
        }

        prev_layer_indices = layer_indices;
    }

    Ok(DungeonGraph { rooms, connections })
}
