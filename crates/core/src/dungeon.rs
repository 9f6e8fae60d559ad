//! The dungeon aggregate: a frozen generated graph plus its identity, the
//! originating config, and a theme snapshot. Topology never changes after
//! creation; the only mutations are reveal toggles and theme substitution.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::mapgen::model::{
    self, Connection, DungeonGraph, GeneratorConfig, Room, START_ROOM_ID,
};
use crate::mapgen::{self, GenerationError};
use crate::theme::DungeonTheme;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    pub id: String,
    pub name: String,
    pub created_at_ms: u64,
    pub config: GeneratorConfig,
    pub rooms: Vec<Room>,
    pub connections: Vec<Connection>,
    pub theme: DungeonTheme,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditError {
    UnknownRoom { id: String },
    UnknownSegment { from_id: String, to_id: String, segment_id: String },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRoom { id } => write!(f, "no room with id {id}"),
            Self::UnknownSegment { from_id, to_id, segment_id } => {
                write!(f, "no segment {segment_id} on connection {from_id} -> {to_id}")
            }
        }
    }
}

impl Dungeon {
    /// Generate a dungeon with a fresh session seed. Either the whole
    /// aggregate comes back or an error does; there is no partial dungeon.
    pub fn generate(config: GeneratorConfig, theme: DungeonTheme) -> Result<Self, GenerationError> {
        Self::generate_seeded(config, theme, &mapgen::mint_session_seed())
    }

    /// Deterministic graph for an explicit seed. Identity fields (id, name,
    /// creation time) still come from session entropy and the clock.
    pub fn generate_seeded(
        config: GeneratorConfig,
        theme: DungeonTheme,
        seed: &str,
    ) -> Result<Self, GenerationError> {
        let graph = mapgen::generate_with_seed(config, seed)?;
        let entropy = mapgen::seed::session_entropy();
        Ok(Self::assemble(
            format!("dungeon-{entropy:016x}"),
            format!("Expedition #{}", 100 + entropy % 900),
            unix_millis(),
            config,
            graph,
            theme,
        ))
    }

    pub fn assemble(
        id: String,
        name: String,
        created_at_ms: u64,
        config: GeneratorConfig,
        graph: DungeonGraph,
        theme: DungeonTheme,
    ) -> Self {
        Self {
            id,
            name,
            created_at_ms,
            config,
            rooms: graph.rooms,
            connections: graph.connections,
            theme,
        }
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    /// Flip one room's fog-of-war flag; returns the new state.
    pub fn toggle_room_revealed(&mut self, room_id: &str) -> Result<bool, EditError> {
        let room = self
            .rooms
            .iter_mut()
            .find(|room| room.id == room_id)
            .ok_or_else(|| EditError::UnknownRoom { id: room_id.to_string() })?;
        room.revealed = !room.revealed;
        Ok(room.revealed)
    }

    /// Flip one corridor segment's fog-of-war flag; returns the new state.
    pub fn toggle_segment_revealed(
        &mut self,
        from_id: &str,
        to_id: &str,
        segment_id: &str,
    ) -> Result<bool, EditError> {
        let segment = self
            .connections
            .iter_mut()
            .find(|connection| connection.from_id == from_id && connection.to_id == to_id)
            .and_then(|connection| {
                connection.segments.iter_mut().find(|segment| segment.id == segment_id)
            })
            .ok_or_else(|| EditError::UnknownSegment {
                from_id: from_id.to_string(),
                to_id: to_id.to_string(),
                segment_id: segment_id.to_string(),
            })?;
        segment.revealed = !segment.revealed;
        Ok(segment.revealed)
    }

    pub fn reveal_all(&mut self) {
        for room in &mut self.rooms {
            room.revealed = true;
        }
        for connection in &mut self.connections {
            for segment in &mut connection.segments {
                segment.revealed = true;
            }
        }
    }

    /// Re-shroud everything except the start room, which is always known.
    pub fn hide_all(&mut self) {
        for room in &mut self.rooms {
            room.revealed = room.id == START_ROOM_ID;
        }
        for connection in &mut self.connections {
            for segment in &mut connection.segments {
                segment.revealed = false;
            }
        }
    }

    pub fn set_theme(&mut self, theme: DungeonTheme) {
        self.theme = theme;
    }

    /// Fog-of-war projection for the read-only player surface: revealed
    /// rooms, and connections reduced to their revealed segments (edges
    /// with nothing revealed disappear entirely).
    pub fn player_view(&self) -> DungeonGraph {
        let rooms = self.rooms.iter().filter(|room| room.revealed).cloned().collect();
        let connections = self
            .connections
            .iter()
            .filter_map(|connection| {
                let segments: Vec<_> =
                    connection.segments.iter().filter(|segment| segment.revealed).cloned().collect();
                if segments.is_empty() {
                    return None;
                }
                Some(Connection {
                    from_id: connection.from_id.clone(),
                    to_id: connection.to_id.clone(),
                    segments,
                })
            })
            .collect();
        DungeonGraph { rooms, connections }
    }

    /// Stable byte encoding of identity, config, and graph state. The theme
    /// is excluded on purpose: it is a rendering concern, not topology.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        model::push_str(&mut bytes, &self.id);
        model::push_str(&mut bytes, &self.name);
        bytes.extend(self.created_at_ms.to_le_bytes());
        bytes.extend(self.config.complexity.to_le_bytes());
        bytes.extend(self.config.branching.to_le_bytes());
        model::encode_graph(&mut bytes, &self.rooms, &self.connections);
        bytes
    }

    pub fn snapshot_hash(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dungeon {
        Dungeon::generate_seeded(
            GeneratorConfig { complexity: 8, branching: 2 },
            DungeonTheme::default(),
            "aggregate",
        )
        .expect("config is valid")
    }

    fn first_segment_address(dungeon: &Dungeon) -> (String, String, String) {
        let connection = dungeon
            .connections
            .iter()
            .find(|connection| !connection.segments.is_empty())
            .expect("layer spacing always leaves corridor cells");
        (
            connection.from_id.clone(),
            connection.to_id.clone(),
            connection.segments[0].id.clone(),
        )
    }

    #[test]
    fn generated_aggregate_carries_identity_and_config() {
        let dungeon = sample();
        assert!(dungeon.id.starts_with("dungeon-"));
        assert!(dungeon.name.starts_with("Expedition #"));
        assert_eq!(dungeon.config, GeneratorConfig { complexity: 8, branching: 2 });
        assert!(dungeon.room(START_ROOM_ID).expect("start room exists").revealed);
    }

    #[test]
    fn toggling_an_unknown_room_is_an_error() {
        let mut dungeon = sample();
        assert_eq!(
            dungeon.toggle_room_revealed("room-99-0"),
            Err(EditError::UnknownRoom { id: "room-99-0".to_string() })
        );
    }

    #[test]
    fn room_toggle_flips_state_and_snapshot_hash() {
        let mut dungeon = sample();
        let before = dungeon.snapshot_hash();

        assert_eq!(dungeon.toggle_room_revealed("room-1-0"), Ok(true));
        assert_ne!(dungeon.snapshot_hash(), before);

        assert_eq!(dungeon.toggle_room_revealed("room-1-0"), Ok(false));
        assert_eq!(dungeon.snapshot_hash(), before);
    }

    #[test]
    fn segment_toggle_reaches_through_the_connection() {
        let mut dungeon = sample();
        let (from_id, to_id, segment_id) = first_segment_address(&dungeon);

        assert_eq!(dungeon.toggle_segment_revealed(&from_id, &to_id, &segment_id), Ok(true));
        assert_eq!(
            dungeon.toggle_segment_revealed(&from_id, &to_id, "seg-h-nope-nope-0"),
            Err(EditError::UnknownSegment {
                from_id: from_id.clone(),
                to_id: to_id.clone(),
                segment_id: "seg-h-nope-nope-0".to_string(),
            })
        );
    }

    #[test]
    fn hide_all_keeps_the_start_room_known() {
        let mut dungeon = sample();
        dungeon.reveal_all();
        assert!(dungeon.rooms.iter().all(|room| room.revealed));

        dungeon.hide_all();
        for room in &dungeon.rooms {
            assert_eq!(room.revealed, room.id == START_ROOM_ID);
        }
        assert!(
            dungeon
                .connections
                .iter()
                .flat_map(|connection| &connection.segments)
                .all(|segment| !segment.revealed)
        );
    }

    #[test]
    fn player_view_shows_exactly_the_revealed_entities() {
        let mut dungeon = sample();

        let fresh = dungeon.player_view();
        assert_eq!(fresh.rooms.len(), 1, "only the start room begins revealed");
        assert_eq!(fresh.rooms[0].id, START_ROOM_ID);
        assert!(fresh.connections.is_empty());

        dungeon.toggle_room_revealed("room-1-0").unwrap();
        let (from_id, to_id, segment_id) = first_segment_address(&dungeon);
        dungeon.toggle_segment_revealed(&from_id, &to_id, &segment_id).unwrap();

        let partial = dungeon.player_view();
        assert_eq!(partial.rooms.len(), 2);
        assert_eq!(partial.segment_count(), 1);

        dungeon.reveal_all();
        let full = dungeon.player_view();
        assert_eq!(full.rooms.len(), dungeon.rooms.len());
        assert_eq!(
            full.segment_count(),
            dungeon.connections.iter().map(|c| c.segments.len()).sum::<usize>()
        );
    }

    #[test]
    fn theme_swap_leaves_the_snapshot_hash_alone() {
        let mut dungeon = sample();
        let before = dungeon.snapshot_hash();

        let (_, toxic) = crate::theme::builtin_templates().swap_remove(1);
        dungeon.set_theme(toxic.clone());

        assert_eq!(dungeon.theme, toxic);
        assert_eq!(dungeon.snapshot_hash(), before);
    }

    #[test]
    fn aggregate_round_trips_through_json() {
        let dungeon = sample();
        let json = serde_json::to_string(&dungeon).expect("dungeon serializes");
        let back: Dungeon = serde_json::from_str(&json).expect("dungeon deserializes");
        assert_eq!(back, dungeon);
        assert_eq!(back.snapshot_hash(), dungeon.snapshot_hash());
    }
}
