//! Public data models for generated dungeon graphs: rooms, corridor
//! segments, connections, and the generator configuration.

use serde::{Deserialize, Serialize};

/// Reserved id of the generation root; every other room id is derived from
/// its layer and index.
pub const START_ROOM_ID: &str = "room-start";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Start,
    Battle,
    Treasure,
    Curio,
    Boss,
    Empty,
    Camp,
}

impl RoomType {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Start => 0,
            Self::Battle => 1,
            Self::Treasure => 2,
            Self::Curio => 3,
            Self::Boss => 4,
            Self::Empty => 5,
            Self::Camp => 6,
        }
    }
}

/// Encounter attached to a corridor cell. The closed kinds cover the
/// built-in pools; `Custom` carries a user-defined identifier so downstream
/// matches stay exhaustive without losing extensibility.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterKind {
    None,
    Battle,
    Trap,
    Obstacle,
    Treasure,
    Hunger,
    Custom(String),
}

impl EncounterKind {
    pub fn identifier(&self) -> &str {
        match self {
            Self::None => "NONE",
            Self::Battle => "BATTLE",
            Self::Trap => "TRAP",
            Self::Obstacle => "OBSTACLE",
            Self::Treasure => "TREASURE",
            Self::Hunger => "HUNGER",
            Self::Custom(identifier) => identifier,
        }
    }
}

/// A node in the dungeon graph, placed on a fixed unit grid (not pixels).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub room_type: RoomType,
    pub grid_x: i32,
    pub grid_y: i32,
    pub label: String,
    pub revealed: bool,
    pub enemies: Vec<String>,
}

/// One unit cell of a carved corridor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorSegment {
    pub id: String,
    pub grid_x: i32,
    pub grid_y: i32,
    pub encounter: EncounterKind,
    pub revealed: bool,
}

/// All segments between one parent room and one child room, in traversal
/// order. Not guaranteed contiguous by axis after overlap filtering; treat
/// the list as a set keyed by id for correctness checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from_id: String,
    pub to_id: String,
    pub segments: Vec<CorridorSegment>,
}

/// Inputs driving one generation call. `complexity` drives layer count,
/// `branching` caps siblings per layer; both are read-only to the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub complexity: u32,
    pub branching: u32,
}

/// Pure output of one generation pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonGraph {
    pub rooms: Vec<Room>,
    pub connections: Vec<Connection>,
}

impl DungeonGraph {
    pub fn room_by_id(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub fn segment_count(&self) -> usize {
        self.connections.iter().map(|connection| connection.segments.len()).sum()
    }

    /// Stable byte encoding of the graph, independent of serialization
    /// format. Equal graphs produce equal bytes; used for fingerprints and
    /// snapshot hashes.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        encode_graph(&mut bytes, &self.rooms, &self.connections);
        bytes
    }
}

pub(crate) fn encode_graph(bytes: &mut Vec<u8>, rooms: &[Room], connections: &[Connection]) {
    bytes.extend((rooms.len() as u32).to_le_bytes());
    for room in rooms {
        push_str(bytes, &room.id);
        bytes.push(room.room_type.code());
        bytes.extend(room.grid_x.to_le_bytes());
        bytes.extend(room.grid_y.to_le_bytes());
        push_str(bytes, &room.label);
        bytes.push(u8::from(room.revealed));
        bytes.extend((room.enemies.len() as u32).to_le_bytes());
        for enemy in &room.enemies {
            push_str(bytes, enemy);
        }
    }

    bytes.extend((connections.len() as u32).to_le_bytes());
    for connection in connections {
        push_str(bytes, &connection.from_id);
        push_str(bytes, &connection.to_id);
        bytes.extend((connection.segments.len() as u32).to_le_bytes());
        for segment in &connection.segments {
            push_str(bytes, &segment.id);
            bytes.extend(segment.grid_x.to_le_bytes());
            bytes.extend(segment.grid_y.to_le_bytes());
            push_encounter(bytes, &segment.encounter);
            bytes.push(u8::from(segment.revealed));
        }
    }
}

pub(crate) fn push_str(bytes: &mut Vec<u8>, value: &str) {
    bytes.extend((value.len() as u32).to_le_bytes());
    bytes.extend(value.as_bytes());
}

fn push_encounter(bytes: &mut Vec<u8>, encounter: &EncounterKind) {
    match encounter {
        EncounterKind::None => bytes.push(0),
        EncounterKind::Battle => bytes.push(1),
        EncounterKind::Trap => bytes.push(2),
        EncounterKind::Obstacle => bytes.push(3),
        EncounterKind::Treasure => bytes.push(4),
        EncounterKind::Hunger => bytes.push(5),
        EncounterKind::Custom(identifier) => {
            bytes.push(6);
            push_str(bytes, identifier);
        }
    }
}
