//! Visual theme snapshots carried by a dungeon. Pure data: the rendering
//! layer interprets these values, the core only stores and swaps them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::mapgen::model::RoomType;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DungeonTheme {
    pub primary: String,
    pub bg: String,
    pub room_bg: String,
    pub corridor: String,
    pub text: String,
    pub master_mode_opacity: f32,
    pub room_icons: BTreeMap<RoomType, String>,
    /// Keyed by encounter identifier (`EncounterKind::identifier`), so
    /// custom encounters slot in beside the built-in kinds.
    pub encounter_icons: BTreeMap<String, String>,
}

impl Default for DungeonTheme {
    fn default() -> Self {
        palette("#f43f5e", "#050505", "#111111", "#1c1c1c")
    }
}

/// A registry entry backing `EncounterKind::Custom` identifiers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEncounter {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub color: String,
}

/// Named presets the sidebar offers; the first one is the default theme.
pub fn builtin_templates() -> Vec<(&'static str, DungeonTheme)> {
    vec![
        ("Crimson", DungeonTheme::default()),
        ("Toxic", palette("#22c55e", "#050a05", "#101a10", "#152515")),
        ("Frozen", palette("#38bdf8", "#020810", "#0a1a2f", "#0f253f")),
        ("Ethereal", palette("#a855f7", "#050510", "#101025", "#151530")),
    ]
}

fn palette(primary: &str, bg: &str, room_bg: &str, corridor: &str) -> DungeonTheme {
    DungeonTheme {
        primary: primary.to_string(),
        bg: bg.to_string(),
        room_bg: room_bg.to_string(),
        corridor: corridor.to_string(),
        text: "#e7e5e4".to_string(),
        master_mode_opacity: 0.35,
        room_icons: default_room_icons(),
        encounter_icons: default_encounter_icons(),
    }
}

fn default_room_icons() -> BTreeMap<RoomType, String> {
    [
        (RoomType::Start, "\u{1f6a9}"),
        (RoomType::Battle, "\u{2694}\u{fe0f}"),
        (RoomType::Treasure, "\u{1f4b0}"),
        (RoomType::Curio, "\u{1f56f}\u{fe0f}"),
        (RoomType::Camp, "\u{1f525}"),
        (RoomType::Boss, "\u{1f480}"),
        (RoomType::Empty, "\u{1f518}"),
    ]
    .into_iter()
    .map(|(room_type, icon)| (room_type, icon.to_string()))
    .collect()
}

fn default_encounter_icons() -> BTreeMap<String, String> {
    [
        ("NONE", ""),
        ("BATTLE", "\u{2694}\u{fe0f}"),
        ("TRAP", "\u{26a0}\u{fe0f}"),
        ("TREASURE", "\u{1f48e}"),
        ("OBSTACLE", "\u{1f9f1}"),
        ("HUNGER", "\u{1f356}"),
    ]
    .into_iter()
    .map(|(kind, icon)| (kind.to_string(), icon.to_string()))
    .collect()
}
