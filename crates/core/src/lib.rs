pub mod content;
pub mod dungeon;
pub mod history;
pub mod history_file;
pub mod mapgen;
pub mod sync;
pub mod theme;

pub use dungeon::{Dungeon, EditError};
pub use history::{DungeonHistory, HISTORY_CAPACITY};
pub use history_file::{HistoryLoadError, load_history, save_history};
pub use mapgen::model::{
    Connection, CorridorSegment, DungeonGraph, EncounterKind, GeneratorConfig, Room, RoomType,
    START_ROOM_ID,
};
pub use mapgen::{DungeonGenerator, GenerationError, generate, generate_with_seed};
pub use sync::{LocalChannel, SYNC_CHANNEL_NAME, SnapshotChannel, SnapshotEnvelope};
pub use theme::{CustomEncounter, DungeonTheme, builtin_templates};
