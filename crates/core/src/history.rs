//! Most-recent-first history of generated dungeons, bounded so regenerating
//! maps all evening cannot grow storage without limit.

use serde::{Deserialize, Serialize};

use crate::dungeon::Dungeon;

pub const HISTORY_CAPACITY: usize = 15;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DungeonHistory {
    entries: Vec<Dungeon>,
}

impl DungeonHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a dungeon to the front. An existing entry with the same id is
    /// replaced (edits re-remember the same dungeon); the oldest entry falls
    /// off past `HISTORY_CAPACITY`.
    pub fn remember(&mut self, dungeon: Dungeon) {
        self.entries.retain(|entry| entry.id != dungeon.id);
        self.entries.insert(0, dungeon);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn forget(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn most_recent(&self) -> Option<&Dungeon> {
        self.entries.first()
    }

    pub fn get(&self, id: &str) -> Option<&Dungeon> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Dungeon> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
