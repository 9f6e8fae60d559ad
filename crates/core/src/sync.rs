//! Snapshot envelopes for master -> player synchronization. The core only
//! defines the payload and its integrity check; the actual transport (a
//! broadcast channel, a socket, anything that moves JSON) lives outside.

use std::convert::Infallible;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::dungeon::Dungeon;

/// Well-known channel name viewers subscribe to.
pub const SYNC_CHANNEL_NAME: &str = "mapweaver-sync-v1";

/// One full-state broadcast: the whole dungeon plus a fingerprint so a
/// viewer can reject snapshots mangled in transit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEnvelope {
    pub channel: String,
    pub sent_at_ms: u64,
    pub snapshot_hash: u64,
    pub dungeon: Dungeon,
}

impl SnapshotEnvelope {
    pub fn new(dungeon: Dungeon) -> Self {
        Self {
            channel: SYNC_CHANNEL_NAME.to_string(),
            sent_at_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |duration| duration.as_millis() as u64),
            snapshot_hash: dungeon.snapshot_hash(),
            dungeon,
        }
    }

    /// True when the carried dungeon still matches the recorded fingerprint.
    pub fn verify(&self) -> bool {
        self.dungeon.snapshot_hash() == self.snapshot_hash
    }
}

/// Implemented by whatever moves envelopes between views.
pub trait SnapshotChannel {
    type Error;

    fn publish(&mut self, envelope: &SnapshotEnvelope) -> Result<(), Self::Error>;
}

/// In-process channel: keeps every published envelope, newest last. Stands
/// in for a real transport in tests and single-process setups.
#[derive(Debug, Default)]
pub struct LocalChannel {
    published: Vec<SnapshotEnvelope>,
}

impl LocalChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<&SnapshotEnvelope> {
        self.published.last()
    }

    pub fn published(&self) -> &[SnapshotEnvelope] {
        &self.published
    }
}

impl SnapshotChannel for LocalChannel {
    type Error = Infallible;

    fn publish(&mut self, envelope: &SnapshotEnvelope) -> Result<(), Self::Error> {
        self.published.push(envelope.clone());
        Ok(())
    }
}
