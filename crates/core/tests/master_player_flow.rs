//! End-to-end pass over the authoring surface: generate, reveal, broadcast,
//! project for the player, and persist the session history.

use tempfile::tempdir;

use weaver_core::sync::LocalChannel;
use weaver_core::{
    Dungeon, DungeonHistory, GeneratorConfig, SnapshotChannel, SnapshotEnvelope, START_ROOM_ID,
    builtin_templates, load_history, save_history,
};

fn new_dungeon(seed: &str) -> Dungeon {
    let (_, theme) = builtin_templates().swap_remove(0);
    Dungeon::generate_seeded(GeneratorConfig { complexity: 10, branching: 2 }, theme, seed)
        .expect("config is valid")
}

#[test]
fn master_reveals_flow_to_the_player_through_snapshots() {
    let mut master = new_dungeon("session");
    let mut channel = LocalChannel::new();

    channel.publish(&SnapshotEnvelope::new(master.clone())).unwrap();

    master.toggle_room_revealed("room-1-0").unwrap();
    let (from_id, to_id, segment_id) = {
        let connection = master
            .connections
            .iter()
            .find(|connection| !connection.segments.is_empty())
            .expect("corridors exist at this spacing");
        (
            connection.from_id.clone(),
            connection.to_id.clone(),
            connection.segments[0].id.clone(),
        )
    };
    master.toggle_segment_revealed(&from_id, &to_id, &segment_id).unwrap();
    channel.publish(&SnapshotEnvelope::new(master.clone())).unwrap();

    let received = channel.latest().expect("a snapshot was published");
    assert!(received.verify(), "snapshot survives the hop intact");

    let player = received.dungeon.player_view();
    let player_ids: Vec<&str> = player.rooms.iter().map(|room| room.id.as_str()).collect();
    assert!(player_ids.contains(&START_ROOM_ID));
    assert!(player_ids.contains(&"room-1-0"));
    assert_eq!(player.rooms.len(), 2, "unrevealed rooms stay hidden from players");
    assert_eq!(player.segment_count(), 1);
}

#[test]
fn session_history_survives_a_save_and_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("expeditions.jsonl");

    let mut history = DungeonHistory::new();
    let mut latest = new_dungeon("evening-1");
    latest.reveal_all();
    history.remember(new_dungeon("evening-0"));
    history.remember(latest.clone());

    save_history(&path, &history).unwrap();
    let restored = load_history(&path).unwrap();

    assert_eq!(restored, history);
    let restored_latest = restored.most_recent().expect("history is non-empty");
    assert_eq!(restored_latest.snapshot_hash(), latest.snapshot_hash());
    assert!(restored_latest.rooms.iter().all(|room| room.revealed));
}
