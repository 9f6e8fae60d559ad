use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::*;
use crate::mapgen::model::GeneratorConfig;
use crate::theme::DungeonTheme;

fn make_test_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

fn dungeon(tag: &str) -> Dungeon {
    let mut dungeon = Dungeon::generate_seeded(
        GeneratorConfig { complexity: 5, branching: 1 },
        DungeonTheme::default(),
        tag,
    )
    .expect("config is valid");
    dungeon.id = format!("dungeon-{tag}");
    dungeon.name = format!("Expedition {tag}");
    dungeon
}

fn three_entry_history() -> DungeonHistory {
    let mut history = DungeonHistory::new();
    history.remember(dungeon("first"));
    history.remember(dungeon("second"));
    history.remember(dungeon("third"));
    history
}

#[test]
fn saved_history_round_trips() {
    let dir = tempdir().unwrap();
    let path = make_test_path(dir.path(), "roundtrip.jsonl");

    let history = three_entry_history();
    save_history(&path, &history).unwrap();

    let loaded = load_history(&path).unwrap();
    assert_eq!(loaded, history);

    let ids: Vec<&str> = loaded.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec!["dungeon-third", "dungeon-second", "dungeon-first"]);
}

#[test]
fn empty_history_saves_as_a_bare_header() {
    let dir = tempdir().unwrap();
    let path = make_test_path(dir.path(), "empty.jsonl");

    save_history(&path, &DungeonHistory::new()).unwrap();

    let loaded = load_history(&path).unwrap();
    assert!(loaded.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
}

#[test]
fn hash_chain_detects_a_tampered_record() {
    let dir = tempdir().unwrap();
    let path = make_test_path(dir.path(), "tampered.jsonl");

    save_history(&path, &three_entry_history()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let mut lines: Vec<String> = content.lines().map(String::from).collect();
    assert_eq!(lines.len(), 4, "header + 3 records");
    lines[2] = lines[2].replace("Expedition second", "Expedition forged");
    fs::write(&path, lines.join("\n") + "\n").unwrap();

    let result = load_history(&path);
    assert!(
        matches!(result, Err(HistoryLoadError::HashChainBroken { line: 3 })),
        "expected hash chain broken at line 3, got: {result:?}"
    );
}

#[test]
fn hash_chain_detects_a_deleted_record() {
    let dir = tempdir().unwrap();
    let path = make_test_path(dir.path(), "deleted.jsonl");

    save_history(&path, &three_entry_history()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    let tampered = format!("{}\n{}\n{}\n", lines[0], lines[1], lines[3]);
    fs::write(&path, tampered).unwrap();

    let result = load_history(&path);
    assert!(
        matches!(result, Err(HistoryLoadError::InvalidRecord { line: 3, .. })),
        "positions desynchronize before the chain check, got: {result:?}"
    );
}

#[test]
fn missing_trailing_newline_is_an_incomplete_line() {
    let dir = tempdir().unwrap();
    let path = make_test_path(dir.path(), "truncated.jsonl");

    save_history(&path, &three_entry_history()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    fs::write(&path, content.trim_end_matches('\n')).unwrap();

    let result = load_history(&path);
    assert!(
        matches!(result, Err(HistoryLoadError::IncompleteLine { line: 4 })),
        "got: {result:?}"
    );
}

#[test]
fn empty_file_and_missing_file_report_distinct_errors() {
    let dir = tempdir().unwrap();

    let empty = make_test_path(dir.path(), "zero-bytes.jsonl");
    fs::write(&empty, "").unwrap();
    assert!(matches!(load_history(&empty), Err(HistoryLoadError::EmptyFile)));

    let missing = make_test_path(dir.path(), "never-written.jsonl");
    assert!(matches!(load_history(&missing), Err(HistoryLoadError::Io(_))));
}

#[test]
fn future_format_versions_are_rejected_not_migrated() {
    let dir = tempdir().unwrap();
    let path = make_test_path(dir.path(), "future.jsonl");

    save_history(&path, &DungeonHistory::new()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let bumped = content.replace("\"format_version\":1", "\"format_version\":2");
    assert_ne!(bumped, content, "header layout changed; update this test");
    fs::write(&path, bumped).unwrap();

    let result = load_history(&path);
    assert!(matches!(result, Err(HistoryLoadError::InvalidHeader { line: 1, .. })), "{result:?}");
}

#[test]
fn garbage_record_line_is_an_invalid_record() {
    let dir = tempdir().unwrap();
    let path = make_test_path(dir.path(), "garbage.jsonl");

    save_history(&path, &three_entry_history()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let mut lines: Vec<String> = content.lines().map(String::from).collect();
    lines[1] = "not json at all".to_string();
    fs::write(&path, lines.join("\n") + "\n").unwrap();

    let result = load_history(&path);
    assert!(matches!(result, Err(HistoryLoadError::InvalidRecord { line: 2, .. })), "{result:?}");
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("history.jsonl");

    save_history(&path, &three_entry_history()).unwrap();

    assert!(path.exists());
    assert_eq!(load_history(&path).unwrap().len(), 3);
}
