//! File-backed dungeon history with a SHA-256 hash chain.
//!
//! The file format is line-delimited JSON (`.jsonl`):
//! - Line 1: header with `format_version` and `app_tag`.
//! - Lines 2+: one record per remembered dungeon, newest first, each
//!   carrying a SHA-256 hash chain (`prev_sha256_hex`, `sha256_hex`) for
//!   corruption detection.
//!
//! Saving rewrites the whole file (the ring mutates at the front) and
//! flushes before returning. Loading validates every line's JSON shape and
//! SHA-256 chain, stopping at the first invalid or incomplete line. Files
//! from other format versions are rejected, not migrated.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::dungeon::Dungeon;
use crate::history::DungeonHistory;

const FORMAT_VERSION: u16 = 1;
const APP_TAG: &str = "mapweaver";

// ---------------------------------------------------------------------------
// File format structs
// ---------------------------------------------------------------------------

/// First line of the JSONL history file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct FileHeader {
    format_version: u16,
    app_tag: String,
}

/// Fields used to compute the canonical SHA-256 for a record.
/// Serialized to JSON as the hash input (concatenated with `prev_sha256_hex`).
#[derive(Serialize)]
struct RecordBody<'a> {
    position: u32,
    dungeon: &'a Dungeon,
}

/// Full record line written to the JSONL file.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    position: u32,
    dungeon: Dungeon,
    prev_sha256_hex: String,
    sha256_hex: String,
}

// ---------------------------------------------------------------------------
// SHA-256 helpers
// ---------------------------------------------------------------------------

/// The initial previous-hash used for the first record in a chain.
const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Compute `hex(SHA-256(body_json || prev_sha256_hex))`.
fn compute_record_sha256(body_json: &str, prev_sha256_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    hasher.update(prev_sha256_hex.as_bytes());
    let result = hasher.finalize();
    format!("{result:064x}")
}

// ---------------------------------------------------------------------------
// Saving
// ---------------------------------------------------------------------------

/// Write the whole history to `path`, newest entry first, creating parent
/// directories as needed.
pub fn save_history(path: &Path, history: &DungeonHistory) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let header = FileHeader { format_version: FORMAT_VERSION, app_tag: APP_TAG.to_string() };
    let header_json = serde_json::to_string(&header).map_err(io::Error::other)?;
    writeln!(writer, "{header_json}")?;

    let mut prev_sha256_hex = INITIAL_HASH.to_string();
    for (index, dungeon) in history.iter().enumerate() {
        let position = index as u32;
        let body = RecordBody { position, dungeon };
        let body_json = serde_json::to_string(&body).map_err(io::Error::other)?;
        let sha256_hex = compute_record_sha256(&body_json, &prev_sha256_hex);

        let record = FileRecord {
            position,
            dungeon: dungeon.clone(),
            prev_sha256_hex: prev_sha256_hex.clone(),
            sha256_hex: sha256_hex.clone(),
        };
        let record_json = serde_json::to_string(&record).map_err(io::Error::other)?;
        writeln!(writer, "{record_json}")?;

        prev_sha256_hex = sha256_hex;
    }

    writer.flush()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Describes why a history file could not be fully loaded.
#[derive(Debug)]
pub enum HistoryLoadError {
    /// Underlying I/O failure.
    Io(io::Error),
    /// The file contains no lines at all.
    EmptyFile,
    /// The header line could not be parsed, or names a format this build
    /// does not read.
    InvalidHeader { line: usize, message: String },
    /// A record line could not be parsed or its fields are inconsistent.
    InvalidRecord { line: usize, message: String },
    /// A line is incomplete (for example, file ended without trailing newline).
    IncompleteLine { line: usize },
    /// The SHA-256 chain is broken (prev hash mismatch or recomputed hash
    /// does not match stored hash).
    HashChainBroken { line: usize },
}

impl fmt::Display for HistoryLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "history I/O error: {e}"),
            Self::EmptyFile => write!(f, "history file is empty"),
            Self::InvalidHeader { line, message } => {
                write!(f, "invalid history header at line {line}: {message}")
            }
            Self::InvalidRecord { line, message } => {
                write!(f, "invalid history record at line {line}: {message}")
            }
            Self::IncompleteLine { line } => {
                write!(f, "incomplete history line at line {line}")
            }
            Self::HashChainBroken { line } => {
                write!(f, "SHA-256 hash chain broken at line {line}")
            }
        }
    }
}

/// Load and validate a JSONL history file.
///
/// Stops at the first invalid, incomplete, or hash-broken line and returns
/// an error describing the problem; a valid file reproduces the saved ring
/// newest-first.
pub fn load_history(path: &Path) -> Result<DungeonHistory, HistoryLoadError> {
    let content = fs::read_to_string(path).map_err(HistoryLoadError::Io)?;
    if content.is_empty() {
        return Err(HistoryLoadError::EmptyFile);
    }
    let has_trailing_newline = content.ends_with('\n');
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(HistoryLoadError::EmptyFile);
    }
    if !has_trailing_newline {
        return Err(HistoryLoadError::IncompleteLine { line: lines.len() });
    }

    // --- header (line 1) ---
    let header: FileHeader = serde_json::from_str(lines[0])
        .map_err(|e| HistoryLoadError::InvalidHeader { line: 1, message: e.to_string() })?;
    if header.format_version != FORMAT_VERSION {
        return Err(HistoryLoadError::InvalidHeader {
            line: 1,
            message: format!(
                "format version {} is not readable by this build (wants {FORMAT_VERSION})",
                header.format_version
            ),
        });
    }

    let mut prev_sha256_hex = INITIAL_HASH.to_string();
    let mut next_position: u32 = 0;
    let mut dungeons = Vec::new();

    // --- records (lines 2+) ---
    for (line_index, line) in lines.iter().skip(1).enumerate() {
        let line_number = line_index + 2; // 1-indexed; header is line 1

        if line.is_empty() {
            return Err(HistoryLoadError::InvalidRecord {
                line: line_number,
                message: "empty line".to_string(),
            });
        }

        let record: FileRecord = serde_json::from_str(line).map_err(|e| {
            HistoryLoadError::InvalidRecord { line: line_number, message: e.to_string() }
        })?;

        if record.position != next_position {
            return Err(HistoryLoadError::InvalidRecord {
                line: line_number,
                message: format!("expected position {next_position}, found {}", record.position),
            });
        }

        // Verify prev_sha256 link
        if record.prev_sha256_hex != prev_sha256_hex {
            return Err(HistoryLoadError::HashChainBroken { line: line_number });
        }

        // Recompute canonical hash and verify
        let body = RecordBody { position: record.position, dungeon: &record.dungeon };
        let body_json = serde_json::to_string(&body).map_err(|e| {
            HistoryLoadError::InvalidRecord { line: line_number, message: e.to_string() }
        })?;
        let expected_sha256 = compute_record_sha256(&body_json, &prev_sha256_hex);
        if record.sha256_hex != expected_sha256 {
            return Err(HistoryLoadError::HashChainBroken { line: line_number });
        }

        prev_sha256_hex = record.sha256_hex;
        next_position += 1;
        dungeons.push(record.dungeon);
    }

    // The file stores newest-first, exactly the remember() order.
    let mut history = DungeonHistory::new();
    for dungeon in dungeons.into_iter().rev() {
        history.remember(dungeon);
    }
    Ok(history)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests;
