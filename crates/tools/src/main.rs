use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use weaver_core::{Dungeon, DungeonTheme, GeneratorConfig, builtin_templates, load_history};

#[derive(Parser)]
#[command(author, version, about = "Generate and inspect layered dungeon maps", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a dungeon, print a summary, optionally write the JSON
    Generate {
        /// Depth driver: layers = max(3, complexity / 2)
        #[arg(long, default_value_t = 12)]
        complexity: u32,
        /// Maximum siblings per layer, minus one
        #[arg(long, default_value_t = 2)]
        branching: u32,
        /// Explicit seed string; omit for a fresh expedition every run
        #[arg(long)]
        seed: Option<String>,
        /// Theme template name (Crimson, Toxic, Frozen, Ethereal)
        #[arg(long, default_value = "Crimson")]
        theme: String,
        /// Write the full dungeon JSON to this path
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a summary of a dungeon JSON file
    Inspect {
        /// Path to a dungeon JSON file
        file: PathBuf,
    },
    /// List the expeditions stored in a history file
    History {
        /// Path to a history JSONL file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    match Args::parse().command {
        Command::Generate { complexity, branching, seed, theme, out } => {
            run_generate(complexity, branching, seed.as_deref(), &theme, out.as_deref())
        }
        Command::Inspect { file } => run_inspect(&file),
        Command::History { file } => run_history(&file),
    }
}

fn run_generate(
    complexity: u32,
    branching: u32,
    seed: Option<&str>,
    theme_name: &str,
    out: Option<&Path>,
) -> Result<()> {
    let config = GeneratorConfig { complexity, branching };
    let theme = resolve_theme(theme_name)?;

    let dungeon = match seed {
        Some(seed) => Dungeon::generate_seeded(config, theme, seed),
        None => Dungeon::generate(config, theme),
    }
    .map_err(|e| anyhow::anyhow!("Generation failed: {e}"))?;

    print_summary(&dungeon);

    if let Some(path) = out {
        let json = serde_json::to_string_pretty(&dungeon)
            .context("Failed to serialize the dungeon to JSON")?;
        fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn run_inspect(file: &Path) -> Result<()> {
    let data = fs::read_to_string(file)
        .with_context(|| format!("Failed to read dungeon file: {}", file.display()))?;
    let dungeon: Dungeon =
        serde_json::from_str(&data).context("Failed to deserialize dungeon JSON")?;

    print_summary(&dungeon);

    let revealed_rooms = dungeon.rooms.iter().filter(|room| room.revealed).count();
    let total_segments: usize =
        dungeon.connections.iter().map(|connection| connection.segments.len()).sum();
    let revealed_segments = dungeon
        .connections
        .iter()
        .flat_map(|connection| &connection.segments)
        .filter(|segment| segment.revealed)
        .count();
    println!(
        "Revealed: {revealed_rooms}/{} rooms, {revealed_segments}/{total_segments} segments",
        dungeon.rooms.len()
    );

    Ok(())
}

fn run_history(file: &Path) -> Result<()> {
    let history = load_history(file)
        .map_err(|e| anyhow::anyhow!("Failed to load history {}: {e}", file.display()))?;

    println!("{} expedition(s), newest first:", history.len());
    for dungeon in history.iter() {
        println!(
            "  {} ({}) - {} rooms, created at {} ms",
            dungeon.name,
            dungeon.id,
            dungeon.rooms.len(),
            dungeon.created_at_ms
        );
    }

    Ok(())
}

fn resolve_theme(name: &str) -> Result<DungeonTheme> {
    builtin_templates()
        .into_iter()
        .find(|(template_name, _)| template_name.eq_ignore_ascii_case(name))
        .map(|(_, theme)| theme)
        .with_context(|| format!("Unknown theme template: {name}"))
}

fn print_summary(dungeon: &Dungeon) {
    println!("{} ({})", dungeon.name, dungeon.id);
    println!(
        "Config: complexity {}, branching {}",
        dungeon.config.complexity, dungeon.config.branching
    );

    let columns: BTreeSet<i32> = dungeon.rooms.iter().map(|room| room.grid_x).collect();
    println!("Layers: {}", columns.len().saturating_sub(1));

    let mut per_type: BTreeMap<String, usize> = BTreeMap::new();
    for room in &dungeon.rooms {
        *per_type.entry(format!("{:?}", room.room_type)).or_default() += 1;
    }
    let breakdown: Vec<String> =
        per_type.iter().map(|(room_type, count)| format!("{room_type} x{count}")).collect();
    println!("Rooms: {} ({})", dungeon.rooms.len(), breakdown.join(", "));

    let segments: usize =
        dungeon.connections.iter().map(|connection| connection.segments.len()).sum();
    println!("Connections: {} carrying {segments} corridor segments", dungeon.connections.len());
    println!("Snapshot hash: {:016x}", dungeon.snapshot_hash());
}
