//! High-level generation orchestration: config validation, one seed stream
//! threaded through topology and carving, footprint filtering over the
//! finished room list.

use super::GenerationError;
use super::model::{DungeonGraph, GeneratorConfig};
use super::overlap::strip_room_footprints;
use super::seed::{SeedStream, mint_session_seed};
use super::topology::build_graph;

pub struct DungeonGenerator {
    config: GeneratorConfig,
}

impl DungeonGenerator {
    /// Validate the config up front; generation itself cannot partially
    /// fail, so callers either get a full graph or nothing.
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerationError> {
        if config.complexity == 0 {
            return Err(GenerationError::ComplexityOutOfRange { requested: config.complexity });
        }
        if config.branching == 0 {
            return Err(GenerationError::BranchingOutOfRange { requested: config.branching });
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> GeneratorConfig {
        self.config
    }

    /// Generate with a freshly minted session seed. Results differ call to
    /// call on purpose; only the pass itself is deterministic.
    pub fn generate(&self) -> Result<DungeonGraph, GenerationError> {
        self.generate_with_seed(&mint_session_seed())
    }

    pub fn generate_with_seed(&self, seed: &str) -> Result<DungeonGraph, GenerationError> {
        let mut rng = SeedStream::from_seed(seed);
        let DungeonGraph { rooms, mut connections } = build_graph(&mut rng, self.config)?;
        for connection in &mut connections {
            strip_room_footprints(connection, &rooms);
        }
        Ok(DungeonGraph { rooms, connections })
    }
}
