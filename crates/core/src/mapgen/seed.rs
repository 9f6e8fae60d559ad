//! Deterministic pseudo-random stream and session seed minting for map generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use super::GenerationError;

const LCG_MULTIPLIER: u64 = 1_664_525;
const LCG_INCREMENT: u64 = 1_013_904_223;
const LCG_MODULUS: u64 = 1 << 32;

/// Reproducible pseudo-random stream derived from a seed string.
///
/// The seed string is folded into a 32-bit state with a rolling
/// `hash * 31 + code_unit` hash over UTF-16 code units, wrapped to 32-bit
/// signed and made non-negative. Each draw advances a linear congruential
/// step `state = (state * 1664525 + 1013904223) mod 2^32`. The constants are
/// load-bearing: equal seed strings yield bit-identical sequences across
/// conforming implementations.
///
/// One instance per generation pass; never shared across calls.
pub struct SeedStream {
    state: u64,
}

impl SeedStream {
    pub fn from_seed(seed: &str) -> Self {
        let mut hash: i32 = 0;
        for unit in seed.encode_utf16() {
            hash = hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(i32::from(unit));
        }
        Self { state: u64::from(hash.unsigned_abs()) }
    }

    /// Next value in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }

    /// Integer in `[min, max]` inclusive.
    pub fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max);
        let span = f64::from(max - min + 1);
        min + (self.next_unit() * span) as i32
    }

    /// Uniform choice from a non-empty slice. Duplicate entries weight the
    /// draw; an empty slice is a contract violation, not a sentinel.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, GenerationError> {
        if items.is_empty() {
            return Err(GenerationError::EmptyCandidatePool);
        }
        let index = (self.next_unit() * items.len() as f64) as usize;
        Ok(&items[index])
    }

    /// Choice from an explicit weight table, one draw per call. The table
    /// must be non-empty with a positive total weight.
    pub fn pick_weighted<'a, T>(
        &mut self,
        table: &'a [(T, u32)],
    ) -> Result<&'a T, GenerationError> {
        let total: u64 = table.iter().map(|(_, weight)| u64::from(*weight)).sum();
        if total == 0 {
            return Err(GenerationError::EmptyCandidatePool);
        }
        let roll = (self.next_unit() * total as f64) as u64;
        let mut cumulative = 0_u64;
        for (item, weight) in table {
            cumulative += u64::from(*weight);
            if roll < cumulative {
                return Ok(item);
            }
        }
        // Unreachable: roll < total and the cumulative sum reaches total.
        Err(GenerationError::EmptyCandidatePool)
    }
}

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

pub(crate) fn session_entropy() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(std::process::id());
    let counter = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    let mut rng = ChaCha8Rng::seed_from_u64(entropy);
    rng.next_u64()
}

/// Mint a fresh base-36 seed string for one generation call. Generation is
/// intentionally not reproducible across calls, only within one.
pub fn mint_session_seed() -> String {
    to_base36(session_entropy())
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base-36 digits are ASCII")
}
