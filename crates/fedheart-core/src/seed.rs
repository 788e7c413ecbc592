use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Seed used when none is supplied.
pub const DEFAULT_SEED: u32 = 12345;

/// A validated generation seed in `[0, 2^32)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct Seed(u32);

impl Seed {
    pub fn new(value: i64) -> Result<Self> {
        u32::try_from(value).map(Seed).map_err(|_| {
            Error::Validation(format!(
                "seed must be between 0 and {} (got {value})",
                u32::MAX
            ))
        })
    }

    pub fn value(&self) -> u64 {
        u64::from(self.0)
    }

    /// Derive a per-key seed, e.g. one per data site, from this seed.
    pub fn derive(&self, key: &str) -> Seed {
        let mut hash = self.value() ^ 0xcbf29ce484222325;
        for byte in key.as_bytes() {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(0x100000001b3);
        }
        Seed((hash ^ (hash >> 32)) as u32)
    }
}

impl Default for Seed {
    fn default() -> Self {
        Seed(DEFAULT_SEED)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Seed(value)
    }
}

impl TryFrom<i64> for Seed {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Seed::new(value)
    }
}

impl From<Seed> for u64 {
    fn from(seed: Seed) -> Self {
        seed.value()
    }
}

impl FromStr for Seed {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let parsed: i64 = value
            .trim()
            .parse()
            .map_err(|_| Error::Validation(format!("seed must be an integer (got '{value}')")))?;
        Seed::new(parsed)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
