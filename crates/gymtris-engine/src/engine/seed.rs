use std::{fmt, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::SeedParseError;

/// Seed for an engine instance's piece generator.
///
/// This is a 128-bit (16-byte) seed for the `Pcg32` owned by each
/// [`TetrisEnv`](super::TetrisEnv). The same seed always yields the same
/// piece sequence, so sessions can be reproduced in tests and rollouts.
///
/// Serialised and parsed as 32 hexadecimal digits.
///
/// # Example
///
/// ```
/// use gymtris_engine::{EnvSeed, TetrisEnv};
///
/// let seed: EnvSeed = "000000000000000000000000000000ff".parse().unwrap();
/// let a = TetrisEnv::with_seed(seed);
/// let b = TetrisEnv::with_seed(seed);
/// assert_eq!(a.active_piece(), b.active_piece());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvSeed(pub(crate) [u8; 16]);

impl From<u128> for EnvSeed {
    fn from(value: u128) -> Self {
        Self(value.to_be_bytes())
    }
}

impl From<EnvSeed> for u128 {
    fn from(seed: EnvSeed) -> Self {
        u128::from_be_bytes(seed.0)
    }
}

impl fmt::Display for EnvSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for EnvSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(SeedParseError::Length { len: s.len() });
        }
        let num = u128::from_str_radix(s, 16).map_err(SeedParseError::Digits)?;
        Ok(Self::from(num))
    }
}

impl Serialize for EnvSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EnvSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `EnvSeed` values using the standard random distribution.
impl Distribution<EnvSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> EnvSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        EnvSeed(seed)
    }
}
