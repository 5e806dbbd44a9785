//! Construction parameters for a `Forest`.

use crate::error::{Error, Result};
use rand::{self, SeedableRng, XorShiftRng};

/// Default number of node slots reserved per arena chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Parameters used to build a `Forest`.
///
/// `chunk_size` controls how many node slots the arena reserves at a time. `seed` fixes the
/// priority generator so that tree shapes are reproducible; without it priorities are drawn from a
/// randomly seeded generator.
///
/// # Examples
///
/// ```
/// use treap_forest::Config;
///
/// let config = Config { seed: Some(7), ..Config::default() };
/// assert_eq!(config.chunk_size, 1024);
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    pub chunk_size: usize,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            chunk_size: DEFAULT_CHUNK_SIZE,
            seed: None,
        }
    }
}

impl Config {
    /// Returns a default configuration with a fixed priority seed.
    pub fn seeded(seed: u64) -> Self {
        Config {
            seed: Some(seed),
            ..Config::default()
        }
    }

    /// Checks that a forest can be built from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `chunk_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig(String::from("chunk_size must be positive")));
        }
        Ok(())
    }

    /// Builds the priority generator described by this configuration.
    pub fn rng(&self) -> XorShiftRng {
        match self.seed {
            Some(seed) => XorShiftRng::from_seed(expand_seed(seed)),
            None => rand::weak_rng(),
        }
    }
}

// XorShift rejects an all-zero state, so the last word always has its low bit set.
fn expand_seed(seed: u64) -> [u32; 4] {
    let low = seed as u32;
    let high = (seed >> 32) as u32;
    [low, high, low ^ 0x9e37_79b9, high | 1]
}

#[cfg(test)]
mod tests {
    use super::{expand_seed, Config, DEFAULT_CHUNK_SIZE};
    use crate::error::Error;
    use rand::Rng;
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_validate_rejects_zero_chunk_size() {
        assert_eq!(Config::seeded(5).validate(), Ok(()));
        let config = Config {
            chunk_size: 0,
            seed: None,
        };
        assert_eq!(
            config.validate(),
            Err(Error::InvalidConfig(String::from("chunk_size must be positive"))),
        );
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = Config::seeded(42);
        let mut first = config.rng();
        let mut second = config.rng();
        for _ in 0..16 {
            assert_eq!(first.next_u32(), second.next_u32());
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        assert_ne!(expand_seed(0), [0, 0, 0, 0]);
        let mut rng = Config::seeded(0).rng();
        rng.next_u32();
    }

    #[test]
    fn test_serde_tokens() {
        let config = Config {
            chunk_size: 64,
            seed: Some(9),
        };
        assert_tokens(
            &config,
            &[
                Token::Struct { name: "Config", len: 2 },
                Token::Str("chunk_size"),
                Token::U64(64),
                Token::Str("seed"),
                Token::Some,
                Token::U64(9),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn test_deserialize_missing_fields_uses_defaults() {
        assert_de_tokens(
            &Config::seeded(3),
            &[
                Token::Struct { name: "Config", len: 1 },
                Token::Str("seed"),
                Token::Some,
                Token::U64(3),
                Token::StructEnd,
            ],
        );
    }
}
