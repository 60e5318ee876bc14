use crate::error::{ChunkerError, Result};
use serde::{Deserialize, Serialize};

/// Smallest chunk budget the splitters will work with. Hard splits must be
/// able to advance by at least one UTF-8 scalar per window.
pub const MIN_CHUNK_SIZE: usize = 4;

/// Configuration for chunk boundaries.
///
/// Only these three values influence where chunks start and end. Sizes are
/// measured in bytes of UTF-8 text, which bounds the character count too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Target chunk size (soft limit)
    pub chunk_size: usize,

    /// Overlap carried between windows of the line-window fallback.
    /// Language-aware paths never overlap.
    pub overlap: usize,

    /// Hard upper bound for a single chunk; `None` means `3 * chunk_size`
    pub max_chunk_size: Option<usize>,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1500,
            overlap: 150,
            max_chunk_size: None,
        }
    }
}

/// Effective limits after defaults and clamping are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Limits {
    pub chunk_size: usize,
    pub max_chunk_size: usize,
    pub overlap: usize,
}

impl ChunkerConfig {
    /// Create a config with the given target size and a 10% window overlap
    #[must_use]
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            overlap: chunk_size / 10,
            max_chunk_size: None,
        }
    }

    /// Create config optimized for embeddings (smaller, focused chunks)
    #[must_use]
    pub fn for_embeddings() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 100,
            max_chunk_size: None,
        }
    }

    /// Create config optimized for LLM context (larger, comprehensive chunks)
    #[must_use]
    pub fn for_llm_context() -> Self {
        Self {
            chunk_size: 4000,
            overlap: 400,
            max_chunk_size: Some(8000),
        }
    }

    /// Parse a config from TOML. Accepts either the bare fields or a
    /// `[chunking]` table as embedded in a project config file.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut table: toml::Table = toml::from_str(text)?;
        let config: Self = match table.remove("chunking") {
            Some(chunking) => chunking.try_into::<Self>()?,
            None => toml::Value::Table(table).try_into::<Self>()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Hard upper bound for one chunk
    #[must_use]
    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
            .unwrap_or_else(|| self.chunk_size.saturating_mul(3))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size < MIN_CHUNK_SIZE {
            return Err(ChunkerError::invalid_config(format!(
                "chunk_size ({}) must be at least {MIN_CHUNK_SIZE}",
                self.chunk_size
            )));
        }

        if self.max_chunk_size() < self.chunk_size {
            return Err(ChunkerError::invalid_config(format!(
                "max_chunk_size ({}) cannot be smaller than chunk_size ({})",
                self.max_chunk_size(),
                self.chunk_size
            )));
        }

        if self.overlap >= self.chunk_size {
            return Err(ChunkerError::invalid_config(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }

        Ok(())
    }

    /// Limits used by the splitters. Out-of-range values are clamped rather
    /// than rejected so that an unvalidated config still terminates.
    pub(crate) fn limits(&self) -> Limits {
        let chunk_size = self.chunk_size.max(MIN_CHUNK_SIZE);
        let max_chunk_size = self.max_chunk_size().max(chunk_size);
        Limits {
            chunk_size,
            max_chunk_size,
            overlap: self.overlap.min(chunk_size - 1),
        }
    }
}
