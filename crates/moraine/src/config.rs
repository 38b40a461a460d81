//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for an [`Arena`](crate::Arena).
///
/// The standard block size is the only knob; the large-request threshold is
/// derived from it. Validated when the arena is constructed; immutable
/// afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of each standard block in bytes.
    ///
    /// Default: 4096 (one memory page). Must be a power of two and at least
    /// [`ArenaConfig::MIN_BLOCK_SIZE`].
    pub block_size: usize,
}

impl ArenaConfig {
    /// Default standard block size: one memory page.
    pub const DEFAULT_BLOCK_SIZE: usize = 4096;

    /// Smallest accepted standard block size.
    ///
    /// Below this the large-request threshold collapses and nearly every
    /// request would take the dedicated-block path.
    pub const MIN_BLOCK_SIZE: usize = 512;

    /// Create a config with the given standard block size.
    ///
    /// The size is checked by [`ArenaConfig::validate`] when the arena is
    /// built, not here.
    pub fn new(block_size: usize) -> Self {
        Self { block_size }
    }

    /// Requests above this size take a dedicated block instead of refilling
    /// the bump cursor: one quarter of the standard block size.
    ///
    /// Refilling on a larger request would strand up to `block_size - 1`
    /// bytes of the previous block; capping refills at a quarter bounds the
    /// stranded tail to `large_threshold() - 1` bytes per transition.
    pub fn large_threshold(&self) -> usize {
        self.block_size / 4
    }

    /// Check the block size constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidBlockSize`] if `block_size` is not a
    /// power of two or is smaller than [`ArenaConfig::MIN_BLOCK_SIZE`].
    pub fn validate(&self) -> Result<(), ArenaError> {
        if !self.block_size.is_power_of_two() || self.block_size < Self::MIN_BLOCK_SIZE {
            return Err(ArenaError::InvalidBlockSize {
                block_size: self.block_size,
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BLOCK_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_block_size_is_one_page() {
        let config = ArenaConfig::default();
        assert_eq!(config.block_size, 4096);
        config.validate().unwrap();
    }

    #[test]
    fn threshold_is_quarter_of_block_size() {
        assert_eq!(ArenaConfig::default().large_threshold(), 1024);
        assert_eq!(ArenaConfig::new(8192).large_threshold(), 2048);
    }

    #[test]
    fn validate_rejects_non_power_of_two() {
        let result = ArenaConfig::new(1000).validate();
        assert_eq!(
            result,
            Err(ArenaError::InvalidBlockSize { block_size: 1000 })
        );
    }

    #[test]
    fn validate_rejects_undersized_block() {
        let result = ArenaConfig::new(256).validate();
        assert_eq!(result, Err(ArenaError::InvalidBlockSize { block_size: 256 }));
    }

    #[test]
    fn validate_accepts_min_block_size() {
        ArenaConfig::new(ArenaConfig::MIN_BLOCK_SIZE).validate().unwrap();
    }
}
