//! Registry configuration parameters.

use std::error::Error;
use std::fmt;

/// Configuration for an [`AttributeRegistry`](crate::AttributeRegistry).
///
/// Controls how subsets derived from the registry decompose for parallel
/// traversal. Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Largest subset, in entries, that is never split further.
    ///
    /// Default: 1024. A subset is divisible only when it covers more than
    /// `split_grain` entries. Must be at least 1.
    pub split_grain: usize,

    /// Initial capacity of the attribute table.
    ///
    /// Default: 8. Purely a sizing hint.
    pub expected_attributes: usize,
}

impl StoreConfig {
    /// Default split grain.
    pub const DEFAULT_SPLIT_GRAIN: usize = 1024;

    /// Default attribute table capacity.
    pub const DEFAULT_EXPECTED_ATTRIBUTES: usize = 8;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            split_grain: Self::DEFAULT_SPLIT_GRAIN,
            expected_attributes: Self::DEFAULT_EXPECTED_ATTRIBUTES,
        }
    }

    /// Override the split grain.
    pub fn with_split_grain(mut self, split_grain: usize) -> Self {
        self.split_grain = split_grain;
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.split_grain == 0 {
            return Err(ConfigError::ZeroSplitGrain);
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors detected by [`StoreConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `split_grain` is zero.
    ZeroSplitGrain,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSplitGrain => write!(f, "split_grain must be at least 1"),
        }
    }
}

impl Error for ConfigError {}
