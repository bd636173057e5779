//! Allocator configuration.
//!
//! # Examples
//!
//! ```rust
//! use memsim::config::AllocatorConfig;
//! use memsim::Strategy;
//!
//! let config = AllocatorConfig::builder()
//!     .total_size(256)
//!     .history_capacity(16)
//!     .default_strategy(Strategy::BuddySystem)
//!     .build();
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.total_size, 256);
//! ```

use crate::strategy::Strategy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default region size in KB.
pub const DEFAULT_TOTAL_SIZE: usize = 64;

/// Default number of history entries kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Configuration for an [`Allocator`](crate::Allocator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Size of the simulated region.
    pub total_size: usize,

    /// Maximum history entries retained (0 disables history).
    pub history_capacity: usize,

    /// Strategy used by [`Allocator::allocate_default`](crate::Allocator::allocate_default).
    pub default_strategy: Strategy,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            total_size: DEFAULT_TOTAL_SIZE,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            default_strategy: Strategy::FirstFit,
        }
    }
}

impl AllocatorConfig {
    /// Create a config for a region of `total_size`, other fields default.
    pub fn with_size(total_size: usize) -> Self {
        Self {
            total_size,
            ..Default::default()
        }
    }

    /// Create a new builder for `AllocatorConfig`.
    pub fn builder() -> AllocatorConfigBuilder {
        AllocatorConfigBuilder::default()
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.total_size == 0 {
            return Err(Error::config("total_size must be greater than 0"));
        }
        Ok(())
    }

    /// Parse a config from JSON; missing fields take their defaults.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memsim::config::AllocatorConfig;
    /// use memsim::Strategy;
    ///
    /// let config = AllocatorConfig::from_json(r#"{"total_size": 128, "default_strategy": "best-fit"}"#).unwrap();
    /// assert_eq!(config.total_size, 128);
    /// assert_eq!(config.default_strategy, Strategy::BestFit);
    /// assert_eq!(config.history_capacity, 64);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::config(format!("invalid config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::internal(e.to_string()))
    }
}

/// Builder for `AllocatorConfig`.
#[derive(Debug, Default)]
pub struct AllocatorConfigBuilder {
    total_size: Option<usize>,
    history_capacity: Option<usize>,
    default_strategy: Option<Strategy>,
}

impl AllocatorConfigBuilder {
    /// Set region size.
    pub const fn total_size(mut self, value: usize) -> Self {
        self.total_size = Some(value);
        self
    }

    /// Set history capacity.
    pub const fn history_capacity(mut self, value: usize) -> Self {
        self.history_capacity = Some(value);
        self
    }

    /// Set default strategy.
    pub const fn default_strategy(mut self, value: Strategy) -> Self {
        self.default_strategy = Some(value);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> AllocatorConfig {
        let default = AllocatorConfig::default();
        AllocatorConfig {
            total_size: self.total_size.unwrap_or(default.total_size),
            history_capacity: self.history_capacity.unwrap_or(default.history_capacity),
            default_strategy: self.default_strategy.unwrap_or(default.default_strategy),
        }
    }
}
