//! Allocation strategies.
//!
//! | Strategy | Picks | Splits |
//! |----------|-------|--------|
//! | `first-fit` | first free block large enough, in address order | once, exact size |
//! | `best-fit` | smallest free block large enough | once, exact size |
//! | `buddy-system` | smallest free power-of-two block large enough | in halves down to the next power of two |
//!
//! # Examples
//!
//! ```rust
//! use memsim::Strategy;
//!
//! let strategy: Strategy = "best-fit".parse().unwrap();
//! assert_eq!(strategy, Strategy::BestFit);
//! assert_eq!(strategy.to_string(), "best-fit");
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Block selection strategy for an allocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// First sufficiently large free block in address order.
    #[default]
    FirstFit,
    /// Smallest sufficiently large free block.
    BestFit,
    /// Power-of-two blocks split into halves ("buddies").
    BuddySystem,
}

impl Strategy {
    /// All strategies, in presentation order.
    pub const ALL: [Strategy; 3] = [Self::FirstFit, Self::BestFit, Self::BuddySystem];

    /// Canonical name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FirstFit => "first-fit",
            Self::BestFit => "best-fit",
            Self::BuddySystem => "buddy-system",
        }
    }

    /// One-line description for menus.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::FirstFit => "Uses first available space (fast)",
            Self::BestFit => "Uses smallest fitting space (efficient)",
            Self::BuddySystem => "Power-of-2 splitting (low fragmentation)",
        }
    }

    /// Size that must be reserved to satisfy a request of `size`.
    ///
    /// `None` when the buddy rounding does not fit in a `usize`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memsim::Strategy;
    ///
    /// assert_eq!(Strategy::FirstFit.required_size(10), Some(10));
    /// assert_eq!(Strategy::BuddySystem.required_size(10), Some(16));
    /// assert_eq!(Strategy::BuddySystem.required_size(usize::MAX), None);
    /// ```
    pub const fn required_size(&self, size: usize) -> Option<usize> {
        match self {
            Self::FirstFit | Self::BestFit => Some(size),
            Self::BuddySystem => next_power_of_two(size),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "firstfit" | "first" => Ok(Self::FirstFit),
            "bestfit" | "best" => Ok(Self::BestFit),
            "buddysystem" | "buddy" => Ok(Self::BuddySystem),
            _ => Err(Error::unknown_strategy(s)),
        }
    }
}

/// Smallest power of two that is `>= n`; 1 for `n == 0`.
///
/// Returns `None` when that power of two exceeds `usize::MAX`.
///
/// # Examples
///
/// ```rust
/// use memsim::strategy::next_power_of_two;
///
/// assert_eq!(next_power_of_two(0), Some(1));
/// assert_eq!(next_power_of_two(16), Some(16));
/// assert_eq!(next_power_of_two(17), Some(32));
/// assert_eq!(next_power_of_two(usize::MAX), None);
/// ```
pub const fn next_power_of_two(n: usize) -> Option<usize> {
    if n == 0 {
        Some(1)
    } else {
        n.checked_next_power_of_two()
    }
}
