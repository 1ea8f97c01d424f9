//! Configuration for set operations.
//!
//! # Example
//!
//! ```
//! use domain_setops::SetOpConfig;
//!
//! let config = SetOpConfig::averaging().with_parallel(false);
//! assert!(config.average_values);
//! assert!(!config.parallel);
//! ```

/// Configuration for N-way set operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetOpConfig {
    /// Whether object-level operations compute averaged grey values.
    /// Each output sample gets the mean of the inputs covering it.
    pub average_values: bool,

    /// Whether to use parallel processing (via rayon) for 3-D operations.
    pub parallel: bool,
}

impl Default for SetOpConfig {
    fn default() -> Self {
        Self {
            average_values: false,
            parallel: true,
        }
    }
}

impl SetOpConfig {
    /// Configuration that averages grey values.
    #[must_use]
    pub fn averaging() -> Self {
        Self {
            average_values: true,
            ..Self::default()
        }
    }

    /// Set whether grey values are averaged.
    #[must_use]
    pub const fn with_average_values(mut self, average: bool) -> Self {
        self.average_values = average;
        self
    }

    /// Set whether to use parallel processing.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
