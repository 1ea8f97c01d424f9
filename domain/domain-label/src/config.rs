//! Configuration for connected-component labeling.
//!
//! # Example
//!
//! ```
//! use domain_label::{Connectivity, LabelConfig};
//!
//! let config = LabelConfig::volumetric()
//!     .with_connectivity(Connectivity::Six)
//!     .with_max_objects(64);
//! assert_eq!(config.max_objects, 64);
//! assert!(config.parallel);
//! ```

/// Neighbourhood that makes two samples part of the same component.
///
/// `Four` and `Eight` are planar; in 3-D they behave like `Six` and
/// `TwentySix` respectively. `Six`, `Eighteen` and `TwentySix` are only
/// valid for 3-D objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// Edge neighbours in the plane.
    Four,
    /// Edge and corner neighbours in the plane.
    Eight,
    /// Face neighbours in a volume.
    Six,
    /// Face and edge neighbours in a volume.
    Eighteen,
    /// Face, edge and corner neighbours in a volume.
    TwentySix,
}

impl Connectivity {
    /// Whether the connectivity applies to planar objects.
    #[must_use]
    pub const fn is_planar(self) -> bool {
        matches!(self, Self::Four | Self::Eight)
    }

    /// Whether samples touching only at a corner within a plane are joined.
    #[must_use]
    pub const fn joins_diagonals(self) -> bool {
        !matches!(self, Self::Four | Self::Six)
    }
}

/// Configuration for connected-component labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelConfig {
    /// Maximum number of components; finding more is an error.
    ///
    /// In 3-D the limit applies to every plane and to the final count.
    pub max_objects: usize,

    /// Components whose height or width, less one, is below this value are
    /// dropped. Zero keeps everything.
    pub ignore_lines: i32,

    /// Neighbourhood used to join samples.
    pub connectivity: Connectivity,

    /// Whether to use parallel processing (via rayon) for 3-D labeling.
    pub parallel: bool,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self::planar()
    }
}

impl LabelConfig {
    /// Default maximum number of components.
    pub const DEFAULT_MAX_OBJECTS: usize = 1 << 16;

    /// 8-connected labeling of planar objects.
    #[must_use]
    pub const fn planar() -> Self {
        Self {
            max_objects: Self::DEFAULT_MAX_OBJECTS,
            ignore_lines: 0,
            connectivity: Connectivity::Eight,
            parallel: true,
        }
    }

    /// 26-connected labeling of volumes.
    #[must_use]
    pub const fn volumetric() -> Self {
        Self {
            connectivity: Connectivity::TwentySix,
            ..Self::planar()
        }
    }

    /// Set the maximum number of components.
    #[must_use]
    pub const fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = max_objects;
        self
    }

    /// Set the minimum extent a component needs to be kept.
    #[must_use]
    pub const fn with_ignore_lines(mut self, ignore_lines: i32) -> Self {
        self.ignore_lines = ignore_lines;
        self
    }

    /// Set the connectivity.
    #[must_use]
    pub const fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set whether to use parallel processing.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
