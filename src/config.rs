//! Index configuration: the domain a quadtree spans and its depth.
//!
//! Every mapper and coverer is built from one [`IndexConfig`]. Configurations
//! are plain serializable values and can be loaded from JSON, or from TOML
//! with the `toml` feature enabled.

use crate::cell_id::{DEFAULT_DEPTH_LEVELS, MAX_DEPTH_LEVELS, QuadCellId};
use crate::error::{QuadCellError, Result};
use quadcell_types::bounds::Bounds2D;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The real-world rectangle the whole quadtree maps onto.
///
/// Bounds are finite and strictly increasing on both axes; construction and
/// deserialization both enforce this.
///
/// # Examples
///
/// ```
/// use quadcell::Domain;
///
/// let pixels = Domain::new(0.0, 0.0, 16.0, 16.0).unwrap();
/// assert_eq!(pixels.width(), 16.0);
///
/// assert!(Domain::new(0.0, 0.0, 0.0, 16.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Bounds2D", into = "Bounds2D")]
pub struct Domain {
    bounds: Bounds2D,
}

impl Domain {
    /// Longitude/latitude in degrees.
    pub const GEOGRAPHIC: Domain = Domain {
        bounds: Bounds2D::new(-180.0, -90.0, 180.0, 90.0),
    };

    /// Square mercator plane used by the map data.
    pub const MERCATOR: Domain = Domain {
        bounds: Bounds2D::new(-180.0, -180.0, 180.0, 180.0),
    };

    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        Self::from_bounds(Bounds2D::new(min_x, min_y, max_x, max_y))
    }

    pub fn from_bounds(bounds: Bounds2D) -> Result<Self> {
        if !bounds.is_finite() {
            return Err(QuadCellError::InvalidDomain(format!(
                "bounds must be finite, got {:?}",
                bounds
            )));
        }
        if bounds.is_empty() {
            return Err(QuadCellError::InvalidDomain(format!(
                "min must be below max on both axes, got {:?}",
                bounds
            )));
        }
        Ok(Self { bounds })
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.bounds.min_x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.bounds.min_y
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.bounds.max_x
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.bounds.max_y
    }

    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    /// The domain as a plain rectangle.
    pub fn bounds(&self) -> Bounds2D {
        self.bounds
    }
}

impl Default for Domain {
    fn default() -> Self {
        Domain::GEOGRAPHIC
    }
}

impl TryFrom<Bounds2D> for Domain {
    type Error = QuadCellError;

    fn try_from(bounds: Bounds2D) -> Result<Self> {
        Domain::from_bounds(bounds)
    }
}

impl From<Domain> for Bounds2D {
    fn from(domain: Domain) -> Self {
        domain.bounds
    }
}

/// Configuration of one quadtree index.
///
/// # Example
///
/// ```rust
/// use quadcell::IndexConfig;
///
/// let config = IndexConfig::default();
/// assert_eq!(config.depth_levels, 19);
///
/// let json = r#"{
///     "domain": { "min_x": 0.0, "min_y": 0.0, "max_x": 16.0, "max_y": 16.0 },
///     "depth_levels": 10,
///     "default_cell_budget": 4
/// }"#;
/// let config = IndexConfig::from_json(json).unwrap();
/// assert_eq!(config.max_depth(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Rectangle spanned by the root cell
    #[serde(default)]
    pub domain: Domain,

    /// Number of quadtree levels, root included (1-31, default: 19)
    #[serde(default = "IndexConfig::default_depth_levels")]
    pub depth_levels: u8,

    /// Cell budget used by `cover_rect_with_defaults` (default: 8)
    #[serde(default = "IndexConfig::default_cell_budget")]
    pub default_cell_budget: usize,

    /// Deepest level coverings refine to by default (None means the finest level)
    #[serde(default)]
    pub default_max_depth: Option<u8>,
}

impl IndexConfig {
    const fn default_depth_levels() -> u8 {
        DEFAULT_DEPTH_LEVELS
    }

    const fn default_cell_budget() -> usize {
        8
    }

    /// Configuration over `domain` with `depth_levels` levels.
    ///
    /// # Panics
    ///
    /// Panics if `depth_levels` is not in `1..=31`.
    pub fn new(domain: Domain, depth_levels: u8) -> Self {
        assert!(
            (1..=MAX_DEPTH_LEVELS).contains(&depth_levels),
            "Depth levels must be between 1 and {}",
            MAX_DEPTH_LEVELS
        );

        Self {
            domain,
            depth_levels,
            default_cell_budget: Self::default_cell_budget(),
            default_max_depth: None,
        }
    }

    /// Longitude/latitude index with the default depth.
    pub fn geographic() -> Self {
        Self::new(Domain::GEOGRAPHIC, DEFAULT_DEPTH_LEVELS)
    }

    /// Mercator-plane index with the default depth.
    pub fn mercator() -> Self {
        Self::new(Domain::MERCATOR, DEFAULT_DEPTH_LEVELS)
    }

    pub fn with_depth_levels(mut self, depth_levels: u8) -> Self {
        assert!(
            (1..=MAX_DEPTH_LEVELS).contains(&depth_levels),
            "Depth levels must be between 1 and {}",
            MAX_DEPTH_LEVELS
        );
        self.depth_levels = depth_levels;
        self
    }

    pub fn with_default_cell_budget(mut self, budget: usize) -> Self {
        assert!(budget > 0, "Cell budget must be greater than zero");
        self.default_cell_budget = budget;
        self
    }

    pub fn with_default_max_depth(mut self, max_depth: u8) -> Self {
        assert!(
            max_depth < self.depth_levels,
            "Max depth {} must be below depth levels {}",
            max_depth,
            self.depth_levels
        );
        self.default_max_depth = Some(max_depth);
        self
    }

    /// Default covering depth, falling back to the finest level.
    pub fn max_depth(&self) -> u8 {
        self.default_max_depth
            .unwrap_or_else(|| self.depth_levels.saturating_sub(1))
    }

    /// The root cell of this index.
    pub fn root(&self) -> QuadCellId {
        QuadCellId::root(self.depth_levels)
    }

    /// Decode a cell string for this index's depth.
    pub fn parse_cell(&self, encoded: &str) -> Result<QuadCellId> {
        QuadCellId::from_str_with_depth(encoded, self.depth_levels)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.depth_levels < 1 || self.depth_levels > MAX_DEPTH_LEVELS {
            return Err(QuadCellError::InvalidConfig(format!(
                "Depth levels must be between 1 and {}",
                MAX_DEPTH_LEVELS
            )));
        }

        if self.default_cell_budget == 0 {
            return Err(QuadCellError::InvalidConfig(
                "Cell budget must be greater than zero".to_string(),
            ));
        }

        if let Some(max_depth) = self.default_max_depth
            && max_depth >= self.depth_levels
        {
            return Err(QuadCellError::InvalidConfig(format!(
                "Max depth {} must be below depth levels {}",
                max_depth, self.depth_levels
            )));
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: IndexConfig = toml::from_str(toml_str)
            .map_err(|e| QuadCellError::SerializationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| QuadCellError::SerializationError(e.to_string()))
    }

    /// Load configuration from a file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading index configuration from {}", path.display());

        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents),
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml(&contents),
            other => Err(QuadCellError::InvalidConfig(format!(
                "Unsupported configuration format: {:?}",
                other
            ))),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::geographic()
    }
}
