//! Quadtree cell indexing and budgeted rectangle covering.
//!
//! A fixed-depth quadtree is laid over a bounded 2-D [`Domain`]. Each node is
//! a [`QuadCellId`] whose string form is a prefix-stable key: the key of a
//! cell prefixes the keys of all its descendants. A [`RectangleCoverer`]
//! approximates a query rectangle with a handful of cells at mixed depths,
//! ready to be used as range-scan keys.
//!
//! ```rust
//! use quadcell::{Bounds2D, IndexConfig, RectangleCoverer};
//!
//! let coverer = RectangleCoverer::new(IndexConfig::geographic());
//! let minsk = Bounds2D::new(27.43, 53.83, 27.70, 53.96);
//! let cells = coverer.cover_rect(&minsk, 4, 18);
//!
//! assert_eq!(cells.len(), 4);
//! assert!(cells.iter().all(|c| c.to_string().starts_with("320122113")));
//! ```

pub mod cell_id;
pub mod config;
pub mod covering;
pub mod error;
pub mod intervals;
pub mod mapper;
pub mod validation;

pub use cell_id::{DEFAULT_DEPTH_LEVELS, MAX_DEPTH_LEVELS, QuadCellId};
pub use config::{Domain, IndexConfig};
pub use covering::{RectangleCoverer, split_rect_cell};
pub use error::{QuadCellError, Result};
pub use intervals::{KeyInterval, cell_interval, covering_intervals, sort_and_merge_intervals};
pub use mapper::CoordinateMapper;

pub use quadcell_types::bounds::Bounds2D;

pub use geo::{Point, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{
        Bounds2D, CoordinateMapper, Domain, IndexConfig, QuadCellError, QuadCellId,
        RectangleCoverer, Result,
    };

    pub use crate::{KeyInterval, covering_intervals};

    pub use geo::{Point, Rect};
}
