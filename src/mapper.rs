//! Conversion between domain coordinates and quadtree cells.

use crate::cell_id::QuadCellId;
use crate::config::{Domain, IndexConfig};
use crate::error::Result;
use crate::validation::validate_point;
use geo::{Point, Rect};
use quadcell_types::bounds::Bounds2D;

/// Maps points and rectangles of one [`Domain`] onto cells of one tree depth.
///
/// The finest level splits the domain into a `2^(depth_levels - 1)` square
/// grid. Points on a split line belong to the higher quadrant at every level,
/// except on the domain's own maximum edges, which belong to the last
/// row/column.
///
/// # Examples
///
/// ```rust
/// use quadcell::{CoordinateMapper, Domain, IndexConfig};
///
/// let mapper = CoordinateMapper::new(IndexConfig::new(
///     Domain::new(0.0, 0.0, 16.0, 16.0).unwrap(),
///     3,
/// ));
///
/// let cell = mapper.to_cell_id(5.0, 9.0);
/// assert_eq!(cell.to_string(), "21");
///
/// let bounds = mapper.cell_bounds(&cell);
/// assert_eq!((bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y), (4.0, 8.0, 8.0, 12.0));
/// ```
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    config: IndexConfig,
    grid_size: u32,
}

impl CoordinateMapper {
    /// Create a mapper for `config`.
    ///
    /// # Panics
    ///
    /// Panics if the configured depth levels are out of range.
    pub fn new(config: IndexConfig) -> Self {
        let grid_size = config.root().size_in_finest_cells();
        Self { config, grid_size }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn domain(&self) -> &Domain {
        &self.config.domain
    }

    pub fn depth_levels(&self) -> u8 {
        self.config.depth_levels
    }

    /// The root cell of this mapper's tree.
    pub fn root(&self) -> QuadCellId {
        self.config.root()
    }

    /// Position of the `index`-th grid line along one axis.
    ///
    /// Both point lookup and cell bounds go through this, so a point is
    /// always inside the bounds of its own cell. The last line is the
    /// domain's maximum edge itself.
    fn grid_line(&self, index: u32, min: f64, max: f64) -> f64 {
        if index >= self.grid_size {
            max
        } else {
            min + f64::from(index) * ((max - min) / f64::from(self.grid_size))
        }
    }

    fn to_grid(&self, value: f64, min: f64, max: f64) -> u32 {
        let scaled = (value - min) / (max - min) * f64::from(self.grid_size);
        // NaN and everything left of the domain land in the first column.
        let mut index = if scaled.is_nan() || scaled < 0.0 {
            0
        } else if scaled >= f64::from(self.grid_size) {
            self.grid_size - 1
        } else {
            scaled as u32
        };

        // The scaled estimate can be one off next to a grid line.
        while index > 0 && value < self.grid_line(index, min, max) {
            index -= 1;
        }
        while index + 1 < self.grid_size && value >= self.grid_line(index + 1, min, max) {
            index += 1;
        }
        index
    }

    /// The finest-level cell containing `(x, y)`.
    ///
    /// Points outside the domain are clamped onto its border.
    pub fn to_cell_id(&self, x: f64, y: f64) -> QuadCellId {
        let domain = self.domain();
        if !domain.bounds().contains_point(x, y) {
            log::debug!("Clamping point ({}, {}) into the index domain", x, y);
        }

        let ix = self.to_grid(x, domain.min_x(), domain.max_x());
        let iy = self.to_grid(y, domain.min_y(), domain.max_y());
        QuadCellId::from_xy(ix, iy, self.depth_levels() - 1, self.depth_levels())
    }

    /// Like [`CoordinateMapper::to_cell_id`], but rejects non-finite points
    /// and points outside the domain instead of clamping them.
    pub fn checked_cell_id(&self, x: f64, y: f64) -> Result<QuadCellId> {
        validate_point(self.domain(), x, y)?;
        Ok(self.to_cell_id(x, y))
    }

    pub fn point_to_cell_id(&self, point: &Point) -> QuadCellId {
        self.to_cell_id(point.x(), point.y())
    }

    /// Representative point of a cell: the centre of its bounds.
    pub fn from_cell_id(&self, id: &QuadCellId) -> Point {
        self.cell_bounds(id).center()
    }

    /// Rectangle covered by `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to a tree of a different depth.
    pub fn cell_bounds(&self, id: &QuadCellId) -> Bounds2D {
        assert_eq!(
            id.depth_levels(),
            self.depth_levels(),
            "Cell {} belongs to a tree of different depth",
            id
        );

        let (x, y) = id.xy();
        let size = id.size_in_finest_cells();
        let domain = self.domain();
        let (min_x, max_x) = (domain.min_x(), domain.max_x());
        let (min_y, max_y) = (domain.min_y(), domain.max_y());

        Bounds2D::new(
            self.grid_line(x, min_x, max_x),
            self.grid_line(y, min_y, max_y),
            self.grid_line(x + size, min_x, max_x),
            self.grid_line(y + size, min_y, max_y),
        )
    }

    /// Rectangle covered by `id` as a `geo::Rect`.
    pub fn cell_rect(&self, id: &QuadCellId) -> Rect {
        let bounds = self.cell_bounds(id);
        Rect::new(
            geo::coord! { x: bounds.min_x, y: bounds.min_y },
            geo::coord! { x: bounds.max_x, y: bounds.max_y },
        )
    }

    /// Smallest cell containing both `(min_x, min_y)` and `(max_x, max_y)`.
    ///
    /// Coincident points yield their finest-level cell.
    pub fn cover_two_points(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> QuadCellId {
        let low = self.to_cell_id(min_x, min_y);
        let high = self.to_cell_id(max_x, max_y);
        QuadCellId::common_ancestor(&low, &high)
    }
}
