//! Approximating rectangles with a bounded number of quadtree cells.
//!
//! [`RectangleCoverer::cover_rect`] walks the tree breadth-first from the
//! smallest cell holding the whole query, splitting cells while the budget
//! allows, and then tightens every result cell that only touches the query
//! through a single child.

use crate::cell_id::QuadCellId;
use crate::config::IndexConfig;
use crate::mapper::CoordinateMapper;
use crate::validation::validate_rect;
use geo::Rect;
use quadcell_types::bounds::Bounds2D;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Children of `id` that overlap `rect`, in quadrant order.
///
/// Touching counts as overlapping: a child is dropped only when it is
/// strictly apart from `rect` on some axis, so every finest-level cell that
/// meets `rect` stays reachable through a surviving child.
///
/// # Panics
///
/// Panics if `id` is already at the finest level.
pub fn split_rect_cell(
    mapper: &CoordinateMapper,
    id: &QuadCellId,
    rect: &Bounds2D,
) -> SmallVec<[QuadCellId; 4]> {
    id.children()
        .into_iter()
        .filter(|child| mapper.cell_bounds(child).intersects(rect))
        .collect()
}

/// Budgeted rectangle covering over one index configuration.
///
/// # Examples
///
/// ```rust
/// use quadcell::{Domain, IndexConfig, RectangleCoverer};
/// use quadcell::Bounds2D;
///
/// let config = IndexConfig::new(Domain::new(0.0, 0.0, 16.0, 16.0).unwrap(), 19);
/// let coverer = RectangleCoverer::new(config);
///
/// let cells = coverer.cover_rect(&Bounds2D::new(5.0, 5.0, 11.0, 11.0), 4, 18);
/// let keys: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
/// assert_eq!(keys, ["03", "12", "21", "30"]);
/// ```
#[derive(Debug, Clone)]
pub struct RectangleCoverer {
    mapper: CoordinateMapper,
}

impl RectangleCoverer {
    pub fn new(config: IndexConfig) -> Self {
        Self::from_mapper(CoordinateMapper::new(config))
    }

    pub fn from_mapper(mapper: CoordinateMapper) -> Self {
        Self { mapper }
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Cover `rect` with at most `budget` cells no deeper than `max_depth`.
    ///
    /// A query with NaN coordinates is logged and yields an empty covering.
    /// Otherwise it is clipped to the domain first; an empty or inverted
    /// remainder yields an empty covering. Cells are split breadth-first
    /// while the queued and finished cells together still fit the budget.
    /// The walk stops at the first cell that reaches `max_depth`, and
    /// whatever is still queued at that point is emitted unsplit. A queued
    /// cell deeper than `max_depth` is lifted to its ancestor at `max_depth`
    /// on the way out; this only happens to the starting cell, with a budget
    /// of one, so no returned cell is ever deeper than `max_depth`. Finally each
    /// cell that meets the query through exactly one child is replaced by
    /// that child, repeatedly, down to `max_depth`.
    ///
    /// The union of the returned cells' bounds covers the clipped query, and
    /// the output order is deterministic.
    ///
    /// # Panics
    ///
    /// Panics if `budget` is zero or `max_depth` is not below the configured
    /// depth levels.
    pub fn cover_rect(&self, rect: &Bounds2D, budget: usize, max_depth: u8) -> Vec<QuadCellId> {
        assert!(budget > 0, "Cell budget must be greater than zero");
        assert!(
            max_depth < self.mapper.depth_levels(),
            "Max depth {} must be below depth levels {}",
            max_depth,
            self.mapper.depth_levels()
        );

        if let Err(err) = validate_rect(rect) {
            log::warn!("Rejecting covering query: {}", err);
            return Vec::new();
        }

        let rect = rect.clip(&self.mapper.domain().bounds());
        if rect.is_empty() {
            return Vec::new();
        }

        let common = self
            .mapper
            .cover_two_points(rect.min_x, rect.min_y, rect.max_x, rect.max_y);

        let mut queue = VecDeque::from([common]);
        let mut result: Vec<QuadCellId> = Vec::with_capacity(budget);

        while queue.len() + result.len() < budget {
            let Some(mut id) = queue.pop_front() else {
                break;
            };

            while id.level() > max_depth {
                id = id.parent();
            }

            if id.level() == max_depth {
                result.push(id);
                break;
            }

            let children = split_rect_cell(&self.mapper, &id, &rect);
            debug_assert!(
                !children.is_empty(),
                "Cell {} overlaps {:?} but none of its children do",
                id,
                rect
            );
            if children.is_empty() {
                result.push(id);
                continue;
            }

            if queue.len() + result.len() + children.len() <= budget {
                queue.extend(children);
            } else {
                result.push(id);
            }
        }

        // Only the starting cell can sit below `max_depth` here, when the
        // budget left no room to pop it.
        result.extend(queue.into_iter().map(|mut id| {
            while id.level() > max_depth {
                id = id.parent();
            }
            id
        }));

        for id in &mut result {
            while id.level() < max_depth {
                let children = split_rect_cell(&self.mapper, id, &rect);
                if children.len() != 1 {
                    break;
                }
                *id = children[0];
            }
        }

        log::trace!(
            "Covered {:?} with {} cells starting from {}",
            rect,
            result.len(),
            common
        );
        result
    }

    /// [`RectangleCoverer::cover_rect`] with the configured default budget
    /// and depth.
    pub fn cover_rect_with_defaults(&self, rect: &Bounds2D) -> Vec<QuadCellId> {
        let config = self.mapper.config();
        self.cover_rect(rect, config.default_cell_budget, config.max_depth())
    }

    /// [`RectangleCoverer::cover_rect`] for a `geo::Rect`.
    pub fn cover_geo_rect(&self, rect: &Rect, budget: usize, max_depth: u8) -> Vec<QuadCellId> {
        self.cover_rect(&Bounds2D::from_rect(*rect), budget, max_depth)
    }
}
