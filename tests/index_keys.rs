//! Coverings used the way feature indexers and viewport queries use them:
//! as string prefixes and as pre-order key ranges.

use quadcell::prelude::*;
use quadcell::{cell_interval, sort_and_merge_intervals};
use std::sync::Arc;
use std::thread;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_feature_found_through_string_prefix() {
    init_logging();
    let coverer = RectangleCoverer::new(IndexConfig::geographic());
    let mapper = coverer.mapper();

    // A feature indexed under its own covering...
    let feature = Bounds2D::new(27.55, 53.89, 27.56, 53.91);
    let feature_keys: Vec<String> = coverer
        .cover_rect(&feature, 4, 18)
        .iter()
        .map(|c| c.to_string())
        .collect();

    // ...is reached by a prefix scan over a viewport covering that contains it.
    let viewport = Bounds2D::new(27.43, 53.83, 27.70, 53.96);
    let viewport_cells = coverer.cover_rect(&viewport, 8, 18);
    for key in &feature_keys {
        assert!(
            viewport_cells
                .iter()
                .any(|c| key.starts_with(&c.to_string()) || c.to_string().starts_with(key)),
            "feature key {} unreachable from {:?}",
            key,
            viewport_cells
        );
    }

    let centre = mapper.to_cell_id(27.555, 53.90).to_string();
    assert!(feature_keys.iter().any(|k| centre.starts_with(k)));
}

#[test]
fn test_feature_found_through_key_interval() {
    let coverer = RectangleCoverer::new(IndexConfig::geographic());
    let mapper = coverer.mapper();

    let viewport = Bounds2D::new(-74.05, 40.60, -73.70, 40.90);
    let intervals = covering_intervals(&coverer.cover_rect(&viewport, 16, 18));

    let sorted = sort_and_merge_intervals(intervals.clone());
    assert_eq!(sorted, intervals);
    for pair in intervals.windows(2) {
        assert!(pair[0].end < pair[1].start);
    }

    for (x, y) in [(-74.0060, 40.7128), (-73.9857, 40.7484), (-73.75, 40.89)] {
        let key = mapper.to_cell_id(x, y).preorder_key();
        assert!(
            intervals.iter().any(|i| i.contains(key)),
            "point ({}, {}) outside covering intervals",
            x,
            y
        );
    }

    let london = mapper.to_cell_id(-0.1278, 51.5074).preorder_key();
    assert!(!intervals.iter().any(|i| i.contains(london)));
}

#[test]
fn test_interval_round_trip_through_keys() {
    let config = IndexConfig::geographic();
    let cell = config.parse_cell("32012211300").unwrap();
    let interval = cell_interval(&cell);

    let back = QuadCellId::from_preorder_key(interval.start, config.depth_levels).unwrap();
    assert_eq!(back, cell);

    let last = QuadCellId::from_preorder_key(interval.end - 1, config.depth_levels).unwrap();
    assert!(cell.is_ancestor_of(&last));
    assert!(last.is_leaf());
}

#[test]
fn test_concurrent_coverings() {
    let coverer = Arc::new(RectangleCoverer::new(IndexConfig::geographic()));
    let rect = Bounds2D::new(27.43, 53.83, 27.70, 53.96);
    let expected = coverer.cover_rect(&rect, 4, 18);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let coverer = Arc::clone(&coverer);
            thread::spawn(move || coverer.cover_rect(&rect, 4, 18))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_domain_edges() {
    let coverer = RectangleCoverer::new(IndexConfig::geographic());

    // Whole world in four quadrants.
    let world = Bounds2D::new(-180.0, -90.0, 180.0, 90.0);
    let cells = coverer.cover_rect(&world, 4, 18);
    let keys: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
    assert_eq!(keys, ["0", "1", "2", "3"]);

    // A thin sliver along the antimeridian.
    let sliver = Bounds2D::new(179.99, -10.0, 190.0, 10.0);
    let cells = coverer.cover_rect(&sliver, 6, 18);
    assert!(!cells.is_empty() && cells.len() <= 6);
    let mapper = coverer.mapper();
    for cell in &cells {
        assert!(mapper.cell_bounds(cell).max_x <= 180.0);
    }

    // Zero-height rectangle yields nothing.
    assert!(coverer
        .cover_rect(&Bounds2D::new(0.0, 5.0, 10.0, 5.0), 4, 18)
        .is_empty());
}
