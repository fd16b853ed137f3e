use millpath_core::{CancelAfter, Polygon};
use millpath_motion::{
    backend, CollectingSink, DiagnosticKind, PocketingBackend, PocketingBackendKind,
    PocketingType, ShapePocketing, SharedSink, SimplePocketing,
};
use std::sync::Arc;

fn square(min: f64, max: f64) -> Polygon {
    Polygon::from_xy(&[(min, min), (max, min), (max, max), (min, max)], 0.0).unwrap()
}

fn width(polygon: &Polygon) -> f64 {
    let xs = polygon.points().iter().map(|p| p.x);
    xs.clone().fold(f64::NEG_INFINITY, f64::max) - xs.fold(f64::INFINITY, f64::min)
}

#[test]
fn test_square_pocket_has_one_ring_per_offset() {
    let sink: SharedSink = Arc::new(CollectingSink::new());
    let backend = SimplePocketing::new(1000, sink);
    let result = backend.fill(&[square(0.0, 10.0)], 1.5, PocketingType::Holes, None);

    // half width 5 allows three rings at 1.5 spacing
    assert_eq!(result.len(), 4);
    let widths: Vec<f64> = result.iter().map(width).collect();
    for (width, expected) in widths.iter().zip([10.0, 7.0, 4.0, 1.0]) {
        assert!((width - expected).abs() < 1e-6, "{width} != {expected}");
    }
    assert!(result.iter().all(|ring| ring.is_closed() && ring.min_z() == 0.0));
}

#[test]
fn test_ring_collapsing_to_a_point_is_dropped() {
    let sink: SharedSink = Arc::new(CollectingSink::new());
    let backend = SimplePocketing::new(1000, sink);
    let result = backend.fill(&[square(0.0, 10.0)], 1.0, PocketingType::Holes, None);

    // the fifth ring would be the centre point, so four rings follow the outline
    assert_eq!(result.len(), 5);
    let areas: Vec<f64> = result.iter().map(Polygon::area).collect();
    for (area, expected) in areas.iter().zip([100.0, 64.0, 36.0, 16.0, 4.0]) {
        assert!((area - expected).abs() < 1e-6, "{area} != {expected}");
    }
    for pair in result.windows(2) {
        assert!(pair[1].area() < pair[0].area());
        assert!(pair[0].contains(&pair[1]));
    }
}

#[test]
fn test_depth_limit_is_never_exceeded() {
    for max_depth in 1..5 {
        let sink: SharedSink = Arc::new(CollectingSink::new());
        let simple = SimplePocketing::new(max_depth, sink.clone());
        let shape = ShapePocketing::new(max_depth, sink);
        for backend in [&simple as &dyn PocketingBackend, &shape] {
            let result = backend.fill(&[square(0.0, 100.0)], 1.0, PocketingType::Holes, None);
            assert!(result.len() <= max_depth + 1, "{} backend", backend.name());
        }
    }
}

#[test]
fn test_unsupported_type_leaves_polygons_alone() {
    for kind in [PocketingBackendKind::Simple, PocketingBackendKind::Shape] {
        let sink = Arc::new(CollectingSink::new());
        let input = vec![square(0.0, 10.0), square(2.0, 3.0).reversed()];
        let result = backend(kind, 1000, sink.clone()).fill(&input, 1.0, PocketingType::None, None);
        assert_eq!(result, input);
        assert_eq!(sink.count(DiagnosticKind::UnsupportedPocketingType), 1);
    }
}

#[test]
fn test_cancelled_pocketing_returns_input() {
    for kind in [PocketingBackendKind::Simple, PocketingBackendKind::Shape] {
        let sink: SharedSink = Arc::new(CollectingSink::new());
        let input = vec![square(0.0, 50.0)];
        let cancel = CancelAfter::new(3);
        let result = backend(kind, 1000, sink).fill(&input, 1.0, PocketingType::Holes, Some(&cancel));
        assert_eq!(result, input);
        assert_eq!(cancel.polls(), 4);
    }
}

#[test]
fn test_shape_backend_pockets_around_islands() {
    let sink: SharedSink = Arc::new(CollectingSink::new());
    let outline = square(0.0, 20.0);
    let island = square(8.0, 12.0).reversed();
    let input = vec![outline.clone(), island.clone()];

    // the simple backend refuses seeds surrounding other polygons
    let simple = SimplePocketing::new(1000, sink.clone()).fill(&input, 1.0, PocketingType::Holes, None);
    assert!(simple.is_empty());

    let shape = ShapePocketing::new(1000, sink).fill(&input, 1.0, PocketingType::Holes, None);
    assert_eq!(shape[0], outline);
    assert_eq!(shape[1], island);
    assert!(shape.len() > 3);
    // no ring reaches into the island
    for ring in &shape[2..] {
        assert!(!island.contains(ring));
    }
}
