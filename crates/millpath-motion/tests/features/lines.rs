use millpath_core::{BoundingBox, Point3, Polygon};
use millpath_motion::{
    CollectingSink, DiagnosticKind, LineLayer, LinesGrid, LinesParams, MillingStyle,
    PocketingType, Spacing, StartPosition,
};
use std::cell::Cell;
use std::sync::Arc;

fn square(min: f64, max: f64, z: f64) -> Polygon {
    Polygon::from_xy(&[(min, min), (max, min), (max, max), (min, max)], z).unwrap()
}

/// A square pyramid frustum outline running from Z=0 up to Z=6.
fn ramp() -> Polygon {
    Polygon::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(12.0, 0.0, 6.0),
            Point3::new(12.0, 12.0, 6.0),
            Point3::new(0.0, 12.0, 0.0),
        ],
        true,
    )
    .unwrap()
}

fn collect(grid: &LinesGrid<'_>) -> Vec<LineLayer> {
    grid.layers()
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn bounds() -> BoundingBox {
    BoundingBox::new(Point3::new(-1.0, -1.0, -4.0), Point3::new(13.0, 13.0, 6.0))
}

#[test]
fn test_sloped_outline_is_sliced_top_down() {
    let sink = Arc::new(CollectingSink::new());
    let params = LinesParams {
        layer_spacing: Some(Spacing::Increment(3.0)),
        style: MillingStyle::Climb,
        start: StartPosition::top(),
        ..LinesParams::default()
    };
    let grid = LinesGrid::new(vec![ramp()], bounds(), params)
        .unwrap()
        .with_sink(sink.clone());
    let layers = collect(&grid);

    let heights: Vec<f64> = layers.iter().map(|layer| layer.z).collect();
    assert_eq!(heights, vec![6.0, 3.0, 0.0]);

    // no point ever lies below the layer it belongs to
    for layer in &layers {
        for segment in &layer.segments {
            assert!(segment.points().iter().all(|p| p.z >= layer.z - 1e-9));
        }
    }

    // the middle layer splits both sloped edges
    let middle = &layers[1];
    let on_plane = middle
        .segments
        .iter()
        .flat_map(|segment| segment.points().iter())
        .filter(|p| (p.z - 3.0).abs() < 1e-9 && (p.x - 6.0).abs() < 1e-9)
        .count();
    assert!(on_plane >= 2);
    assert!(sink.diagnostics().is_empty());
}

#[test]
fn test_progress_is_polled_per_polygon_and_layer() {
    let polls = Cell::new(0);
    let progress = |_: Option<&str>| {
        polls.set(polls.get() + 1);
        false
    };
    let params = LinesParams {
        layer_spacing: Some(Spacing::Positions(vec![2.0, 1.0, 0.0])),
        ..LinesParams::default()
    };
    let polygons = vec![square(0.0, 4.0, 0.0), square(6.0, 9.0, 0.0)];
    let grid = LinesGrid::new(polygons, bounds(), params)
        .unwrap()
        .with_progress(&progress);
    let layers = collect(&grid);
    assert_eq!(layers.len(), 3);
    // sorting, edge extraction and slicing each poll once per item
    assert_eq!(polls.get(), 2 + 2 + 3);
}

#[test]
fn test_pocketed_layers() {
    let params = LinesParams {
        line_distance: 1.5,
        pocketing: PocketingType::Holes,
        style: MillingStyle::Climb,
        ..LinesParams::default()
    };
    let grid = LinesGrid::new(vec![square(0.0, 10.0, 0.0)], bounds(), params).unwrap();
    let layers = collect(&grid);
    assert_eq!(layers.len(), 1);
    // outline and three rings of four edges each
    assert_eq!(layers[0].segments.len(), 16);
}

#[test]
fn test_material_pocketing_of_inner_outline() {
    let sink = Arc::new(CollectingSink::new());
    let params = LinesParams {
        line_distance: 1.0,
        pocketing: PocketingType::Material,
        ..LinesParams::default()
    };
    let hole = square(0.0, 3.0, 0.0).reversed();
    let grid = LinesGrid::new(vec![hole], bounds(), params)
        .unwrap()
        .with_sink(sink.clone());
    let prepared = grid.prepared_polygons();
    assert_eq!(prepared.len(), 2);
    assert_eq!(sink.count(DiagnosticKind::UnsupportedPocketingType), 0);
}
