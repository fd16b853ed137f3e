use millpath_core::{BoundingBox, Point3, EPSILON};
use millpath_motion::{
    MillingStyle, Spacing, Spiral, SpiralDirection, SpiralGenerator, SpiralLayer, SpiralParams,
    StartPosition,
};

fn square() -> BoundingBox {
    BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 10.0, 0.0))
}

fn points(layer: &[millpath_motion::PathSegment]) -> Vec<Point3> {
    layer.iter().flat_map(|segment| segment.points().to_vec()).collect()
}

#[test]
fn test_square_spiral_winds_to_centre() {
    let generator = SpiralGenerator::new(5.0, None, MillingStyle::Ignore, SpiralDirection::In, false);
    let segments = generator.layer(&square(), 0.0, StartPosition::top()).unwrap();

    // the outer ring takes three edges, the collapsed inner ring two more
    assert_eq!(segments.len(), 5);
    assert_eq!(segments[0].first(), Some(&Point3::new(0.0, 0.0, 0.0)));
    assert_eq!(segments[4].last(), Some(&Point3::new(5.0, 5.0, 0.0)));
    for pair in segments.windows(2) {
        assert_eq!(pair[0].last(), pair[1].first());
    }
    // every edge is axis aligned and no longer than the previous one
    let lengths: Vec<f64> = segments
        .iter()
        .map(|segment| (segment.last().unwrap() - segment.first().unwrap()).norm())
        .collect();
    assert!(lengths.windows(2).all(|pair| pair[1] <= pair[0] + EPSILON));
}

#[test]
fn test_spiral_terminates_on_thin_rectangles() {
    let thin = BoundingBox::new(Point3::origin(), Point3::new(100.0, 0.5, 0.0));
    let generator = SpiralGenerator::new(0.3, None, MillingStyle::Climb, SpiralDirection::In, true);
    let segments = generator.layer(&thin, 0.0, StartPosition::top()).unwrap();
    assert!(!segments.is_empty());
    assert!(segments.len() < 100);
}

#[test]
fn test_outward_spiral_is_exact_reverse() {
    for rounded_corners in [false, true] {
        for style in [MillingStyle::Ignore, MillingStyle::Climb, MillingStyle::Conventional] {
            let bounds = BoundingBox::new(Point3::new(-3.0, 1.0, 2.0), Point3::new(17.0, 12.0, 2.0));
            let build = |direction| {
                SpiralGenerator::new(1.7, Some(Spacing::Increment(0.9)), style, direction, rounded_corners)
                    .layer(&bounds, 2.0, StartPosition::new(true, false, true))
                    .unwrap()
            };
            let inward = points(&build(SpiralDirection::In));
            let mut outward = points(&build(SpiralDirection::Out));
            outward.reverse();
            assert_eq!(inward, outward);
        }
    }
}

#[test]
fn test_rounded_corners_keep_the_path_inside() {
    let generator = SpiralGenerator::new(2.0, None, MillingStyle::Ignore, SpiralDirection::In, true);
    let segments = generator.layer(&square(), 0.0, StartPosition::top()).unwrap();
    for point in points(&segments) {
        assert!(point.x >= -EPSILON && point.x <= 10.0 + EPSILON);
        assert!(point.y >= -EPSILON && point.y <= 10.0 + EPSILON);
    }
}

#[test]
fn test_spiral_over_layers() {
    let bounds = BoundingBox::new(Point3::new(0.0, 0.0, -6.0), Point3::new(10.0, 10.0, 0.0));
    let params = SpiralParams {
        layer_spacing: Some(Spacing::Increment(3.0)),
        line_distance: 2.5,
        direction: SpiralDirection::Out,
        ..SpiralParams::default()
    };
    let spiral = Spiral::new(bounds, params).unwrap();
    let layers: Vec<SpiralLayer> = spiral.layers().unwrap().collect::<Result<_, _>>().unwrap();
    let heights: Vec<f64> = layers.iter().map(|layer| layer.z).collect();
    assert_eq!(heights, vec![0.0, -3.0, -6.0]);
    for layer in &layers {
        // outward spirals end on the outer corner they would start from inwards
        assert_eq!(layer.segments.last().unwrap().last(), Some(&Point3::new(0.0, 0.0, layer.z)));
    }
}

#[test]
fn test_zero_line_distance_is_rejected() {
    let params = SpiralParams {
        line_distance: 0.0,
        ..SpiralParams::default()
    };
    assert!(Spiral::new(square(), params).is_err());
}
