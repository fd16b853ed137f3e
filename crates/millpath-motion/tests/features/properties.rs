use millpath_core::{BoundingBox, Point3};
use millpath_motion::{
    FixedGridGenerator, GridDirection, MillingStyle, PathSegment, Spacing, SpiralDirection,
    SpiralGenerator, StartPosition, Stepper,
};
use proptest::prelude::*;

fn any_style() -> impl Strategy<Value = MillingStyle> {
    prop_oneof![
        Just(MillingStyle::Ignore),
        Just(MillingStyle::Conventional),
        Just(MillingStyle::Climb),
    ]
}

fn any_start() -> impl Strategy<Value = StartPosition> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(x, y, z)| StartPosition::new(x, y, z))
}

fn points(segments: &[PathSegment]) -> Vec<Point3> {
    segments.iter().flat_map(|segment| segment.points().to_vec()).collect()
}

proptest! {
    #[test]
    fn stepper_spans_bounds_evenly(
        start in -100.0f64..100.0,
        span in 0.5f64..50.0,
        increment in 0.1f64..10.0,
        backwards in any::<bool>(),
    ) {
        let end = if backwards { start - span } else { start + span };
        let stepper = Stepper::by_increment(start, end, increment).unwrap();
        let values: Vec<f64> = stepper.iter().collect();

        prop_assert_eq!(values.len(), ((end - start).abs() / increment).ceil() as usize + 1);
        prop_assert_eq!(values[0], start);
        prop_assert_eq!(*values.last().unwrap(), end);
        prop_assert!(stepper.increment().abs() <= increment + 1e-9);
        for pair in values.windows(2) {
            prop_assert!((pair[1] - pair[0] - stepper.increment()).abs() < 1e-9);
        }
    }

    #[test]
    fn stepper_single_value_for_coinciding_bounds(
        start in -100.0f64..100.0,
        increment in 0.1f64..10.0,
    ) {
        let stepper = Stepper::by_increment(start, start, increment).unwrap();
        prop_assert_eq!(stepper.iter().collect::<Vec<_>>(), vec![start]);
    }

    #[test]
    fn zigzag_lines_alternate(
        width in 1.0f64..40.0,
        height in 1.0f64..40.0,
        spacing in 0.5f64..5.0,
        along_y in any::<bool>(),
        start in any_start(),
    ) {
        let bounds = BoundingBox::new(Point3::origin(), Point3::new(width, height, 0.0));
        let direction = if along_y { GridDirection::Y } else { GridDirection::X };
        let generator = FixedGridGenerator::new(Spacing::Increment(spacing), None, MillingStyle::Ignore);
        let layer = generator.layer(&bounds, 0.0, direction, start).unwrap();

        let travel = |index: usize| {
            let line = &layer.lines[index];
            let delta = line.last_point().unwrap() - line.first_point().unwrap();
            if along_y { delta.y } else { delta.x }
        };
        prop_assert!(layer.lines.len() >= 2);
        for index in 1..layer.lines.len() {
            prop_assert!(travel(index) * travel(index - 1) < 0.0);
        }
    }

    #[test]
    fn outward_spiral_reverses_inward_spiral(
        width in 0.5f64..30.0,
        height in 0.5f64..30.0,
        distance in 0.2f64..4.0,
        style in any_style(),
        rounded_corners in any::<bool>(),
        start in any_start(),
    ) {
        let bounds = BoundingBox::new(Point3::origin(), Point3::new(width, height, 0.0));
        let build = |direction| {
            SpiralGenerator::new(distance, None, style, direction, rounded_corners)
                .layer(&bounds, 0.0, start)
                .unwrap()
        };
        let inward = build(SpiralDirection::In);
        let mut outward = points(&build(SpiralDirection::Out));
        outward.reverse();

        // every ring costs at least one distance on either axis
        let rings = (width / distance).ceil() + (height / distance).ceil();
        prop_assert!(!inward.is_empty());
        prop_assert!(inward.len() as f64 <= 100.0 * (rings + 1.0));
        prop_assert_eq!(points(&inward), outward);
    }
}
