use millpath_core::{BoundingBox, Point3};
use millpath_motion::{
    FixedGrid, GridDirection, GridLayer, GridParams, MillingStyle, MotionConfig, Spacing,
    StartPosition,
};

fn block() -> BoundingBox {
    BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 10.0, 5.0))
}

fn collect(grid: &FixedGrid) -> Vec<GridLayer> {
    grid.layers()
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn travel(layer: &GridLayer, index: usize) -> f64 {
    let line = &layer.lines[index];
    line.last_point().unwrap().x - line.first_point().unwrap().x
}

#[test]
fn test_two_layer_zigzag_block() {
    let params = GridParams {
        layer_spacing: Some(Spacing::Increment(5.0)),
        line_spacing: Spacing::Increment(5.0),
        direction: GridDirection::X,
        style: MillingStyle::Ignore,
        start: StartPosition::top(),
        ..GridParams::default()
    };
    let grid = FixedGrid::new(block(), params).unwrap();
    let layers = collect(&grid);

    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].z, 5.0);
    assert_eq!(layers[1].z, 0.0);
    for layer in &layers {
        assert_eq!(layer.lines.len(), 3);
        let mut offsets: Vec<f64> = layer.lines.iter().map(|line| line.offset()).collect();
        offsets.sort_by(f64::total_cmp);
        assert_eq!(offsets, vec![0.0, 5.0, 10.0]);
        for index in 1..layer.lines.len() {
            assert!(travel(layer, index) * travel(layer, index - 1) < 0.0);
        }
        assert!(layer.lines.iter().all(|line| line.points().all(|p| p.z == layer.z)));
    }

    // the second layer picks up where the first one ended
    let end = layers[0].lines[2].last_point().unwrap();
    let start = layers[1].lines[0].first_point().unwrap();
    assert_eq!((end.x, end.y), (start.x, start.y));
}

#[test]
fn test_bottom_up_layers() {
    let params = GridParams {
        layer_spacing: Some(Spacing::Increment(5.0)),
        line_spacing: Spacing::Increment(5.0),
        start: StartPosition::new(false, false, false),
        ..GridParams::default()
    };
    let layers = collect(&FixedGrid::new(block(), params).unwrap());
    let heights: Vec<f64> = layers.iter().map(|layer| layer.z).collect();
    assert_eq!(heights, vec![0.0, 5.0]);
}

#[test]
fn test_directional_styles_keep_line_direction() {
    for style in [MillingStyle::Conventional, MillingStyle::Climb] {
        for direction in [GridDirection::X, GridDirection::Y] {
            let params = GridParams {
                layer_spacing: Some(Spacing::Increment(2.5)),
                line_spacing: Spacing::Increment(2.0),
                direction,
                style,
                ..GridParams::default()
            };
            let layers = collect(&FixedGrid::new(block(), params).unwrap());
            for layer in &layers {
                let directions: Vec<(f64, f64)> = layer
                    .lines
                    .iter()
                    .map(|line| {
                        let delta = line.last_point().unwrap() - line.first_point().unwrap();
                        (delta.x.signum(), delta.y.signum())
                    })
                    .collect();
                assert!(directions.windows(2).all(|pair| pair[0] == pair[1]));
            }
        }
    }
}

#[test]
fn test_climb_and_conventional_cut_opposite_ways() {
    let first_direction = |style: MillingStyle| {
        let params = GridParams {
            line_spacing: Spacing::Increment(5.0),
            style,
            ..GridParams::default()
        };
        let layers = collect(&FixedGrid::new(block(), params).unwrap());
        travel(&layers[0], 0).signum()
    };
    assert_eq!(
        first_direction(MillingStyle::Climb),
        -first_direction(MillingStyle::Conventional)
    );
}

#[test]
fn test_xy_grid_from_json() {
    let config = MotionConfig::from_json_str(
        r#"{
            "strategy": "grid",
            "layer_spacing": [3.0],
            "line_spacing": 5.0,
            "step": 2.5,
            "direction": "xy"
        }"#,
    )
    .unwrap();
    let MotionConfig::Grid(params) = config else {
        panic!("expected a grid configuration");
    };
    let layers = collect(&FixedGrid::new(block(), params).unwrap());
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].direction, GridDirection::X);
    assert_eq!(layers[1].direction, GridDirection::Y);
    assert!(layers.iter().all(|layer| layer.z == 3.0));
    assert!(layers
        .iter()
        .flat_map(|layer| layer.lines.iter())
        .all(|line| line.len() == 5));
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let params = GridParams {
        line_spacing: Spacing::Increment(-1.0),
        ..GridParams::default()
    };
    let err = FixedGrid::new(block(), params).unwrap_err();
    assert!(err.is_configuration());
}
