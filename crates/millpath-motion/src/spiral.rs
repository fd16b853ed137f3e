//! Rectangular spirals.
//!
//! A spiral starts at a corner of the layer rectangle and runs along its
//! edges. After every edge the rectangle is shrunk by one ring distance on
//! the side the edge started from, so the path winds towards the centre
//! until the rectangle collapses. Outward spirals are the exact reverse of
//! the inward ones.

use crate::config::SpiralParams;
use crate::path::{layer_heights, PathSegment};
use crate::types::{GridDirection, MillingStyle, Spacing, SpiralDirection, StartPosition};
use millpath_core::geometry::arc::polar_angle;
use millpath_core::{arc_points, BoundingBox, MotionResult, Point3, Vector3, EPSILON};
use tracing::debug;

/// Rectangle that shrinks while the spiral is traced.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Rect {
    fn corner(&self, corner: StartPosition, z: f64) -> Point3 {
        Point3::new(
            if corner.x_high { self.max_x } else { self.min_x },
            if corner.y_high { self.max_y } else { self.min_y },
            z,
        )
    }

    fn is_collapsed(&self) -> bool {
        self.min_x - EPSILON > self.max_x || self.min_y - EPSILON > self.max_y
    }
}

/// Builds the spiral of a single layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralGenerator {
    line_distance: f64,
    step: Option<Spacing>,
    style: MillingStyle,
    direction: SpiralDirection,
    rounded_corners: bool,
}

impl SpiralGenerator {
    pub fn new(
        line_distance: f64,
        step: Option<Spacing>,
        style: MillingStyle,
        direction: SpiralDirection,
        rounded_corners: bool,
    ) -> Self {
        Self {
            line_distance,
            step,
            style,
            direction,
            rounded_corners,
        }
    }

    pub fn from_params(params: &SpiralParams) -> Self {
        Self::new(
            params.line_distance,
            params.step.clone(),
            params.style,
            params.direction,
            params.rounded_corners,
        )
    }

    /// Axis of the first edge.
    ///
    /// Climb milling from the low X side and conventional milling from the
    /// high X side start along X; everything else starts along Y.
    pub fn start_axis(&self, start: StartPosition) -> GridDirection {
        if (self.style == MillingStyle::Climb) == !start.x_high {
            GridDirection::X
        } else {
            GridDirection::Y
        }
    }

    /// Ring distance per axis, adjusted so both extents hold a whole number
    /// of rings.
    pub fn ring_distances(&self, bounds: &BoundingBox) -> (f64, f64) {
        (
            fit_distance(bounds.width(), self.line_distance),
            fit_distance(bounds.height(), self.line_distance),
        )
    }

    /// Straight edges of the spiral at height `z`, traced inwards.
    ///
    /// A ring distance that is not a positive number yields no edges.
    pub fn edges(&self, bounds: &BoundingBox, z: f64, start: StartPosition) -> Vec<(Point3, Point3)> {
        if !(self.line_distance.is_finite() && self.line_distance > 0.0) {
            return Vec::new();
        }
        let (distance_x, distance_y) = self.ring_distances(bounds);
        let mut rect = Rect {
            min_x: bounds.low.x,
            max_x: bounds.high.x,
            min_y: bounds.low.y,
            max_y: bounds.high.y,
        };
        let mut axis = self.start_axis(start);
        let mut corner = start;
        let mut current = rect.corner(corner, z);
        let mut edges = Vec::new();

        loop {
            let end_corner = corner.toggle(axis);
            let end = rect.corner(end_corner, z);
            edges.push((current, end));
            // shrink the other axis on the side the edge started from
            match axis {
                GridDirection::X => {
                    if corner.y_high {
                        rect.max_y -= distance_y;
                    } else {
                        rect.min_y += distance_y;
                    }
                }
                _ => {
                    if corner.x_high {
                        rect.max_x -= distance_x;
                    } else {
                        rect.min_x += distance_x;
                    }
                }
            }
            if rect.is_collapsed() {
                break;
            }
            corner = end_corner;
            current = end;
            axis = axis.other();
        }
        edges
    }

    /// The spiral of one layer as a list of path segments.
    pub fn layer(
        &self,
        bounds: &BoundingBox,
        z: f64,
        start: StartPosition,
    ) -> MotionResult<Vec<PathSegment>> {
        let mut edges = self.edges(bounds, z, start);
        if self.rounded_corners {
            let (distance_x, distance_y) = self.ring_distances(bounds);
            edges = round_corners(&edges, 0.5 * distance_x.min(distance_y), z);
        }

        let mut segments = edges
            .into_iter()
            .map(|(from, to)| PathSegment::along(from, to, self.step.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        if self.direction == SpiralDirection::Out {
            segments.reverse();
            for segment in &mut segments {
                segment.reverse();
            }
        }

        debug!(
            "Spiral at Z={:.3}: {} segments, {} from {}",
            z,
            segments.len(),
            self.direction,
            start
        );
        Ok(segments)
    }
}

fn fit_distance(extent: f64, requested: f64) -> f64 {
    if extent < EPSILON {
        return requested;
    }
    extent / (extent / requested).ceil()
}

/// Replace every joint between consecutive edges by an arc of `radius`.
///
/// Both edges are trimmed by the radius at the joint. The arc runs from the
/// end of the trimmed previous edge to the start of the trimmed next edge,
/// counter-clockwise for left turns and clockwise for right turns.
fn round_corners(edges: &[(Point3, Point3)], radius: f64, z: f64) -> Vec<(Point3, Point3)> {
    let mut rounded = Vec::with_capacity(edges.len() * 4);
    let mut previous: Option<Point3> = None;
    let last = edges.len().saturating_sub(1);

    for (index, &(mut from, mut to)) in edges.iter().enumerate() {
        let edge = to - from;
        let trim = if edge.norm() > EPSILON {
            edge.normalize() * radius
        } else {
            Vector3::zeros()
        };

        if let Some(joint_end) = previous {
            from += trim;
            let center = joint_end + trim;
            let up = (joint_end - center).cross(&(from - center));
            let angle_previous = polar_angle(&center, &joint_end);
            let angle_next = polar_angle(&center, &from);
            let arc = if up.z >= 0.0 {
                arc_points(&center, radius, angle_previous, angle_next)
            } else {
                let mut arc = arc_points(&center, radius, angle_next, angle_previous);
                arc.reverse();
                arc
            };
            rounded.extend(arc.windows(2).map(|pair| {
                (
                    Point3::new(pair[0].x, pair[0].y, z),
                    Point3::new(pair[1].x, pair[1].y, z),
                )
            }));
        }

        if index != last {
            to -= trim;
        }
        previous = Some(to);
        rounded.push((from, to));
    }
    rounded
}

/// A spiral on every layer of a box.
#[derive(Debug, Clone, PartialEq)]
pub struct Spiral {
    bounds: BoundingBox,
    params: SpiralParams,
}

/// The spiral of one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralLayer {
    pub z: f64,
    pub segments: Vec<PathSegment>,
}

impl Spiral {
    pub fn new(bounds: BoundingBox, params: SpiralParams) -> MotionResult<Self> {
        params.validate()?;
        Ok(Self { bounds, params })
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Layers in machining order; every layer starts from the same corner.
    pub fn layers(&self) -> MotionResult<SpiralLayers<'_>> {
        let heights = layer_heights(
            &self.bounds,
            self.params.layer_spacing.as_ref(),
            self.params.start.z_high,
        )?;
        Ok(SpiralLayers {
            spiral: self,
            generator: SpiralGenerator::from_params(&self.params),
            heights: heights.into_iter(),
        })
    }
}

/// Iterator over the layers of a [`Spiral`].
#[derive(Debug)]
pub struct SpiralLayers<'a> {
    spiral: &'a Spiral,
    generator: SpiralGenerator,
    heights: std::vec::IntoIter<f64>,
}

impl Iterator for SpiralLayers<'_> {
    type Item = MotionResult<SpiralLayer>;

    fn next(&mut self) -> Option<Self::Item> {
        let z = self.heights.next()?;
        Some(
            self.generator
                .layer(&self.spiral.bounds, z, self.spiral.params.start)
                .map(|segments| SpiralLayer { z, segments }),
        )
    }
}
