//! Raster grids of parallel cutting lines.
//!
//! [`FixedGridGenerator`] builds the lines of a single layer for a single
//! direction, [`FixedGrid`] runs it over all layers and passes of a box,
//! carrying the tool position from one layer into the next.

use crate::config::GridParams;
use crate::path::{layer_heights, PositionIter, Positions};
use crate::types::{GridDirection, MillingStyle, Spacing, StartPosition};
use millpath_core::{BoundingBox, MotionResult, ParameterError, Point3};
use std::mem;
use tracing::debug;

/// One cutting line of a grid layer.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    direction: GridDirection,
    offset: f64,
    z: f64,
    positions: Positions,
}

impl GridLine {
    /// Axis the line runs along.
    pub fn direction(&self) -> GridDirection {
        self.direction
    }

    /// Coordinate of the line on the perpendicular axis.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn first_point(&self) -> Option<Point3> {
        self.points().next()
    }

    pub fn last_point(&self) -> Option<Point3> {
        self.points().last()
    }

    /// Points of the line in travel order.
    pub fn points(&self) -> GridLinePoints<'_> {
        GridLinePoints {
            line: self,
            positions: self.positions.iter(),
        }
    }

    fn point(&self, position: f64) -> Point3 {
        match self.direction {
            GridDirection::Y => Point3::new(self.offset, position, self.z),
            _ => Point3::new(position, self.offset, self.z),
        }
    }
}

/// Lazy iterator over the points of a [`GridLine`].
#[derive(Debug, Clone)]
pub struct GridLinePoints<'a> {
    line: &'a GridLine,
    positions: PositionIter<'a>,
}

impl Iterator for GridLinePoints<'_> {
    type Item = Point3;

    fn next(&mut self) -> Option<Point3> {
        self.positions.next().map(|position| self.line.point(position))
    }
}

/// The lines of one grid pass and the corner the tool ends up at.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayer {
    pub z: f64,
    pub direction: GridDirection,
    pub lines: Vec<GridLine>,
    pub end_position: StartPosition,
}

/// Builds the lines of a single grid pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedGridGenerator {
    line_spacing: Spacing,
    step: Option<Spacing>,
    style: MillingStyle,
}

impl FixedGridGenerator {
    pub fn new(line_spacing: Spacing, step: Option<Spacing>, style: MillingStyle) -> Self {
        Self {
            line_spacing,
            step,
            style,
        }
    }

    /// Lines reverse their direction after every line only when the
    /// milling style does not matter.
    pub fn is_zigzag(&self) -> bool {
        self.style == MillingStyle::Ignore
    }

    /// Lines of one pass along `direction` at height `z`.
    ///
    /// The requested start corner is moved to a neighbouring corner when it
    /// would make the lines cut against the milling style.
    pub fn layer(
        &self,
        bounds: &BoundingBox,
        z: f64,
        direction: GridDirection,
        start: StartPosition,
    ) -> MotionResult<GridLayer> {
        if direction == GridDirection::XY {
            return Err(ParameterError::Incompatible(
                "a grid layer runs along either X or Y, not both".to_string(),
            )
            .into());
        }
        let zigzag = self.is_zigzag();
        let start = compatible_start(self.style, direction, start, bounds);
        let secondary = direction.other();

        let (mut from, mut to, mut line_from, mut line_to) = match direction {
            GridDirection::Y => (bounds.low.y, bounds.high.y, bounds.low.x, bounds.high.x),
            _ => (bounds.low.x, bounds.high.x, bounds.low.y, bounds.high.y),
        };
        if is_high(start, direction) {
            mem::swap(&mut from, &mut to);
        }
        if is_high(start, secondary) {
            mem::swap(&mut line_from, &mut line_to);
        }

        let offsets = Positions::between(line_from, line_to, Some(&self.line_spacing))?;

        // the tool finishes on the far side of the secondary axis
        let mut end_position = start.toggle(secondary);
        if !zigzag {
            end_position = end_position.toggle(direction);
        }

        let mut lines = Vec::with_capacity(offsets.len());
        for offset in offsets.iter() {
            lines.push(GridLine {
                direction,
                offset,
                z,
                positions: Positions::between(from, to, self.step.as_ref())?,
            });
            if zigzag {
                mem::swap(&mut from, &mut to);
                end_position = end_position.toggle(direction);
            }
        }

        debug!(
            "Grid pass along {} at Z={:.3}: {} lines, start {}, end {}",
            direction,
            z,
            lines.len(),
            start,
            end_position
        );

        Ok(GridLayer {
            z,
            direction,
            lines,
            end_position,
        })
    }
}

/// Start corner whose lines cut in the direction required by `style`.
///
/// For climb milling along X (and conventional milling along Y) the X and Y
/// flags must differ, for the other two combinations they must be equal. An
/// incompatible corner is moved along the shorter side of the box, along X
/// when the box is not wider than tall.
pub fn compatible_start(
    style: MillingStyle,
    direction: GridDirection,
    start: StartPosition,
    bounds: &BoundingBox,
) -> StartPosition {
    let along_x = direction == GridDirection::X;
    let flags_must_differ = match style {
        MillingStyle::Ignore => return start,
        MillingStyle::Climb => along_x,
        MillingStyle::Conventional => !along_x,
    };
    let flags_differ = start.x_high != start.y_high;
    if flags_differ == flags_must_differ {
        start
    } else if bounds.width() <= bounds.height() {
        start.toggle_x()
    } else {
        start.toggle_y()
    }
}

fn is_high(start: StartPosition, axis: GridDirection) -> bool {
    start.is_high(axis).unwrap_or(false)
}

/// A grid over every layer of a box.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedGrid {
    bounds: BoundingBox,
    params: GridParams,
}

impl FixedGrid {
    pub fn new(bounds: BoundingBox, params: GridParams) -> MotionResult<Self> {
        params.validate()?;
        Ok(Self { bounds, params })
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn params(&self) -> &GridParams {
        &self.params
    }

    /// All passes, top to bottom or bottom to top depending on the start
    /// corner. An `XY` direction yields an X pass followed by a Y pass for
    /// every layer.
    pub fn layers(&self) -> MotionResult<GridLayers<'_>> {
        let heights = layer_heights(
            &self.bounds,
            self.params.layer_spacing.as_ref(),
            self.params.start.z_high,
        )?;
        let passes = heights
            .into_iter()
            .flat_map(|z| {
                self.params
                    .direction
                    .passes()
                    .iter()
                    .map(move |direction| (z, *direction))
            })
            .collect::<Vec<_>>()
            .into_iter();
        Ok(GridLayers {
            grid: self,
            generator: FixedGridGenerator::new(
                self.params.line_spacing.clone(),
                self.params.step.clone(),
                self.params.style,
            ),
            passes,
            start: self.params.start,
        })
    }
}

/// Iterator over the passes of a [`FixedGrid`].
#[derive(Debug)]
pub struct GridLayers<'a> {
    grid: &'a FixedGrid,
    generator: FixedGridGenerator,
    passes: std::vec::IntoIter<(f64, GridDirection)>,
    start: StartPosition,
}

impl Iterator for GridLayers<'_> {
    type Item = MotionResult<GridLayer>;

    fn next(&mut self) -> Option<Self::Item> {
        let (z, direction) = self.passes.next()?;
        let layer = self
            .generator
            .layer(&self.grid.bounds, z, direction, self.start);
        if let Ok(layer) = &layer {
            self.start = layer.end_position;
        }
        Some(layer)
    }
}
