//! Output building blocks: positions along an axis and path segments.

use crate::stepper::{Stepper, Steps};
use crate::types::Spacing;
use millpath_core::{BoundingBox, Line, ParameterResult, Point3};
use serde::{Deserialize, Serialize};
use std::array;
use std::slice;

/// Positions between two bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum Positions {
    /// Just the two bounds.
    Endpoints(f64, f64),
    /// Evenly spaced positions.
    Stepped(Stepper),
    /// Explicit positions, ordered from the first bound towards the second.
    Explicit(Vec<f64>),
}

impl Positions {
    /// Positions from `start` to `end` following `spacing`.
    ///
    /// `None` yields only the two bounds. Explicit positions are kept as
    /// given but sorted in the direction of travel.
    pub fn between(start: f64, end: f64, spacing: Option<&Spacing>) -> ParameterResult<Self> {
        Ok(match spacing {
            None => Self::Endpoints(start, end),
            Some(Spacing::Increment(increment)) => {
                Self::Stepped(Stepper::by_increment(start, end, *increment)?)
            }
            Some(Spacing::Positions(positions)) => {
                let mut positions = positions.clone();
                if start <= end {
                    positions.sort_by(f64::total_cmp);
                } else {
                    positions.sort_by(|a, b| b.total_cmp(a));
                }
                Self::Explicit(positions)
            }
        })
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Endpoints(..) => 2,
            Self::Stepped(stepper) => stepper.len(),
            Self::Explicit(positions) => positions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> PositionIter<'_> {
        match self {
            Self::Endpoints(start, end) => PositionIter::Endpoints([*start, *end].into_iter()),
            Self::Stepped(stepper) => PositionIter::Stepped(stepper.iter()),
            Self::Explicit(positions) => PositionIter::Explicit(positions.iter()),
        }
    }
}

/// Iterator over [`Positions`].
#[derive(Debug, Clone)]
pub enum PositionIter<'a> {
    Endpoints(array::IntoIter<f64, 2>),
    Stepped(Steps),
    Explicit(slice::Iter<'a, f64>),
}

impl Iterator for PositionIter<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match self {
            Self::Endpoints(iter) => iter.next(),
            Self::Stepped(iter) => iter.next(),
            Self::Explicit(iter) => iter.next().copied(),
        }
    }
}

/// A straight or arc-derived piece of a tool path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    points: Vec<Point3>,
}

impl PathSegment {
    pub fn from_points(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Points from `start` towards `end`, placed at the distances given by
    /// `spacing` measured from `start`. Without spacing only the two end
    /// points are produced.
    pub fn along(start: Point3, end: Point3, spacing: Option<&Spacing>) -> ParameterResult<Self> {
        let Some(spacing) = spacing else {
            return Ok(Self::from_points(vec![start, end]));
        };
        let line = Line::new(start, end);
        let direction = line.dir();
        let distances = Positions::between(0.0, line.len(), Some(spacing))?;
        let points = distances
            .iter()
            .map(|distance| start + direction * distance)
            .collect();
        Ok(Self::from_points(points))
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }

    pub fn first(&self) -> Option<&Point3> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point3> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Reverse the point order in place.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }
}

/// Heights of the layers of a run.
///
/// Without spacing there is a single layer at the low bound. Explicit heights
/// are used as given. Otherwise the heights run from low to high, or from high
/// to low when `from_top` is set.
pub fn layer_heights(
    bounds: &BoundingBox,
    spacing: Option<&Spacing>,
    from_top: bool,
) -> ParameterResult<Vec<f64>> {
    Ok(match spacing {
        None => vec![bounds.low.z],
        Some(Spacing::Positions(heights)) => heights.clone(),
        Some(Spacing::Increment(increment)) => {
            Stepper::new(bounds.low.z, bounds.high.z, Some(*increment), None, from_top)?
                .iter()
                .collect()
        }
    })
}
