//! Boundary following over a stack of layers.
//!
//! The boundary polygons are sorted, optionally pocketed, and broken into
//! edges once. Every layer then slices those edges at its height. Layers
//! above the lowest one are produced without step points; the lowest layer
//! gets the configured step width.

use crate::config::LinesParams;
use crate::diagnostics::{default_sink, SharedSink};
use crate::path::{layer_heights, PathSegment};
use crate::pocket::backend;
use crate::slicer::LayerSlicer;
use crate::sorter::{sorted_polygons, NearestNeighbourSorter, PolygonOrdering};
use crate::types::{MillingStyle, PocketingType};
use millpath_core::{BoundingBox, Line, MotionResult, Polygon, Progress};
use tracing::{debug, info};

/// Status text reported before pocketing starts.
pub const POCKETING_STATUS: &str = "Generating pocketing polygons ...";

/// The segments of one sliced layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayer {
    pub z: f64,
    pub segments: Vec<PathSegment>,
}

/// Boundary following of a polygon set.
pub struct LinesGrid<'a> {
    polygons: Vec<Polygon>,
    bounds: BoundingBox,
    params: LinesParams,
    ordering: Box<dyn PolygonOrdering + 'a>,
    progress: Option<&'a dyn Progress>,
    sink: SharedSink,
}

impl std::fmt::Debug for LinesGrid<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinesGrid")
            .field("polygons", &self.polygons.len())
            .field("bounds", &self.bounds)
            .field("params", &self.params)
            .finish()
    }
}

impl<'a> LinesGrid<'a> {
    pub fn new(polygons: Vec<Polygon>, bounds: BoundingBox, params: LinesParams) -> MotionResult<Self> {
        params.validate()?;
        Ok(Self {
            polygons,
            bounds,
            params,
            ordering: Box::new(NearestNeighbourSorter),
            progress: None,
            sink: default_sink(),
        })
    }

    /// Replace the polygon ordering.
    pub fn with_ordering(mut self, ordering: impl PolygonOrdering + 'a) -> Self {
        self.ordering = Box::new(ordering);
        self
    }

    /// Report progress to `progress`; only pocketing can be cancelled.
    pub fn with_progress(mut self, progress: &'a dyn Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    /// Bounds with the low Z raised to the lowest polygon.
    pub fn effective_bounds(&self) -> BoundingBox {
        let lowest = self
            .polygons
            .iter()
            .map(Polygon::min_z)
            .fold(f64::INFINITY, f64::min);
        if lowest.is_finite() {
            self.bounds.with_min_low_z(lowest)
        } else {
            self.bounds
        }
    }

    /// Sorted and, if requested, pocketed polygons.
    pub fn prepared_polygons(&self) -> Vec<Polygon> {
        let polygons = sorted_polygons(self.polygons.clone(), self.ordering.as_ref(), self.progress);
        if self.params.pocketing == PocketingType::None {
            return polygons;
        }
        if let Some(progress) = self.progress {
            // the status report is informational
            let _ = progress.update(Some(POCKETING_STATUS));
        }
        let backend = backend(self.params.backend, self.params.max_depth, self.sink.clone());
        info!(
            "Pocketing {} polygons ({}, {} backend)",
            polygons.len(),
            self.params.pocketing,
            backend.name()
        );
        backend.fill(
            &polygons,
            self.params.line_distance,
            self.params.pocketing,
            self.progress,
        )
    }

    /// Edges of the prepared polygons in machining order.
    ///
    /// Closed polygons are traversed backwards for conventional milling.
    pub fn edges(&self) -> Vec<Line> {
        let reverse = self.params.style == MillingStyle::Conventional;
        let mut edges = Vec::new();
        for polygon in self.prepared_polygons() {
            if let Some(progress) = self.progress {
                let _ = progress.tick();
            }
            if polygon.is_closed() && reverse {
                edges.extend(polygon.reversed().lines());
            } else {
                edges.extend(polygon.lines());
            }
        }
        edges
    }

    /// Layers in machining order.
    pub fn layers(&self) -> MotionResult<LineLayers<'_>> {
        let bounds = self.effective_bounds();
        let heights = layer_heights(
            &bounds,
            self.params.layer_spacing.as_ref(),
            self.params.start.z_high,
        )?;
        let edges = self.edges();
        let descending = heights.windows(2).all(|pair| pair[1] < pair[0]);
        debug!(
            "Slicing {} edges at {} layers ({})",
            edges.len(),
            heights.len(),
            if descending { "descending" } else { "independent" }
        );
        Ok(LineLayers {
            grid: self,
            slicer: LayerSlicer::new(edges.clone(), self.sink.clone()),
            edges,
            heights,
            index: 0,
            descending,
        })
    }
}

/// Iterator over the layers of a [`LinesGrid`].
#[derive(Debug)]
pub struct LineLayers<'a> {
    grid: &'a LinesGrid<'a>,
    slicer: LayerSlicer,
    edges: Vec<Line>,
    heights: Vec<f64>,
    index: usize,
    descending: bool,
}

impl Iterator for LineLayers<'_> {
    type Item = MotionResult<LineLayer>;

    fn next(&mut self) -> Option<Self::Item> {
        let z = *self.heights.get(self.index)?;
        self.index += 1;
        if let Some(progress) = self.grid.progress {
            let _ = progress.tick();
        }
        if !self.descending {
            // layers that do not descend are sliced independently
            self.slicer = LayerSlicer::new(self.edges.clone(), self.grid.sink.clone());
        }
        let is_last = self.index == self.heights.len();
        let step = if is_last {
            self.grid.params.step.as_ref()
        } else {
            None
        };
        Some(
            self.slicer
                .slice(z, step)
                .map(|segments| LineLayer { z, segments }),
        )
    }
}
