//! Slicing of boundary edges at successive heights.
//!
//! Layers are processed from the top down. Geometry below the current layer
//! is lifted onto the layer, geometry above it is followed at its own height.
//! The slicer keeps the edges that still matter for lower layers in a queue,
//! so each layer only looks at what is left of the previous one.

use crate::diagnostics::{Diagnostic, DiagnosticKind, SharedSink};
use crate::path::PathSegment;
use crate::types::Spacing;
use millpath_core::{project_z, Line, MotionResult, Plane};
use std::mem;
use tracing::debug;

/// Slices a set of edges at descending heights.
pub struct LayerSlicer {
    queue: Vec<Line>,
    last_z: Option<f64>,
    sink: SharedSink,
}

impl std::fmt::Debug for LayerSlicer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerSlicer")
            .field("queue", &self.queue.len())
            .field("last_z", &self.last_z)
            .finish()
    }
}

impl LayerSlicer {
    pub fn new(lines: Vec<Line>, sink: SharedSink) -> Self {
        Self {
            queue: lines,
            last_z: None,
            sink,
        }
    }

    /// Height of the previously sliced layer.
    pub fn last_z(&self) -> Option<f64> {
        self.last_z
    }

    /// Edges still relevant for lower layers.
    pub fn queued(&self) -> &[Line] {
        &self.queue
    }

    /// Path segments of the layer at `z`.
    ///
    /// Edges are handled in order:
    /// - edges entirely above the previous layer were finished there and are
    ///   skipped;
    /// - the part of an edge above the previous layer is cut off;
    /// - an edge crossing `z` is split, its upper part is followed at its own
    ///   height and its lower part is lifted onto `z` and kept for the next
    ///   layer;
    /// - an edge at or below `z` is lifted onto `z` and kept;
    /// - an edge at or above `z` is followed as is and then dropped.
    ///
    /// Edges matching none of these cases are reported and dropped.
    pub fn slice(&mut self, z: f64, step: Option<&Spacing>) -> MotionResult<Vec<PathSegment>> {
        let mut pieces: Vec<Line> = Vec::new();
        let mut remaining = Vec::with_capacity(self.queue.len());

        for line in mem::take(&mut self.queue) {
            let mut line = line;
            if !is_finite(&line) {
                self.report(&line, z);
                continue;
            }
            if let Some(last_z) = self.last_z {
                if last_z < line.min_z() {
                    continue;
                }
                if line.min_z() < last_z && last_z < line.max_z() {
                    match clip_below(&line, last_z) {
                        Some(clipped) => line = clipped,
                        None => {
                            self.report(&line, z);
                            continue;
                        }
                    }
                }
            }

            if line.min_z() < z && z < line.max_z() {
                let Some(cut) = line.point_at_z(z) else {
                    self.report(&line, z);
                    continue;
                };
                if line.p1().z < z {
                    let lower = Line::new(line.p1(), cut);
                    pieces.push(project(&lower, z));
                    pieces.push(Line::new(cut, line.p2()));
                    remaining.push(lower);
                } else {
                    let lower = Line::new(cut, line.p2());
                    pieces.push(Line::new(line.p1(), cut));
                    pieces.push(project(&lower, z));
                    remaining.push(lower);
                }
            } else if line.max_z() <= z {
                pieces.push(project(&line, z));
                remaining.push(line);
            } else if line.min_z() >= z {
                pieces.push(line);
            } else {
                self.report(&line, z);
            }
        }

        debug!(
            "Sliced layer at Z={:.3}: {} segments, {} edges kept",
            z,
            pieces.len(),
            remaining.len()
        );
        self.queue = remaining;
        self.last_z = Some(z);

        let segments = pieces
            .into_iter()
            .map(|piece| PathSegment::along(piece.p1(), piece.p2(), step))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(segments)
    }

    fn report(&self, line: &Line, z: f64) {
        self.sink.report(Diagnostic::new(
            DiagnosticKind::InconsistentSegment,
            format!(
                "segment {:?} -> {:?} does not fit layer Z={} (previous layer {:?})",
                line.p1(),
                line.p2(),
                z,
                self.last_z
            ),
        ));
    }
}

/// Part of `line` at or below `z`.
fn clip_below(line: &Line, z: f64) -> Option<Line> {
    let cut = Plane::horizontal(z).intersect_line(line)?;
    if line.p1().z > z {
        Some(Line::new(cut, line.p2()))
    } else {
        Some(Line::new(line.p1(), cut))
    }
}

fn is_finite(line: &Line) -> bool {
    line.p1().iter().chain(line.p2().iter()).all(|c| c.is_finite())
}

fn project(line: &Line, z: f64) -> Line {
    Line::new(project_z(&line.p1(), z), project_z(&line.p2(), z))
}
