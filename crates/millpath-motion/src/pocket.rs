//! Pocketing: filling closed boundaries with nested offset rings.
//!
//! Two backends share the [`PocketingBackend`] interface. [`SimplePocketing`]
//! offsets every seed polygon on its own, ring after ring. [`ShapePocketing`]
//! offsets all boundaries of a height together, so islands inside an outline
//! are kept clear.

use crate::diagnostics::{Diagnostic, DiagnosticKind, SharedSink};
use crate::types::{PocketingBackendKind, PocketingType};
use cavalier_contours::polyline::Polyline;
use cavalier_contours::shape_algorithms::{Shape, ShapeOffsetOptions};
use millpath_core::{poll, Polygon, Progress, EPSILON};
use std::panic;
use tracing::{debug, info, warn};

/// Computes pocketing rings for a set of boundary polygons.
pub trait PocketingBackend {
    fn name(&self) -> &'static str;

    /// Boundary polygons extended by their pocketing rings.
    ///
    /// `offset` is the distance between rings. When `progress` requests
    /// cancellation the input is returned unchanged.
    fn fill(
        &self,
        polygons: &[Polygon],
        offset: f64,
        kind: PocketingType,
        progress: Option<&dyn Progress>,
    ) -> Vec<Polygon>;
}

/// The backend for `kind`, limited to `max_depth` rings per seed.
pub fn backend(
    kind: PocketingBackendKind,
    max_depth: usize,
    sink: SharedSink,
) -> Box<dyn PocketingBackend> {
    match kind {
        PocketingBackendKind::Simple => Box::new(SimplePocketing::new(max_depth, sink)),
        PocketingBackendKind::Shape => Box::new(ShapePocketing::new(max_depth, sink)),
    }
}

/// Seed polygons and the remaining ones.
///
/// `Holes` seeds on closed outer polygons, `Material` on closed inner ones.
fn split_seeds(polygons: &[Polygon], kind: PocketingType) -> (Vec<&Polygon>, Vec<&Polygon>) {
    polygons.iter().partition(|polygon| {
        polygon.is_closed()
            && match kind {
                PocketingType::Holes => polygon.is_outer(),
                _ => !polygon.is_outer(),
            }
    })
}

fn report_unsupported(sink: &SharedSink, kind: PocketingType) {
    sink.report(Diagnostic::new(
        DiagnosticKind::UnsupportedPocketingType,
        format!("cannot pocket with type {kind}, polygons are left unchanged"),
    ));
}

/// Ring-by-ring offsetting of every seed polygon.
///
/// A seed surrounding any other polygon is not pocketed.
pub struct SimplePocketing {
    max_depth: usize,
    sink: SharedSink,
}

impl SimplePocketing {
    pub fn new(max_depth: usize, sink: SharedSink) -> Self {
        Self { max_depth, sink }
    }
}

impl PocketingBackend for SimplePocketing {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn fill(
        &self,
        polygons: &[Polygon],
        offset: f64,
        kind: PocketingType,
        progress: Option<&dyn Progress>,
    ) -> Vec<Polygon> {
        let offset = match kind {
            // inwards
            PocketingType::Holes => -offset,
            PocketingType::Material => offset,
            PocketingType::None => {
                report_unsupported(&self.sink, kind);
                return polygons.to_vec();
            }
        };
        let (seeds, others) = split_seeds(polygons, kind);

        let mut retained = Vec::with_capacity(seeds.len());
        for candidate in seeds {
            if poll(progress) {
                info!("Pocketing cancelled");
                return polygons.to_vec();
            }
            if others.iter().any(|other| candidate.contains(other)) {
                debug!("Skipping pocketing seed that surrounds another polygon");
                continue;
            }
            retained.push(candidate);
        }

        let mut pocket = Vec::new();
        for seed in retained {
            pocket.push(seed.clone());
            let mut ring = vec![seed.clone()];
            let mut depth = 0;
            while !ring.is_empty() && depth < self.max_depth {
                if poll(progress) {
                    info!("Pocketing cancelled");
                    return polygons.to_vec();
                }
                let next: Vec<Polygon> = ring.iter().flat_map(|p| p.offset(offset)).collect();
                pocket.extend(next.iter().cloned());
                ring = next;
                depth += 1;
            }
            if depth == self.max_depth && !ring.is_empty() {
                warn!("Pocketing stopped at the depth limit of {} rings", self.max_depth);
            }
        }
        debug!(
            "Simple pocketing turned {} polygons into {}",
            polygons.len(),
            pocket.len()
        );
        pocket
    }
}

/// Offsetting of whole shapes: outlines together with their islands.
///
/// The result holds the seeds of every height, for `Holes` the other closed
/// boundaries at that height (the islands), and the rings. Like [`SimplePocketing`], polygons
/// of a height without any seed are not part of the pocket.
pub struct ShapePocketing {
    max_depth: usize,
    sink: SharedSink,
}

impl ShapePocketing {
    pub fn new(max_depth: usize, sink: SharedSink) -> Self {
        Self { max_depth, sink }
    }
}

impl PocketingBackend for ShapePocketing {
    fn name(&self) -> &'static str {
        "shape"
    }

    fn fill(
        &self,
        polygons: &[Polygon],
        offset: f64,
        kind: PocketingType,
        progress: Option<&dyn Progress>,
    ) -> Vec<Polygon> {
        if kind == PocketingType::None {
            report_unsupported(&self.sink, kind);
            return polygons.to_vec();
        }
        let distance = offset.abs();

        let mut pocket = Vec::new();
        for (z, group) in group_by_height(polygons) {
            if poll(progress) {
                info!("Pocketing cancelled");
                return polygons.to_vec();
            }
            let (seeds, others) = split_seeds(&group, kind);
            if seeds.is_empty() {
                continue;
            }
            pocket.extend(seeds.iter().map(|seed| (*seed).clone()));

            // shapes shrink their counter-clockwise outlines for positive offsets
            let mut plines: Vec<Polyline<f64>> = Vec::new();
            match kind {
                PocketingType::Holes => {
                    // islands are machined with the pocket
                    let islands: Vec<&Polygon> =
                        others.into_iter().filter(|other| other.is_closed()).collect();
                    pocket.extend(islands.iter().map(|island| (*island).clone()));
                    plines.extend(seeds.iter().map(|seed| seed.to_polyline()));
                    plines.extend(islands.iter().map(|island| island.to_polyline()));
                }
                _ => plines.extend(seeds.iter().map(|seed| seed.reversed().to_polyline())),
            }

            let mut shape = Shape::from_plines(plines);
            let mut depth = 0;
            while depth < self.max_depth {
                if poll(progress) {
                    info!("Pocketing cancelled");
                    return polygons.to_vec();
                }
                let offset_res = panic::catch_unwind(panic::AssertUnwindSafe(|| {
                    shape.parallel_offset(distance, ShapeOffsetOptions::default())
                }));
                let Ok(next) = offset_res else {
                    warn!("Panic during shape offset at Z={}", z);
                    break;
                };
                let rings: Vec<Polygon> = next
                    .ccw_plines
                    .iter()
                    .chain(next.cw_plines.iter())
                    .filter_map(|indexed| Polygon::from_polyline(&indexed.polyline, z))
                    .map(|ring| {
                        if kind == PocketingType::Material {
                            ring.reversed()
                        } else {
                            ring
                        }
                    })
                    .collect();
                if rings.is_empty() {
                    break;
                }
                pocket.extend(rings);
                shape = next;
                depth += 1;
            }
        }
        debug!(
            "Shape pocketing turned {} polygons into {}",
            polygons.len(),
            pocket.len()
        );
        pocket
    }
}

/// Polygons grouped by their lowest point, in order of first appearance.
fn group_by_height(polygons: &[Polygon]) -> Vec<(f64, Vec<Polygon>)> {
    let mut groups: Vec<(f64, Vec<Polygon>)> = Vec::new();
    for polygon in polygons {
        let z = polygon.min_z();
        match groups.iter_mut().find(|(height, _)| (height - z).abs() < EPSILON) {
            Some((_, group)) => group.push(polygon.clone()),
            None => groups.push((z, vec![polygon.clone()])),
        }
    }
    groups
}
