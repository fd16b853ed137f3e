//! Ordering of boundary polygons before they are machined.

use millpath_core::{Point3, Polygon, Progress};

/// Decides the order polygons are machined in.
pub trait PolygonOrdering {
    fn order(&self, polygons: Vec<Polygon>, progress: Option<&dyn Progress>) -> Vec<Polygon>;
}

/// Greedy travel minimisation: after each polygon, continue with the
/// remaining polygon starting closest to where the previous one ended.
///
/// The first polygon keeps its place.
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestNeighbourSorter;

impl PolygonOrdering for NearestNeighbourSorter {
    fn order(&self, polygons: Vec<Polygon>, progress: Option<&dyn Progress>) -> Vec<Polygon> {
        let mut remaining = polygons;
        let mut ordered = Vec::with_capacity(remaining.len());
        if remaining.is_empty() {
            return ordered;
        }
        let mut current = remaining.remove(0);
        loop {
            if let Some(progress) = progress {
                // ordering always runs to completion
                let _ = progress.tick();
            }
            let position = exit_point(&current);
            ordered.push(current);

            let nearest = remaining
                .iter()
                .enumerate()
                .map(|(index, polygon)| (index, distance_squared(&position, &entry_point(polygon))))
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(index, _)| index);
            match nearest {
                Some(index) => current = remaining.remove(index),
                None => break,
            }
        }
        ordered
    }
}

/// Keeps the given order.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeepOrder;

impl PolygonOrdering for KeepOrder {
    fn order(&self, polygons: Vec<Polygon>, _progress: Option<&dyn Progress>) -> Vec<Polygon> {
        polygons
    }
}

/// Inner polygons (area at most zero) first, then outer polygons, each group
/// ordered by `ordering`.
///
/// Cutting holes before outlines keeps pieces attached to the stock as long
/// as possible.
pub fn sorted_polygons(
    polygons: Vec<Polygon>,
    ordering: &dyn PolygonOrdering,
    progress: Option<&dyn Progress>,
) -> Vec<Polygon> {
    let (inner, outer): (Vec<Polygon>, Vec<Polygon>) =
        polygons.into_iter().partition(|polygon| polygon.area() <= 0.0);
    let mut sorted = ordering.order(inner, progress);
    sorted.extend(ordering.order(outer, progress));
    sorted
}

fn entry_point(polygon: &Polygon) -> Point3 {
    polygon.points()[0]
}

fn exit_point(polygon: &Polygon) -> Point3 {
    if polygon.is_closed() {
        polygon.points()[0]
    } else {
        polygon.points()[polygon.points().len() - 1]
    }
}

fn distance_squared(a: &Point3, b: &Point3) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}
