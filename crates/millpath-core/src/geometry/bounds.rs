use super::Point3;
use serde::{Deserialize, Serialize};

/// Axis-aligned machining envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub low: Point3,
    pub high: Point3,
}

impl BoundingBox {
    /// Creates a box from two opposite corners, in any order.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            low: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            high: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    pub fn width(&self) -> f64 {
        self.high.x - self.low.x
    }

    pub fn height(&self) -> f64 {
        self.high.y - self.low.y
    }

    /// Copy of the box with the lower Z raised to at least `z`.
    pub fn with_min_low_z(&self, z: f64) -> Self {
        let mut bounds = *self;
        bounds.low.z = bounds.low.z.max(z).min(bounds.high.z);
        bounds
    }
}
