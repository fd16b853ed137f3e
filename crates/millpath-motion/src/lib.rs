//! # MillPath Motion
//!
//! Tool motion patterns for subtractive machining, produced layer by layer.
//!
//! ## Strategies
//!
//! - **Fixed grid**: parallel lines, zigzagging when the milling style allows
//!   it, with a start corner that respects climb or conventional milling
//! - **Spiral**: a rectangular spiral per layer, inwards or outwards, with
//!   optional rounded corners
//! - **Lines**: boundary polygons sliced at every layer height, optionally
//!   filled with pocketing rings first
//!
//! ## Supporting Infrastructure
//!
//! - **Stepper**: evenly spaced positions between two bounds
//! - **Slicer**: edge clipping and lifting for descending layers
//! - **Pocketing**: simple and shape-based offset ring backends
//! - **Sorter**: polygon ordering before machining
//! - **Diagnostics**: reporting of non-fatal geometry problems

pub mod config;
pub mod diagnostics;
pub mod grid;
pub mod lines;
pub mod path;
pub mod pocket;
pub mod slicer;
pub mod sorter;
pub mod spiral;
pub mod stepper;
pub mod types;

// Re-export commonly used items
pub use config::{GridParams, LinesParams, MotionConfig, SpiralParams, DEFAULT_MAX_POCKET_DEPTH};
pub use diagnostics::{
    default_sink, CollectingSink, Diagnostic, DiagnosticKind, DiagnosticSink, SharedSink,
    TracingSink,
};
pub use grid::{compatible_start, FixedGrid, FixedGridGenerator, GridLayer, GridLine};
pub use lines::{LineLayer, LinesGrid, POCKETING_STATUS};
pub use path::{layer_heights, PathSegment, Positions};
pub use pocket::{backend, PocketingBackend, ShapePocketing, SimplePocketing};
pub use slicer::LayerSlicer;
pub use sorter::{sorted_polygons, KeepOrder, NearestNeighbourSorter, PolygonOrdering};
pub use spiral::{Spiral, SpiralGenerator, SpiralLayer};
pub use stepper::Stepper;
pub use types::{
    GridDirection, MillingStyle, PocketingBackendKind, PocketingType, Spacing, SpiralDirection,
    StartPosition,
};
