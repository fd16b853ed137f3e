//! # MillPath
//!
//! Tool-motion pattern generation for subtractive machining (milling and
//! similar processes). A generator turns a box or a set of boundary polygons
//! into layers of path segments for a tool to follow.
//!
//! ## Architecture
//!
//! MillPath is organized as a workspace with multiple crates:
//!
//! 1. **millpath-core** - Error types, progress callbacks, geometry primitives
//! 2. **millpath-motion** - Stepper, grid, spiral, slicer, pocketing, sorting
//! 3. **millpath** - This crate, re-exporting both plus logging setup
//!
//! ## Features
//!
//! - **Fixed Grid**: raster lines along X, Y or both, zigzag or one-way
//! - **Spiral**: rectangular spirals inwards or outwards, optionally rounded
//! - **Lines**: boundary following with layer slicing and optional pocketing
//! - **Configuration**: serde parameter structs, loadable from JSON

pub use millpath_core as core;
pub use millpath_motion as motion;

pub use millpath_core::{
    BoundingBox, CancelAfter, GeometryError, Line, MotionError, MotionResult, ParameterError,
    ParameterResult, Plane, Point3, Polygon, Progress, ProgressCallback, Vector3, EPSILON,
};

pub use millpath_motion::{
    CollectingSink, Diagnostic, DiagnosticKind, DiagnosticSink, FixedGrid, FixedGridGenerator,
    GridDirection, GridLayer, GridLine, GridParams, LineLayer, LinesGrid, LinesParams,
    MillingStyle, MotionConfig, PathSegment, PocketingBackend, PocketingBackendKind,
    PocketingType, PolygonOrdering, Spacing, Spiral, SpiralDirection, SpiralGenerator,
    SpiralLayer, SpiralParams, StartPosition, Stepper,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured console logging honouring the `RUST_LOG` environment
/// variable, at INFO level unless overridden. Fails if a global subscriber
/// is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Initialize logging as one JSON object per line, for log collectors.
pub fn init_json_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
