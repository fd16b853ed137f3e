//! Parameters of the motion strategies.
//!
//! All parameter sets can be built in code (every field is public and has a
//! default) or loaded from JSON through [`MotionConfig`]. Generators call
//! `validate()` before producing anything.

use crate::types::{
    GridDirection, MillingStyle, PocketingBackendKind, PocketingType, Spacing, SpiralDirection,
    StartPosition,
};
use millpath_core::{MotionResult, ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};

/// Hard limit of offset rings per pocketing seed.
pub const DEFAULT_MAX_POCKET_DEPTH: usize = 1000;

/// Parameters of a fixed raster grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    /// Distance between layers; `None` means a single layer at the low bound.
    pub layer_spacing: Option<Spacing>,
    /// Distance between neighbouring lines.
    pub line_spacing: Spacing,
    /// Distance between points along a line; `None` keeps only the ends.
    pub step: Option<Spacing>,
    pub direction: GridDirection,
    pub style: MillingStyle,
    pub start: StartPosition,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            layer_spacing: None,
            line_spacing: Spacing::Increment(1.0),
            step: None,
            direction: GridDirection::X,
            style: MillingStyle::Ignore,
            start: StartPosition::top(),
        }
    }
}

impl GridParams {
    pub fn validate(&self) -> ParameterResult<()> {
        validate_optional(self.layer_spacing.as_ref(), "layer spacing")?;
        self.line_spacing.validate("line spacing")?;
        validate_optional(self.step.as_ref(), "step width")?;
        Ok(())
    }
}

/// Parameters of a rectangular spiral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralParams {
    pub layer_spacing: Option<Spacing>,
    /// Requested distance between neighbouring rings.
    pub line_distance: f64,
    pub step: Option<Spacing>,
    pub style: MillingStyle,
    pub direction: SpiralDirection,
    pub rounded_corners: bool,
    pub start: StartPosition,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            layer_spacing: None,
            line_distance: 1.0,
            step: None,
            style: MillingStyle::Ignore,
            direction: SpiralDirection::In,
            rounded_corners: false,
            start: StartPosition::top(),
        }
    }
}

impl SpiralParams {
    pub fn validate(&self) -> ParameterResult<()> {
        validate_optional(self.layer_spacing.as_ref(), "layer spacing")?;
        validate_positive(self.line_distance, "line distance")?;
        validate_optional(self.step.as_ref(), "step width")?;
        Ok(())
    }
}

/// Parameters of boundary following over sliced polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinesParams {
    pub layer_spacing: Option<Spacing>,
    /// Distance between pocketing rings.
    pub line_distance: f64,
    /// Step width used on the lowest layer only.
    pub step: Option<Spacing>,
    pub style: MillingStyle,
    pub start: StartPosition,
    pub pocketing: PocketingType,
    pub backend: PocketingBackendKind,
    /// Maximum number of offset rings per pocketing seed.
    pub max_depth: usize,
}

impl Default for LinesParams {
    fn default() -> Self {
        Self {
            layer_spacing: None,
            line_distance: 1.0,
            step: None,
            style: MillingStyle::Conventional,
            start: StartPosition::top(),
            pocketing: PocketingType::None,
            backend: PocketingBackendKind::Simple,
            max_depth: DEFAULT_MAX_POCKET_DEPTH,
        }
    }
}

impl LinesParams {
    pub fn validate(&self) -> ParameterResult<()> {
        validate_optional(self.layer_spacing.as_ref(), "layer spacing")?;
        validate_optional(self.step.as_ref(), "step width")?;
        if self.pocketing != PocketingType::None {
            validate_positive(self.line_distance, "line distance")?;
            if self.max_depth == 0 {
                return Err(ParameterError::OutOfRange {
                    name: "max depth".to_string(),
                    value: 0.0,
                    min: 1.0,
                    max: f64::INFINITY,
                });
            }
        }
        Ok(())
    }
}

/// A motion strategy with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum MotionConfig {
    Grid(GridParams),
    Spiral(SpiralParams),
    Lines(LinesParams),
}

impl MotionConfig {
    /// Parse and validate a configuration.
    pub fn from_json_str(json: &str) -> MotionResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> MotionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ParameterResult<()> {
        match self {
            Self::Grid(params) => params.validate(),
            Self::Spiral(params) => params.validate(),
            Self::Lines(params) => params.validate(),
        }
    }
}

fn validate_optional(spacing: Option<&Spacing>, name: &str) -> ParameterResult<()> {
    spacing.map_or(Ok(()), |spacing| spacing.validate(name))
}

fn validate_positive(value: f64, name: &str) -> ParameterResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::InvalidValue {
            name: name.to_string(),
            reason: format!("must be positive, got {value}"),
        })
    }
}
