//! Option types shared by the motion generators.
//!
//! Every enum serializes as a lowercase name, parses from its name with
//! [`FromStr`] and from its legacy numeric code with `TryFrom<u8>`.

use millpath_core::{ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Corner of the working volume a pass starts from.
///
/// Each flag selects the high (`true`) or low (`false`) bound of its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StartPosition {
    pub x_high: bool,
    pub y_high: bool,
    pub z_high: bool,
}

impl StartPosition {
    pub const fn new(x_high: bool, y_high: bool, z_high: bool) -> Self {
        Self {
            x_high,
            y_high,
            z_high,
        }
    }

    /// Low X and Y, starting from the top layer.
    pub const fn top() -> Self {
        Self::new(false, false, true)
    }

    /// Copy with the X flag toggled.
    pub fn toggle_x(self) -> Self {
        Self {
            x_high: !self.x_high,
            ..self
        }
    }

    /// Copy with the Y flag toggled.
    pub fn toggle_y(self) -> Self {
        Self {
            y_high: !self.y_high,
            ..self
        }
    }

    /// Copy with the flag of `axis` toggled.
    pub fn toggle(self, axis: GridDirection) -> Self {
        match axis {
            GridDirection::X => self.toggle_x(),
            GridDirection::Y => self.toggle_y(),
            GridDirection::XY => self.toggle_x().toggle_y(),
        }
    }

    /// The flag selecting the side of `axis`; `XY` has no single flag.
    pub fn is_high(&self, axis: GridDirection) -> Option<bool> {
        match axis {
            GridDirection::X => Some(self.x_high),
            GridDirection::Y => Some(self.y_high),
            GridDirection::XY => None,
        }
    }
}

impl fmt::Display for StartPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |high: bool| if high { "high" } else { "low" };
        write!(
            f,
            "x {} / y {} / z {}",
            side(self.x_high),
            side(self.y_high),
            side(self.z_high)
        )
    }
}

/// Axis the cutting lines run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridDirection {
    #[default]
    X,
    Y,
    /// An X pass followed by a Y pass on every layer.
    XY,
}

impl GridDirection {
    /// The perpendicular axis (`XY` has none and maps to itself).
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
            Self::XY => Self::XY,
        }
    }

    /// Single-axis passes making up this direction.
    pub fn passes(self) -> &'static [GridDirection] {
        match self {
            Self::X => &[GridDirection::X],
            Self::Y => &[GridDirection::Y],
            Self::XY => &[GridDirection::X, GridDirection::Y],
        }
    }
}

impl fmt::Display for GridDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
            Self::XY => write!(f, "XY"),
        }
    }
}

impl FromStr for GridDirection {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "xy" => Ok(Self::XY),
            _ => Err(unknown("grid direction", s)),
        }
    }
}

impl TryFrom<u8> for GridDirection {
    type Error = ParameterError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::X),
            1 => Ok(Self::Y),
            2 => Ok(Self::XY),
            _ => Err(unknown("grid direction", &code.to_string())),
        }
    }
}

/// Relation between tool rotation and feed direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MillingStyle {
    /// Direction does not matter; grids may zigzag.
    #[default]
    Ignore,
    Conventional,
    Climb,
}

impl fmt::Display for MillingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignore => write!(f, "Ignore"),
            Self::Conventional => write!(f, "Conventional"),
            Self::Climb => write!(f, "Climb"),
        }
    }
}

impl FromStr for MillingStyle {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ignore" | "any" => Ok(Self::Ignore),
            "conventional" | "conv" => Ok(Self::Conventional),
            "climb" => Ok(Self::Climb),
            _ => Err(unknown("milling style", s)),
        }
    }
}

impl TryFrom<u8> for MillingStyle {
    type Error = ParameterError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Ignore),
            1 => Ok(Self::Conventional),
            2 => Ok(Self::Climb),
            _ => Err(unknown("milling style", &code.to_string())),
        }
    }
}

/// Traversal direction of a spiral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiralDirection {
    /// From the outer rectangle towards the centre.
    #[default]
    In,
    /// From the centre outwards.
    Out,
}

impl fmt::Display for SpiralDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "In"),
            Self::Out => write!(f, "Out"),
        }
    }
}

impl FromStr for SpiralDirection {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in" | "inward" => Ok(Self::In),
            "out" | "outward" => Ok(Self::Out),
            _ => Err(unknown("spiral direction", s)),
        }
    }
}

impl TryFrom<u8> for SpiralDirection {
    type Error = ParameterError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::In),
            1 => Ok(Self::Out),
            _ => Err(unknown("spiral direction", &code.to_string())),
        }
    }
}

/// Which closed boundaries get filled with offset rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PocketingType {
    #[default]
    None,
    /// Clear the inside of outer boundaries.
    Holes,
    /// Fill inner boundaries.
    Material,
}

impl fmt::Display for PocketingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Holes => write!(f, "Holes"),
            Self::Material => write!(f, "Material"),
        }
    }
}

impl FromStr for PocketingType {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "holes" => Ok(Self::Holes),
            "material" => Ok(Self::Material),
            _ => Err(unknown("pocketing type", s)),
        }
    }
}

impl TryFrom<u8> for PocketingType {
    type Error = ParameterError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Holes),
            2 => Ok(Self::Material),
            _ => Err(unknown("pocketing type", &code.to_string())),
        }
    }
}

/// Implementation used to compute pocketing rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PocketingBackendKind {
    /// Ring-by-ring offsetting of each seed polygon on its own.
    #[default]
    Simple,
    /// Offsetting whole shapes, islands included.
    Shape,
}

impl fmt::Display for PocketingBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "Simple"),
            Self::Shape => write!(f, "Shape"),
        }
    }
}

impl FromStr for PocketingBackendKind {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "shape" => Ok(Self::Shape),
            _ => Err(unknown("pocketing backend", s)),
        }
    }
}

/// Spacing between consecutive positions along an axis.
///
/// Serialized as either a number (an increment) or a list of positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Spacing {
    /// Largest distance between positions; the actual distance is evened out.
    Increment(f64),
    /// Explicit positions.
    Positions(Vec<f64>),
}

impl Spacing {
    /// Check that the spacing can produce positions.
    pub fn validate(&self, name: &str) -> ParameterResult<()> {
        match self {
            Self::Increment(increment) => {
                if !increment.is_finite() || *increment <= 0.0 {
                    return Err(ParameterError::InvalidValue {
                        name: name.to_string(),
                        reason: format!("increment must be positive, got {increment}"),
                    });
                }
            }
            Self::Positions(positions) => {
                if positions.is_empty() {
                    return Err(ParameterError::InvalidValue {
                        name: name.to_string(),
                        reason: "position list is empty".to_string(),
                    });
                }
                if positions.iter().any(|p| !p.is_finite()) {
                    return Err(ParameterError::InvalidValue {
                        name: name.to_string(),
                        reason: "position list contains a non-finite value".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl From<f64> for Spacing {
    fn from(increment: f64) -> Self {
        Self::Increment(increment)
    }
}

impl From<Vec<f64>> for Spacing {
    fn from(positions: Vec<f64>) -> Self {
        Self::Positions(positions)
    }
}

fn unknown(kind: &'static str, value: &str) -> ParameterError {
    ParameterError::UnknownVariant {
        kind,
        value: value.to_string(),
    }
}
