//! Animatable parameter values
//!
//! Provides the interpolation trait and the value types stored in keyframes:
//! a keyframe maps filter names to parameter maps, and a parameter map maps
//! parameter names to [`ParamValue`]s.

use crate::color::Color;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// Parameter values
// ============================================================================

/// A single filter parameter value
///
/// Serialized untagged: numbers as JSON numbers, colors as `[r, g, b, a]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f32),
    Color(Color),
}

impl ParamValue {
    /// The numeric value, if this is a number
    pub fn as_number(&self) -> Option<f32> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Color(_) => None,
        }
    }

    /// The color value, if this is a color
    pub fn as_color(&self) -> Option<Color> {
        match self {
            ParamValue::Color(c) => Some(*c),
            ParamValue::Number(_) => None,
        }
    }

    /// Whether both values are of the same variant
    pub fn same_kind(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (ParamValue::Number(_), ParamValue::Number(_))
                | (ParamValue::Color(_), ParamValue::Color(_))
        )
    }
}

impl Interpolate for ParamValue {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        match (self, other) {
            (ParamValue::Number(a), ParamValue::Number(b)) => ParamValue::Number(a.lerp(b, t)),
            (ParamValue::Color(a), ParamValue::Color(b)) => ParamValue::Color(a.lerp(b, t)),
            // Mismatched kinds hold the start value
            _ => *self,
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        match (self, other) {
            (ParamValue::Number(a), ParamValue::Number(b)) => a.approx_eq(b, epsilon),
            (ParamValue::Color(a), ParamValue::Color(b)) => a.approx_eq(b, epsilon),
            _ => false,
        }
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Number(value)
    }
}

impl From<Color> for ParamValue {
    fn from(value: Color) -> Self {
        ParamValue::Color(value)
    }
}

/// Parameter name → value for one filter
pub type FilterValue = IndexMap<String, ParamValue>;

/// Filter name → parameter map for one keyframe
pub type KeyframeValue = IndexMap<String, FilterValue>;

impl Interpolate for FilterValue {
    /// Parameters missing from `other` keep their value from `self`
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self.iter()
            .map(|(name, value)| {
                let blended = match other.get(name) {
                    Some(target) => value.lerp(target, t),
                    None => *value,
                };
                (name.clone(), blended)
            })
            .collect()
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.len() == other.len()
            && self.iter().all(|(name, value)| {
                other
                    .get(name)
                    .is_some_and(|target| value.approx_eq(target, epsilon))
            })
    }
}
