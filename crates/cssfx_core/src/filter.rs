//! Filter kinds and filter instances
//!
//! Every CSS filter function the editor knows about is a [`FilterKind`] with a
//! fixed list of [`ParamSpec`]s. A [`Filter`] is one named instance of a kind
//! inside a [`FilterList`](crate::FilterList).

use crate::code::CodeStyle;
use crate::color::Color;
use crate::error::{FilterError, Result};
use crate::values::{FilterValue, ParamValue};
use std::fmt;

/// Description of one filter parameter
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub default: ParamValue,
    /// CSS unit appended to numeric values
    pub unit: &'static str,
    /// Inclusive bounds for numeric values
    pub range: Option<(f32, f32)>,
}

impl ParamSpec {
    const fn number(
        name: &'static str,
        default: f32,
        unit: &'static str,
        min: f32,
        max: f32,
    ) -> Self {
        Self {
            name,
            default: ParamValue::Number(default),
            unit,
            range: Some((min, max)),
        }
    }

    const fn color(name: &'static str, default: Color) -> Self {
        Self {
            name,
            default: ParamValue::Color(default),
            unit: "",
            range: None,
        }
    }
}

const BLUR: &[ParamSpec] = &[ParamSpec::number("radius", 0.0, "px", 0.0, 50.0)];
const BRIGHTNESS: &[ParamSpec] = &[ParamSpec::number("amount", 100.0, "%", 0.0, 500.0)];
const CONTRAST: &[ParamSpec] = &[ParamSpec::number("amount", 100.0, "%", 0.0, 500.0)];
const DROP_SHADOW: &[ParamSpec] = &[
    ParamSpec::number("offset-x", 5.0, "px", -100.0, 100.0),
    ParamSpec::number("offset-y", 5.0, "px", -100.0, 100.0),
    ParamSpec::number("radius", 5.0, "px", 0.0, 100.0),
    ParamSpec::color("color", Color::rgba(0.0, 0.0, 0.0, 0.5)),
];
const GRAYSCALE: &[ParamSpec] = &[ParamSpec::number("amount", 0.0, "%", 0.0, 100.0)];
const HUE_ROTATE: &[ParamSpec] = &[ParamSpec::number("angle", 0.0, "deg", 0.0, 360.0)];
const INVERT: &[ParamSpec] = &[ParamSpec::number("amount", 0.0, "%", 0.0, 100.0)];
const OPACITY: &[ParamSpec] = &[ParamSpec::number("amount", 100.0, "%", 0.0, 100.0)];
const SATURATE: &[ParamSpec] = &[ParamSpec::number("amount", 100.0, "%", 0.0, 500.0)];
const SEPIA: &[ParamSpec] = &[ParamSpec::number("amount", 0.0, "%", 0.0, 100.0)];

/// The CSS filter functions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Blur,
    Brightness,
    Contrast,
    DropShadow,
    Grayscale,
    HueRotate,
    Invert,
    Opacity,
    Saturate,
    Sepia,
}

impl FilterKind {
    pub const ALL: [FilterKind; 10] = [
        FilterKind::Blur,
        FilterKind::Brightness,
        FilterKind::Contrast,
        FilterKind::DropShadow,
        FilterKind::Grayscale,
        FilterKind::HueRotate,
        FilterKind::Invert,
        FilterKind::Opacity,
        FilterKind::Saturate,
        FilterKind::Sepia,
    ];

    /// Type name as stored in snapshots, also the CSS function name
    pub fn type_name(self) -> &'static str {
        match self {
            FilterKind::Blur => "blur",
            FilterKind::Brightness => "brightness",
            FilterKind::Contrast => "contrast",
            FilterKind::DropShadow => "drop-shadow",
            FilterKind::Grayscale => "grayscale",
            FilterKind::HueRotate => "hue-rotate",
            FilterKind::Invert => "invert",
            FilterKind::Opacity => "opacity",
            FilterKind::Saturate => "saturate",
            FilterKind::Sepia => "sepia",
        }
    }

    pub fn from_type_name(name: &str) -> Result<Self> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.type_name() == name)
            .ok_or_else(|| FilterError::UnknownType(name.to_string()))
    }

    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            FilterKind::Blur => BLUR,
            FilterKind::Brightness => BRIGHTNESS,
            FilterKind::Contrast => CONTRAST,
            FilterKind::DropShadow => DROP_SHADOW,
            FilterKind::Grayscale => GRAYSCALE,
            FilterKind::HueRotate => HUE_ROTATE,
            FilterKind::Invert => INVERT,
            FilterKind::Opacity => OPACITY,
            FilterKind::Saturate => SATURATE,
            FilterKind::Sepia => SEPIA,
        }
    }

    pub fn param(self, name: &str) -> Option<&'static ParamSpec> {
        self.params().iter().find(|spec| spec.name == name)
    }

    /// Parameter map holding every default value
    pub fn default_value(self) -> FilterValue {
        self.params()
            .iter()
            .map(|spec| (spec.name.to_string(), spec.default))
            .collect()
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A named filter instance
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    /// Unique within its list; keyframe values are keyed by it
    pub name: String,
    pub kind: FilterKind,
    pub active: bool,
}

impl Filter {
    pub fn new(name: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            active: true,
        }
    }

    pub fn default_value(&self) -> FilterValue {
        self.kind.default_value()
    }

    /// Validate a parameter edit, clamping numbers into the parameter's range
    pub fn check_param(&self, param: &str, value: ParamValue) -> Result<ParamValue> {
        let spec = self
            .kind
            .param(param)
            .ok_or_else(|| FilterError::UnknownParam {
                filter: self.name.clone(),
                param: param.to_string(),
            })?;

        if !spec.default.same_kind(&value) {
            return Err(FilterError::ParamKindMismatch {
                filter: self.name.clone(),
                param: param.to_string(),
                expected: match spec.default {
                    ParamValue::Number(_) => "number",
                    ParamValue::Color(_) => "color",
                },
            });
        }

        Ok(match (value, spec.range) {
            (ParamValue::Number(n), Some((min, max))) => ParamValue::Number(n.clamp(min, max)),
            _ => value,
        })
    }

    /// Generate the CSS function for this filter from a keyframe's parameters
    ///
    /// Parameters missing from `value` fall back to their defaults.
    pub fn generate_code(&self, value: Option<&FilterValue>, style: &dyn CodeStyle) -> String {
        let args: Vec<String> = self
            .kind
            .params()
            .iter()
            .map(|spec| {
                let param = value
                    .and_then(|v| v.get(spec.name))
                    .filter(|v| v.same_kind(&spec.default))
                    .unwrap_or(&spec.default);
                match param {
                    ParamValue::Number(n) => style.number(*n, spec.unit),
                    ParamValue::Color(c) => style.color(c),
                }
            })
            .collect();

        style.function(self.kind.type_name(), &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::PlainCss;

    #[test]
    fn test_type_names_round_trip() {
        for kind in FilterKind::ALL {
            assert_eq!(FilterKind::from_type_name(kind.type_name()), Ok(kind));
        }
        assert_eq!(
            FilterKind::from_type_name("custom"),
            Err(FilterError::UnknownType("custom".into()))
        );
    }

    #[test]
    fn test_generate_default_code() {
        let blur = Filter::new("blur", FilterKind::Blur);
        assert_eq!(blur.generate_code(None, &PlainCss), "blur(0px)");

        let hue = Filter::new("hue-rotate", FilterKind::HueRotate);
        assert_eq!(hue.generate_code(None, &PlainCss), "hue-rotate(0deg)");
    }

    #[test]
    fn test_generate_drop_shadow() {
        let shadow = Filter::new("drop-shadow", FilterKind::DropShadow);
        let mut value = shadow.default_value();
        value.insert("radius".into(), ParamValue::Number(12.5));

        assert_eq!(
            shadow.generate_code(Some(&value), &PlainCss),
            "drop-shadow(5px 5px 12.5px rgba(0, 0, 0, 0.5))"
        );
    }

    #[test]
    fn test_check_param() {
        let sepia = Filter::new("sepia", FilterKind::Sepia);
        assert_eq!(
            sepia.check_param("amount", ParamValue::Number(150.0)),
            Ok(ParamValue::Number(100.0))
        );
        assert!(matches!(
            sepia.check_param("radius", ParamValue::Number(1.0)),
            Err(FilterError::UnknownParam { .. })
        ));
        assert!(matches!(
            sepia.check_param("amount", ParamValue::Color(Color::WHITE)),
            Err(FilterError::ParamKindMismatch { expected: "number", .. })
        ));
    }
}
