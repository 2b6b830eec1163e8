//! Code formatting styles
//!
//! A [`CodeStyle`] decides how generated CSS is written out. [`PlainCss`]
//! produces the text applied to the render target, [`HighlightedCss`]
//! produces HTML markup for the code preview panels.

use crate::color::Color;

/// Formatting strategy for generated CSS
pub trait CodeStyle {
    /// A filter function call such as `blur(4px)`
    fn function(&self, name: &str, args: &[String]) -> String;

    /// A number followed by its unit
    fn number(&self, value: f32, unit: &str) -> String;

    /// A color literal
    fn color(&self, color: &Color) -> String;

    /// One `@keyframes` stop holding the given filter functions
    fn keyframe(&self, percent: &str, filters: &[String]) -> String;
}

/// Round to two decimals and drop trailing zeros
pub fn format_number(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid printing "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// Raw CSS text
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainCss;

impl CodeStyle for PlainCss {
    fn function(&self, name: &str, args: &[String]) -> String {
        format!("{}({})", name, args.join(" "))
    }

    fn number(&self, value: f32, unit: &str) -> String {
        format!("{}{}", format_number(value), unit)
    }

    fn color(&self, color: &Color) -> String {
        color.to_string()
    }

    fn keyframe(&self, percent: &str, filters: &[String]) -> String {
        format!("{} {{\n  filter: {};\n}}\n", percent, filters.join(" "))
    }
}

/// HTML markup with one span class per token kind
#[derive(Clone, Copy, Debug, Default)]
pub struct HighlightedCss;

impl CodeStyle for HighlightedCss {
    fn function(&self, name: &str, args: &[String]) -> String {
        format!(
            "<span class=\"css-function\">{}</span>({})",
            name,
            args.join(" ")
        )
    }

    fn number(&self, value: f32, unit: &str) -> String {
        if unit.is_empty() {
            return format!("<span class=\"css-number\">{}</span>", format_number(value));
        }
        format!(
            "<span class=\"css-number\">{}</span><span class=\"css-unit\">{}</span>",
            format_number(value),
            unit
        )
    }

    fn color(&self, color: &Color) -> String {
        format!("<span class=\"css-color\">{}</span>", color)
    }

    fn keyframe(&self, percent: &str, filters: &[String]) -> String {
        format!(
            "<div class=\"css-keyframe\"><span class=\"css-percent\">{}</span> {{<br />\
             &nbsp;&nbsp;<span class=\"css-property\">filter</span>: {};<br />}}</div>",
            percent,
            filters.join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(50.0), "50");
        assert_eq!(format_number(12.3456), "12.35");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(0.5), "0.5");
    }

    #[test]
    fn test_plain_keyframe() {
        let code = PlainCss.keyframe("50%", &["blur(2px)".into(), "sepia(10%)".into()]);
        assert_eq!(code, "50% {\n  filter: blur(2px) sepia(10%);\n}\n");
    }

    #[test]
    fn test_highlighted_number() {
        assert_eq!(
            HighlightedCss.number(4.0, "px"),
            "<span class=\"css-number\">4</span><span class=\"css-unit\">px</span>"
        );
    }
}
