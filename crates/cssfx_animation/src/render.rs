//! Render target and code preview collaborators

use std::cell::RefCell;
use std::rc::Rc;

/// Shown in the filter code panel when no filter is active
pub const NO_FILTERS_TEXT: &str =
    "No filters applied. Add a filter from the left panel to see the CSS syntax for it.";

/// Shown in the animation code panel when there are no keyframes
pub const NO_ANIMATION_TEXT: &str =
    "No keyframes applied. Add a filter from the left panel and change the values to see the CSS syntax for it.";

/// A styleable surface receiving the computed filter
pub trait RenderTarget {
    /// Apply a CSS `filter` value
    fn set_filter(&mut self, css: &str);

    /// Ask the surface to promote itself to a GPU compositing layer
    fn set_compositing_hint(&mut self, enabled: bool);
}

impl<T: RenderTarget> RenderTarget for Rc<RefCell<T>> {
    fn set_filter(&mut self, css: &str) {
        self.borrow_mut().set_filter(css);
    }

    fn set_compositing_hint(&mut self, enabled: bool) {
        self.borrow_mut().set_compositing_hint(enabled);
    }
}

/// Panels displaying the generated code
pub trait CodePanel {
    fn show_filter_code(&mut self, html: &str);

    fn show_animation_code(&mut self, html: &str);
}

impl<T: CodePanel> CodePanel for Rc<RefCell<T>> {
    fn show_filter_code(&mut self, html: &str) {
        self.borrow_mut().show_filter_code(html);
    }

    fn show_animation_code(&mut self, html: &str) {
        self.borrow_mut().show_animation_code(html);
    }
}

/// The last generated code previews
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodePreview {
    /// Active filters at the current time
    pub filter_code: String,
    /// One `@keyframes` stop per stored keyframe
    pub animation_code: String,
}

/// In-memory render target holding an inline style declaration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineStyle {
    filter: String,
    gpu_layer: bool,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn gpu_layer(&self) -> bool {
        self.gpu_layer
    }

    /// The declaration block, e.g. `transform: translate3d(0, 0, 0); filter: blur(2px);`
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if self.gpu_layer {
            css.push_str("transform: translate3d(0, 0, 0);");
        }
        if !self.filter.is_empty() {
            if !css.is_empty() {
                css.push(' ');
            }
            css.push_str(&format!("filter: {};", self.filter));
        }
        css
    }
}

impl RenderTarget for InlineStyle {
    fn set_filter(&mut self, css: &str) {
        self.filter = css.to_string();
    }

    fn set_compositing_hint(&mut self, enabled: bool) {
        self.gpu_layer = enabled;
    }
}

impl CodePanel for CodePreview {
    fn show_filter_code(&mut self, html: &str) {
        self.filter_code = html.to_string();
    }

    fn show_animation_code(&mut self, html: &str) {
        self.animation_code = html.to_string();
    }
}
