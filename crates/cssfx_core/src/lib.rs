//! cssfx Core Model
//!
//! The building blocks animated by `cssfx_animation`:
//!
//! - **Filter kinds**: the CSS filter functions with their parameters and defaults
//! - **Filter lists**: the ordered, named filters applied to a target
//! - **Keyframes**: parameter snapshots at a point in time, with blending
//! - **Code styles**: plain and highlighted CSS generation
//!
//! # Example
//!
//! ```rust
//! use cssfx_core::{FilterKind, FilterList, Keyframe, KeyframeValue, ParamValue, PlainCss};
//!
//! let list = FilterList::with_kinds([FilterKind::Sepia]);
//! let sepia = list.get("sepia").unwrap();
//!
//! let start = Keyframe::new(&list, 0.0, KeyframeValue::new());
//! let mut end = Keyframe::new(&list, 10.0, KeyframeValue::new());
//! end.set_param(sepia, "amount", ParamValue::Number(100.0)).unwrap();
//!
//! let mid = start.blend(&end, 0.5, 5.0);
//! assert_eq!(sepia.generate_code(mid.filter_value("sepia"), &PlainCss), "sepia(50%)");
//! ```

pub mod code;
pub mod color;
pub mod error;
pub mod filter;
pub mod filter_list;
pub mod keyframe;
pub mod values;

pub use code::{format_number, CodeStyle, HighlightedCss, PlainCss};
pub use color::Color;
pub use error::{FilterError, Result};
pub use filter::{Filter, FilterKind, ParamSpec};
pub use filter_list::{FilterEntry, FilterList};
pub use keyframe::Keyframe;
pub use values::{FilterValue, Interpolate, KeyframeValue, ParamValue};
