//! cssfx Animation System
//!
//! Keyframed CSS filter animations with a live preview.
//!
//! # Features
//!
//! - **Keyframe Lookup**: Bracket any time between stored keyframes
//! - **Blending**: Generated keyframes interpolated between neighbours or cloned at the edges
//! - **Live Preview**: Filter CSS pushed to a render target, highlighted code to a code panel
//! - **Timeline Notifications**: Keyframe lifecycle and selection changes
//! - **Persistence**: JSON snapshots with atomic loading
//! - **Debounced Saving**: Bursts of edits coalesce into one save; guards suppress saving
//!
//! # Example
//!
//! ```rust
//! use cssfx_animation::{Animation, InlineStyle};
//! use cssfx_core::{FilterKind, FilterList, KeyframeValue, ParamValue};
//!
//! let filters = FilterList::with_kinds([FilterKind::Sepia]);
//! let mut animation = Animation::new(filters, InlineStyle::new());
//!
//! animation.create_keyframe(0.0, KeyframeValue::new()).unwrap();
//! animation.set_current_time(10.0);
//! animation.set_param("sepia", "amount", ParamValue::Number(100.0)).unwrap();
//!
//! animation.set_current_time(5.0);
//! assert_eq!(animation.filter_css(), "sepia(50%)");
//! ```

pub mod animation;
pub mod cache;
pub mod config;
pub mod error;
pub mod lookup;
pub mod render;
pub mod save;
pub mod snapshot;
pub mod store;
pub mod timeline;


pub use animation::{Animation, KeyframeToggle};
pub use cache::{FrameRef, ResolvedKeyframe};
pub use config::{AnimationConfig, DEFAULT_DURATION};
pub use error::{AnimationError, Result};
pub use lookup::{find_keyframe_set, KeyframeId, KeyframeSet};
pub use render::{
    CodePanel, CodePreview, InlineStyle, RenderTarget, NO_ANIMATION_TEXT, NO_FILTERS_TEXT,
};
pub use save::{Clock, ManualClock, SaveGuard, SaveTimer, SystemClock};
pub use snapshot::{AnimationSnapshot, KeyframeEntry};
pub use store::{AnimationStore, MemoryStore};
pub use timeline::{Timeline, TimelineModel};
