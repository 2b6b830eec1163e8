//! Error types for cssfx_animation

use crate::lookup::KeyframeId;
use cssfx_core::FilterError;
use thiserror::Error;

/// Errors that can occur while editing or loading an animation
#[derive(Error, Debug)]
pub enum AnimationError {
    /// Filter set or parameter error
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Keyframe times must be finite and non-negative
    #[error("Invalid keyframe time: {0}")]
    InvalidTime(f32),

    /// The keyframe is not stored in this animation
    #[error("Keyframe not found: {0:?}")]
    KeyframeNotFound(KeyframeId),

    /// Snapshot could not be read or written
    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for cssfx_animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
