//! Animation configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Duration used when no timeline is attached
pub const DEFAULT_DURATION: f32 = 1000.0;

/// Tunables for an [`Animation`](crate::Animation)
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AnimationConfig {
    /// Debounce window for saves, in milliseconds
    #[serde(default = "default_save_delay_ms")]
    pub save_delay_ms: u64,
    /// Duration written to snapshots when no timeline is attached
    #[serde(default = "default_duration")]
    pub default_duration: f32,
    /// Promote the render target to a GPU compositing layer
    #[serde(default = "default_gpu_compositing")]
    pub gpu_compositing: bool,
}

fn default_save_delay_ms() -> u64 {
    100
}

fn default_duration() -> f32 {
    DEFAULT_DURATION
}

fn default_gpu_compositing() -> bool {
    true
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            save_delay_ms: default_save_delay_ms(),
            default_duration: default_duration(),
            gpu_compositing: default_gpu_compositing(),
        }
    }
}

impl AnimationConfig {
    pub fn save_delay(&self) -> Duration {
        Duration::from_millis(self.save_delay_ms)
    }
}
