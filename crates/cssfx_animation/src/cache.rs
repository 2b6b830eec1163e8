//! Cached effective keyframe
//!
//! The animation keeps the bracket and the effective keyframe for its current
//! time in a [`FrameCache`]. Every mutation resets it to `Stale`; an update
//! cycle recomputes it for exactly one time.

use crate::lookup::{KeyframeId, KeyframeSet};
use cssfx_core::Keyframe;

/// Identity of an effective keyframe
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameRef {
    /// A keyframe stored in the animation
    Stored(KeyframeId),
    /// A generated keyframe; each one is a distinct frame
    Generated { time: f32 },
}

impl FrameRef {
    /// Whether moving from `previous` to `self` selects a new frame
    pub fn differs_from(&self, previous: Option<FrameRef>) -> bool {
        match (self, previous) {
            (FrameRef::Stored(a), Some(FrameRef::Stored(b))) => *a != b,
            _ => true,
        }
    }
}

/// The keyframe in effect at some time
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedKeyframe {
    Stored(KeyframeId),
    Generated(Keyframe),
}

impl ResolvedKeyframe {
    pub fn frame_ref(&self) -> FrameRef {
        match self {
            ResolvedKeyframe::Stored(id) => FrameRef::Stored(*id),
            ResolvedKeyframe::Generated(keyframe) => FrameRef::Generated {
                time: keyframe.time,
            },
        }
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) enum FrameCache {
    #[default]
    Stale,
    Fresh {
        time: f32,
        set: Option<KeyframeSet>,
        current: ResolvedKeyframe,
    },
}

impl FrameCache {
    pub(crate) fn invalidate(&mut self) {
        *self = FrameCache::Stale;
    }

    /// Cached bracket and keyframe, only if computed for exactly `time`
    pub(crate) fn at(&self, time: f32) -> Option<(Option<KeyframeSet>, &ResolvedKeyframe)> {
        match self {
            FrameCache::Fresh {
                time: cached,
                set,
                current,
            } if *cached == time => Some((*set, current)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_generated_frames_always_differ() {
        let generated = FrameRef::Generated { time: 2.0 };
        assert!(generated.differs_from(Some(generated)));
        assert!(generated.differs_from(None));
    }

    #[test]
    fn test_stored_frames_compare_by_id() {
        let mut ids: SlotMap<KeyframeId, ()> = SlotMap::with_key();
        let a = ids.insert(());
        let b = ids.insert(());

        assert!(!FrameRef::Stored(a).differs_from(Some(FrameRef::Stored(a))));
        assert!(FrameRef::Stored(a).differs_from(Some(FrameRef::Stored(b))));
    }

    #[test]
    fn test_cache_matches_exact_time_only() {
        let mut ids: SlotMap<KeyframeId, ()> = SlotMap::with_key();
        let id = ids.insert(());
        let mut cache = FrameCache::Fresh {
            time: 4.0,
            set: Some(KeyframeSet::Exact(id)),
            current: ResolvedKeyframe::Stored(id),
        };

        assert!(cache.at(4.0).is_some());
        assert!(cache.at(4.5).is_none());

        cache.invalidate();
        assert!(cache.at(4.0).is_none());
    }
}
