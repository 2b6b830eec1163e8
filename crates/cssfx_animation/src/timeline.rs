//! Timeline collaborator
//!
//! A timeline visualizes the keyframes of an animation and owns its total
//! duration. The animation notifies it about keyframe lifecycle events and
//! selection changes.

use crate::cache::FrameRef;
use crate::lookup::KeyframeId;
use cssfx_core::Keyframe;
use std::cell::RefCell;
use std::rc::Rc;

/// Receiver of keyframe lifecycle notifications
pub trait Timeline {
    /// Largest time shown on the timeline
    fn max_time(&self) -> f32;

    /// Total animation duration
    fn duration(&self) -> f32;

    /// The effective keyframe changed identity
    fn on_new_frame_selected(&mut self, current: FrameRef, previous: Option<FrameRef>);

    /// An update cycle finished at `time`
    fn on_time_updated(&mut self, time: f32);

    fn on_keyframe_created(&mut self, id: KeyframeId, keyframe: &Keyframe);

    fn on_keyframe_removed(&mut self, id: KeyframeId, keyframe: &Keyframe);

    fn reset_duration(&mut self, duration: f32);
}

impl<T: Timeline> Timeline for Rc<RefCell<T>> {
    fn max_time(&self) -> f32 {
        self.borrow().max_time()
    }

    fn duration(&self) -> f32 {
        self.borrow().duration()
    }

    fn on_new_frame_selected(&mut self, current: FrameRef, previous: Option<FrameRef>) {
        self.borrow_mut().on_new_frame_selected(current, previous);
    }

    fn on_time_updated(&mut self, time: f32) {
        self.borrow_mut().on_time_updated(time);
    }

    fn on_keyframe_created(&mut self, id: KeyframeId, keyframe: &Keyframe) {
        self.borrow_mut().on_keyframe_created(id, keyframe);
    }

    fn on_keyframe_removed(&mut self, id: KeyframeId, keyframe: &Keyframe) {
        self.borrow_mut().on_keyframe_removed(id, keyframe);
    }

    fn reset_duration(&mut self, duration: f32) {
        self.borrow_mut().reset_duration(duration);
    }
}

/// Plain timeline state: duration, keyframe markers and the selected frame
#[derive(Clone, Debug)]
pub struct TimelineModel {
    duration: f32,
    markers: Vec<(KeyframeId, f32)>,
    selected: Option<FrameRef>,
    time: f32,
}

impl TimelineModel {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            markers: Vec::new(),
            selected: None,
            time: 0.0,
        }
    }

    /// Keyframe markers sorted by time
    pub fn markers(&self) -> &[(KeyframeId, f32)] {
        &self.markers
    }

    pub fn selected(&self) -> Option<FrameRef> {
        self.selected
    }

    /// Time of the last update cycle
    pub fn time(&self) -> f32 {
        self.time
    }
}

impl Default for TimelineModel {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_DURATION)
    }
}

impl Timeline for TimelineModel {
    fn max_time(&self) -> f32 {
        self.duration
    }

    fn duration(&self) -> f32 {
        self.duration
    }

    fn on_new_frame_selected(&mut self, current: FrameRef, _previous: Option<FrameRef>) {
        self.selected = Some(current);
    }

    fn on_time_updated(&mut self, time: f32) {
        self.time = time;
    }

    fn on_keyframe_created(&mut self, id: KeyframeId, keyframe: &Keyframe) {
        self.markers.push((id, keyframe.time));
        self.markers.sort_by(|a, b| a.1.total_cmp(&b.1));
    }

    fn on_keyframe_removed(&mut self, id: KeyframeId, _keyframe: &Keyframe) {
        self.markers.retain(|(marker, _)| *marker != id);
    }

    fn reset_duration(&mut self, duration: f32) {
        self.duration = duration;
    }
}
