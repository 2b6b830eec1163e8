//! Persistence collaborator

use crate::snapshot::AnimationSnapshot;
use std::cell::RefCell;
use std::rc::Rc;

/// Destination of debounced saves
///
/// Saving is fire-and-forget: failures are the store's concern.
pub trait AnimationStore {
    fn save_animation(&mut self, snapshot: AnimationSnapshot);
}

impl<T: AnimationStore> AnimationStore for Rc<RefCell<T>> {
    fn save_animation(&mut self, snapshot: AnimationSnapshot) {
        self.borrow_mut().save_animation(snapshot);
    }
}

/// Keeps every saved snapshot in memory
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    saved: Vec<AnimationSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_count(&self) -> usize {
        self.saved.len()
    }

    pub fn last(&self) -> Option<&AnimationSnapshot> {
        self.saved.last()
    }
}

impl AnimationStore for MemoryStore {
    fn save_animation(&mut self, snapshot: AnimationSnapshot) {
        self.saved.push(snapshot);
    }
}
