//! The keyframed filter animation
//!
//! [`Animation`] owns the stored keyframes of one target element, tracks the
//! current playback time and keeps the live preview in sync: after every
//! change it resolves the effective keyframe (an exact keyframe, a blend of
//! the two surrounding keyframes, or a clone of the nearest boundary), renders
//! it through the filter list onto the render target and regenerates the code
//! previews. Edits schedule a debounced save on the attached store.

use crate::cache::{FrameCache, FrameRef, ResolvedKeyframe};
use crate::config::AnimationConfig;
use crate::error::{AnimationError, Result};
use crate::lookup::{find_keyframe_set, KeyframeId, KeyframeSet};
use crate::render::{CodePanel, CodePreview, RenderTarget, NO_ANIMATION_TEXT, NO_FILTERS_TEXT};
use crate::save::{Clock, SaveGuard, SaveScheduler, SystemClock};
use crate::snapshot::{AnimationSnapshot, KeyframeEntry};
use crate::store::AnimationStore;
use crate::timeline::Timeline;
use cssfx_core::{
    CodeStyle, Filter, FilterError, FilterKind, FilterList, HighlightedCss, Keyframe,
    KeyframeValue, ParamValue, PlainCss,
};
use slotmap::SlotMap;
use std::borrow::Cow;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Outcome of [`Animation::toggle_keyframe`]
#[derive(Clone, Debug, PartialEq)]
pub enum KeyframeToggle {
    /// A generated keyframe was promoted to a stored one
    Created(KeyframeId),
    /// The stored keyframe at the current time was removed
    Removed(Keyframe),
}

/// Keyframed filter animation bound to one render target
pub struct Animation {
    config: AnimationConfig,
    filter_list: FilterList,
    keyframes: SlotMap<KeyframeId, Keyframe>,
    /// Stored keyframes sorted ascending by time
    order: Vec<KeyframeId>,
    /// Defaults for every known filter, used when there are no keyframes
    default_keyframe: Keyframe,
    current_time: f32,
    /// Duration reported when no timeline is attached
    duration: f32,
    cache: FrameCache,
    /// Frame last reported to the timeline
    selection: Option<FrameRef>,
    target: Box<dyn RenderTarget>,
    timeline: Option<Box<dyn Timeline>>,
    store: Option<Box<dyn AnimationStore>>,
    code_panel: Option<Box<dyn CodePanel>>,
    code_style: Box<dyn CodeStyle>,
    clock: Rc<dyn Clock>,
    saves: SaveScheduler,
    filter_css: String,
    preview: CodePreview,
}

impl Animation {
    pub fn new(filter_list: FilterList, target: impl RenderTarget + 'static) -> Self {
        Self::with_config(filter_list, target, AnimationConfig::default())
    }

    pub fn with_config(
        filter_list: FilterList,
        target: impl RenderTarget + 'static,
        config: AnimationConfig,
    ) -> Self {
        let mut target: Box<dyn RenderTarget> = Box::new(target);
        target.set_compositing_hint(config.gpu_compositing);

        let mut animation = Self {
            saves: SaveScheduler::new(config.save_delay()),
            duration: config.default_duration,
            config,
            default_keyframe: Keyframe::new(&FilterList::new(), 0.0, KeyframeValue::new()),
            filter_list,
            keyframes: SlotMap::with_key(),
            order: Vec::new(),
            current_time: 0.0,
            cache: FrameCache::Stale,
            selection: None,
            target,
            timeline: None,
            store: None,
            code_panel: None,
            code_style: Box::new(HighlightedCss),
            clock: Rc::new(SystemClock),
            filter_css: String::new(),
            preview: CodePreview::default(),
        };

        animation.compute_default_keyframe();
        animation.update();
        animation
    }

    /// Use another clock for save debouncing
    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use another formatting style for the code previews
    pub fn with_code_style(mut self, style: impl CodeStyle + 'static) -> Self {
        self.code_style = Box::new(style);
        self.update();
        self
    }

    // ========================================================================
    // Collaborators
    // ========================================================================

    pub fn attach_timeline(&mut self, timeline: impl Timeline + 'static) {
        self.timeline = Some(Box::new(timeline));
        self.selection = None;
        self.update();
    }

    pub fn attach_store(&mut self, store: impl AnimationStore + 'static) {
        self.store = Some(Box::new(store));
    }

    /// Detach the store, dropping any pending save
    pub fn detach_store(&mut self) -> Option<Box<dyn AnimationStore>> {
        self.saves.take_pending();
        self.store.take()
    }

    pub fn attach_code_panel(&mut self, panel: impl CodePanel + 'static) {
        self.code_panel = Some(Box::new(panel));
        self.update();
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn filter_list(&self) -> &FilterList {
        &self.filter_list
    }

    pub fn default_keyframe(&self) -> &Keyframe {
        &self.default_keyframe
    }

    /// Stored keyframes in time order
    pub fn keyframes(&self) -> impl Iterator<Item = (KeyframeId, &Keyframe)> + '_ {
        self.order.iter().map(move |&id| (id, &self.keyframes[id]))
    }

    pub fn keyframe_ids(&self) -> &[KeyframeId] {
        &self.order
    }

    pub fn keyframe(&self, id: KeyframeId) -> Option<&Keyframe> {
        self.keyframes.get(id)
    }

    pub fn keyframe_count(&self) -> usize {
        self.order.len()
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Last time shown on the timeline, or the last keyframe's time
    pub fn max_time(&self) -> f32 {
        if let Some(timeline) = &self.timeline {
            return timeline.max_time();
        }
        match self.order.last() {
            Some(&last) => self.keyframes[last].time,
            None => 1.0,
        }
    }

    /// Filter value last applied to the render target
    pub fn filter_css(&self) -> &str {
        &self.filter_css
    }

    pub fn code_preview(&self) -> &CodePreview {
        &self.preview
    }

    /// The frame currently selected
    pub fn current_frame(&self) -> Option<FrameRef> {
        self.selection
    }

    pub fn has_pending_save(&self) -> bool {
        self.saves.is_pending()
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    fn compute_keyframe_set(&self, time: f32) -> Option<KeyframeSet> {
        find_keyframe_set(&self.order, |id| self.keyframes[id].time, time)
    }

    /// Stored keyframes surrounding `time`, reusing the cache when it is fresh for `time`
    pub fn keyframe_set_at(&self, time: f32) -> Option<KeyframeSet> {
        match self.cache.at(time) {
            Some((set, _)) => set,
            None => self.compute_keyframe_set(time),
        }
    }

    pub fn current_keyframe_set(&self) -> Option<KeyframeSet> {
        self.keyframe_set_at(self.current_time)
    }

    /// Resolve the keyframe in effect at `time`
    ///
    /// A NaN `time` resolves to a generated clone of the default keyframe.
    pub fn calculate_keyframe(&self, time: f32) -> ResolvedKeyframe {
        self.resolve_set(time, self.keyframe_set_at(time))
    }

    fn resolve_set(&self, time: f32, set: Option<KeyframeSet>) -> ResolvedKeyframe {
        match set {
            Some(KeyframeSet::Exact(id)) => ResolvedKeyframe::Stored(id),
            Some(KeyframeSet::Between {
                lower,
                upper,
                factor,
            }) => ResolvedKeyframe::Generated(self.keyframes[lower].blend(
                &self.keyframes[upper],
                factor,
                time,
            )),
            None if time.is_nan() => {
                ResolvedKeyframe::Generated(self.default_keyframe.make_generated_clone(time))
            }
            None => {
                let (Some(&first), Some(&last)) = (self.order.first(), self.order.last()) else {
                    return ResolvedKeyframe::Generated(
                        self.default_keyframe.make_generated_clone(time),
                    );
                };

                let first = &self.keyframes[first];
                if first.time > time {
                    return ResolvedKeyframe::Generated(first.make_generated_clone(time));
                }

                let last = &self.keyframes[last];
                if last.time < time {
                    return ResolvedKeyframe::Generated(last.make_generated_clone(time));
                }

                unreachable!(
                    "no keyframe bracket for time {} within [{}, {}]",
                    time, first.time, last.time
                );
            }
        }
    }

    fn resolved<'a>(&'a self, resolved: &'a ResolvedKeyframe) -> &'a Keyframe {
        match resolved {
            ResolvedKeyframe::Stored(id) => &self.keyframes[*id],
            ResolvedKeyframe::Generated(keyframe) => keyframe,
        }
    }

    fn current_resolved(&self) -> ResolvedKeyframe {
        match self.cache.at(self.current_time) {
            Some((_, current)) => current.clone(),
            None => self.calculate_keyframe(self.current_time),
        }
    }

    /// The keyframe in effect at `time`
    pub fn keyframe_at(&self, time: f32) -> Cow<'_, Keyframe> {
        if let Some((_, current)) = self.cache.at(time) {
            return Cow::Borrowed(self.resolved(current));
        }
        match self.calculate_keyframe(time) {
            ResolvedKeyframe::Stored(id) => Cow::Borrowed(&self.keyframes[id]),
            ResolvedKeyframe::Generated(keyframe) => Cow::Owned(keyframe),
        }
    }

    /// The keyframe in effect at the current time
    pub fn current_keyframe(&self) -> Cow<'_, Keyframe> {
        self.keyframe_at(self.current_time)
    }

    /// Nearest stored keyframe strictly before the current time
    pub fn prev_keyframe(&self) -> Option<KeyframeId> {
        let (&first, &last) = (self.order.first()?, self.order.last()?);
        let time = self.current_time;

        if time <= self.keyframes[first].time {
            return None;
        }
        if time > self.keyframes[last].time {
            return Some(last);
        }

        match self.current_keyframe_set()? {
            KeyframeSet::Between { lower, .. } => Some(lower),
            KeyframeSet::Exact(id) => {
                let index = self.order.iter().position(|&k| k == id)?;
                index.checked_sub(1).map(|prev| self.order[prev])
            }
        }
    }

    /// Nearest stored keyframe strictly after the current time
    pub fn next_keyframe(&self) -> Option<KeyframeId> {
        let (&first, &last) = (self.order.first()?, self.order.last()?);
        let time = self.current_time;

        if time >= self.keyframes[last].time {
            return None;
        }
        if time < self.keyframes[first].time {
            return Some(first);
        }

        match self.current_keyframe_set()? {
            KeyframeSet::Between { upper, .. } => Some(upper),
            KeyframeSet::Exact(id) => {
                let index = self.order.iter().position(|&k| k == id)?;
                self.order.get(index + 1).copied()
            }
        }
    }

    // ========================================================================
    // Time & update cycle
    // ========================================================================

    pub fn set_current_time(&mut self, time: f32) {
        if !time.is_finite() {
            warn!("Ignoring non-finite animation time {}", time);
            return;
        }
        if time < 0.0 {
            warn!("Clamping negative animation time {} to 0", time);
        }
        self.current_time = time.max(0.0);
        self.update();
    }

    /// Jump to the time of a stored keyframe
    pub fn set_active_keyframe(&mut self, id: KeyframeId) -> Result<()> {
        let time = self
            .keyframes
            .get(id)
            .ok_or(AnimationError::KeyframeNotFound(id))?
            .time;
        self.set_current_time(time);
        Ok(())
    }

    /// Recompute the effective keyframe and refresh every output
    pub fn update(&mut self) {
        self.update_cached_values();
        self.update_filters();

        let time = self.current_time;
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.on_time_updated(time);
        }
    }

    fn update_cached_values(&mut self) {
        let time = self.current_time;
        let set = self.compute_keyframe_set(time);
        let current = self.resolve_set(time, set);
        trace!("Update at {}: {:?}", time, set);

        let keyframe = match &current {
            ResolvedKeyframe::Stored(id) => &self.keyframes[*id],
            ResolvedKeyframe::Generated(keyframe) => keyframe,
        };
        self.filter_list.set_source(keyframe);

        let frame = current.frame_ref();
        let previous = self.selection.replace(frame);
        self.cache = FrameCache::Fresh { time, set, current };

        if frame.differs_from(previous) {
            if let Some(timeline) = self.timeline.as_mut() {
                timeline.on_new_frame_selected(frame, previous);
            }
        }
    }

    fn update_filters(&mut self) {
        let (css, filter_code, animation_code) = {
            let keyframe = self.current_keyframe();
            let css = self.filters_for_keyframe(&keyframe, &PlainCss).join(" ");

            let filters = self.filters_for_keyframe(&keyframe, self.code_style.as_ref());
            let filter_code = if filters.is_empty() {
                NO_FILTERS_TEXT.to_string()
            } else {
                filters.join("<br />")
            };

            let stops = self.compute_animation_code(self.code_style.as_ref());
            let animation_code = if stops.is_empty() {
                NO_ANIMATION_TEXT.to_string()
            } else {
                stops.join("")
            };

            (css, filter_code, animation_code)
        };

        self.target.set_filter(&css);
        if let Some(panel) = self.code_panel.as_mut() {
            panel.show_filter_code(&filter_code);
            panel.show_animation_code(&animation_code);
        }

        self.filter_css = css;
        self.preview = CodePreview {
            filter_code,
            animation_code,
        };
    }

    /// CSS fragments of every active filter for a keyframe
    pub fn filters_for_keyframe(&self, keyframe: &Keyframe, style: &dyn CodeStyle) -> Vec<String> {
        self.filter_list
            .active_filters()
            .map(|filter| filter.generate_code(keyframe.filter_value(&filter.name), style))
            .collect()
    }

    /// CSS fragments of every active filter at `time`
    pub fn filters_at_time(&self, time: f32, style: &dyn CodeStyle) -> Vec<String> {
        let keyframe = self.keyframe_at(time);
        self.filters_for_keyframe(&keyframe, style)
    }

    /// One `@keyframes` stop per stored keyframe, positioned in percent of `max_time`
    pub fn compute_animation_code(&self, style: &dyn CodeStyle) -> Vec<String> {
        let max_time = self.max_time().max(1.0);
        self.keyframes()
            .map(|(_, keyframe)| {
                let percent = format!("{}%", (keyframe.time / max_time * 100.0).floor());
                style.keyframe(&percent, &self.filters_for_keyframe(keyframe, style))
            })
            .collect()
    }

    // ========================================================================
    // Keyframe CRUD
    // ========================================================================

    fn check_time(time: f32) -> Result<()> {
        if !time.is_finite() || time < 0.0 {
            return Err(AnimationError::InvalidTime(time));
        }
        Ok(())
    }

    fn sort_keyframes(&mut self) {
        let keyframes = &self.keyframes;
        self.order
            .sort_by(|a, b| keyframes[*a].time.total_cmp(&keyframes[*b].time));
    }

    fn changed(&mut self) {
        self.cache.invalidate();
        self.update();
        self.save_animation();
    }

    /// Store a keyframe built from `value`
    ///
    /// Creating a keyframe at a time that already holds one merges `value`
    /// into the existing keyframe and returns its id.
    pub fn create_keyframe(&mut self, time: f32, value: KeyframeValue) -> Result<KeyframeId> {
        Self::check_time(time)?;

        let existing = self
            .order
            .iter()
            .copied()
            .find(|&id| self.keyframes[id].time == time);
        if let Some(id) = existing {
            debug!("Merging into existing keyframe at {}", time);
            self.keyframes[id].merge(value);
            self.changed();
            return Ok(id);
        }

        let id = self
            .keyframes
            .insert(Keyframe::new(&self.filter_list, time, value));
        self.order.push(id);
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.on_keyframe_created(id, &self.keyframes[id]);
        }
        self.sort_keyframes();
        debug!("Created keyframe at {} ({} stored)", time, self.order.len());

        self.changed();
        Ok(id)
    }

    pub fn remove_keyframe(&mut self, id: KeyframeId) -> Option<Keyframe> {
        let index = self.order.iter().position(|&k| k == id)?;
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.on_keyframe_removed(id, &self.keyframes[id]);
        }
        self.order.remove(index);
        let removed = self.keyframes.remove(id);
        debug!("Removed keyframe ({} stored)", self.order.len());

        self.changed();
        removed
    }

    /// Promote the generated keyframe at the current time, or remove the stored one
    pub fn toggle_keyframe(&mut self) -> Result<KeyframeToggle> {
        match self.current_resolved() {
            ResolvedKeyframe::Generated(keyframe) => self
                .create_keyframe(keyframe.time, keyframe.value)
                .map(KeyframeToggle::Created),
            ResolvedKeyframe::Stored(id) => self
                .remove_keyframe(id)
                .map(KeyframeToggle::Removed)
                .ok_or(AnimationError::KeyframeNotFound(id)),
        }
    }

    /// Edit one parameter of the keyframe in effect at the current time
    ///
    /// A generated keyframe is promoted to a stored keyframe carrying the edit.
    pub fn set_param(&mut self, filter_name: &str, param: &str, value: ParamValue) -> Result<()> {
        let filter = self
            .filter_list
            .get(filter_name)
            .cloned()
            .ok_or_else(|| FilterError::UnknownFilter(filter_name.to_string()))?;

        match self.current_resolved() {
            ResolvedKeyframe::Generated(mut keyframe) => {
                keyframe.set_param(&filter, param, value)?;
                self.create_keyframe(keyframe.time, keyframe.value)?;
            }
            ResolvedKeyframe::Stored(id) => {
                self.keyframes
                    .get_mut(id)
                    .ok_or(AnimationError::KeyframeNotFound(id))?
                    .set_param(&filter, param, value)?;
                self.changed();
            }
        }
        Ok(())
    }

    /// Remove every keyframe, notifying the timeline of each removal
    pub fn reset(&mut self) {
        if let Some(timeline) = self.timeline.as_mut() {
            for &id in &self.order {
                timeline.on_keyframe_removed(id, &self.keyframes[id]);
            }
        }
        debug!("Reset animation ({} keyframes removed)", self.order.len());
        self.order.clear();
        self.keyframes.clear();

        self.changed();
    }

    // ========================================================================
    // Filter set maintenance
    // ========================================================================

    fn compute_default_keyframe(&mut self) {
        self.default_keyframe = Keyframe::new(&FilterList::new(), 0.0, KeyframeValue::new());
        let filters = self.filter_list.filters().to_vec();
        for filter in &filters {
            self.add_filter_default_values(filter);
        }
    }

    /// Give every keyframe default values for a newly known filter
    pub fn add_filter_default_values(&mut self, filter: &Filter) {
        for keyframe in self.keyframes.values_mut() {
            keyframe.add_filter_default_value(filter);
        }
        self.default_keyframe.add_filter_default_value(filter);
        self.cache.invalidate();
        self.save_animation();
    }

    /// Drop a filter's values from every keyframe
    pub fn remove_filter_value(&mut self, filter: &Filter) {
        for keyframe in self.keyframes.values_mut() {
            keyframe.remove_filter_value(filter);
        }
        self.default_keyframe.remove_filter_value(filter);
        self.cache.invalidate();
        self.save_animation();
    }

    /// Re-render and save after a filter was added, removed or toggled
    pub fn on_filter_state_change(&mut self) {
        self.changed();
    }

    /// Add a filter of `kind`, returning its generated name
    pub fn add_filter(&mut self, kind: FilterKind) -> String {
        let filter = self.filter_list.add_filter(kind).clone();
        self.add_filter_default_values(&filter);
        self.on_filter_state_change();
        filter.name
    }

    pub fn remove_filter(&mut self, name: &str) -> Result<Filter> {
        let filter = self.filter_list.remove_filter(name)?;
        self.remove_filter_value(&filter);
        self.on_filter_state_change();
        Ok(filter)
    }

    pub fn set_filter_active(&mut self, name: &str, active: bool) -> Result<()> {
        self.filter_list.set_active(name, active)?;
        self.on_filter_state_change();
        Ok(())
    }

    // ========================================================================
    // Saving
    // ========================================================================

    /// Arm the debounced save, unless no store is attached or saves are suppressed
    pub fn save_animation(&mut self) {
        if self.store.is_none() {
            return;
        }
        if self.saves.request(self.clock.now()) {
            trace!("Save scheduled in {:?}", self.config.save_delay());
        }
    }

    /// Suppress saves until the returned guard is dropped
    ///
    /// Any pending save is cancelled.
    pub fn ignore_saves(&mut self) -> SaveGuard {
        self.saves.suppress()
    }

    /// Fire the pending save if its deadline has passed
    pub fn poll_saves(&mut self) -> bool {
        let now = self.clock.now();
        if self.store.is_some() && self.saves.take_due(now) {
            self.fire_save();
            return true;
        }
        false
    }

    /// Fire the pending save immediately
    pub fn flush_saves(&mut self) -> bool {
        if self.store.is_some() && self.saves.take_pending() {
            self.fire_save();
            return true;
        }
        false
    }

    fn fire_save(&mut self) {
        let snapshot = self.dump_animation();
        debug!("Saving animation ({} keyframes)", snapshot.keyframes.len());
        if let Some(store) = self.store.as_mut() {
            store.save_animation(snapshot);
        }
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub fn dump_animation(&self) -> AnimationSnapshot {
        AnimationSnapshot {
            filters: self.filter_list.entries(),
            keyframes: self
                .keyframes()
                .map(|(_, keyframe)| KeyframeEntry {
                    time: keyframe.time,
                    value: keyframe.value.clone(),
                })
                .collect(),
            duration: match &self.timeline {
                Some(timeline) => timeline.duration(),
                None => self.duration,
            },
        }
    }

    /// Replace the whole animation with a snapshot
    ///
    /// The snapshot is validated first; on error nothing changes. No save is
    /// requested while loading.
    pub fn load_animation(&mut self, snapshot: &AnimationSnapshot) -> Result<()> {
        for entry in &snapshot.filters {
            FilterKind::from_type_name(&entry.kind)?;
        }
        for entry in &snapshot.keyframes {
            Self::check_time(entry.time)?;
        }

        let guard = self.ignore_saves();
        self.reset();
        self.filter_list.reload(&snapshot.filters)?;
        self.compute_default_keyframe();
        for entry in &snapshot.keyframes {
            self.create_keyframe(entry.time, entry.value.clone())?;
        }
        self.duration = snapshot.duration;
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.reset_duration(snapshot.duration);
        }
        drop(guard);

        debug!(
            "Loaded animation: {} filters, {} keyframes",
            self.filter_list.len(),
            self.order.len()
        );
        self.update();
        Ok(())
    }

    pub fn load_empty_animation(&mut self) -> Result<()> {
        let snapshot = AnimationSnapshot {
            duration: self.config.default_duration,
            ..AnimationSnapshot::default()
        };
        self.load_animation(&snapshot)
    }
}
