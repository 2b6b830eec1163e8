//! Keyframes: snapshots of every filter's parameters at one point in time

use crate::error::Result;
use crate::filter::Filter;
use crate::filter_list::FilterList;
use crate::values::{FilterValue, Interpolate, KeyframeValue, ParamValue};

/// Filter parameter values at a specific time
///
/// A `generated` keyframe is a transient result of interpolation or boundary
/// cloning and is never stored in an animation.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    pub value: KeyframeValue,
    pub generated: bool,
}

impl Keyframe {
    /// Create a stored keyframe, filling in defaults for filters missing from `value`
    pub fn new(filters: &FilterList, time: f32, mut value: KeyframeValue) -> Self {
        for filter in filters.filters() {
            value
                .entry(filter.name.clone())
                .or_insert_with(|| filter.default_value());
        }
        Self {
            time,
            value,
            generated: false,
        }
    }

    /// Copy of this keyframe's values at another time, marked generated
    pub fn make_generated_clone(&self, time: f32) -> Keyframe {
        Keyframe {
            time,
            value: self.value.clone(),
            generated: true,
        }
    }

    /// Interpolate towards `other` by `factor`, producing a generated keyframe at `time`
    ///
    /// Filters known to only one side keep that side's parameters.
    pub fn blend(&self, other: &Keyframe, factor: f32, time: f32) -> Keyframe {
        let mut value: KeyframeValue = self
            .value
            .iter()
            .map(|(name, params)| {
                let blended = match other.value.get(name) {
                    Some(target) => params.lerp(target, factor),
                    None => params.clone(),
                };
                (name.clone(), blended)
            })
            .collect();

        for (name, params) in &other.value {
            if !value.contains_key(name) {
                value.insert(name.clone(), params.clone());
            }
        }

        Keyframe {
            time,
            value,
            generated: true,
        }
    }

    pub fn filter_value(&self, filter_name: &str) -> Option<&FilterValue> {
        self.value.get(filter_name)
    }

    pub fn add_filter_default_value(&mut self, filter: &Filter) {
        self.value
            .entry(filter.name.clone())
            .or_insert_with(|| filter.default_value());
    }

    pub fn remove_filter_value(&mut self, filter: &Filter) {
        self.value.shift_remove(&filter.name);
    }

    /// Set one parameter after validating it against the filter's kind
    pub fn set_param(&mut self, filter: &Filter, param: &str, value: ParamValue) -> Result<()> {
        let value = filter.check_param(param, value)?;
        self.value
            .entry(filter.name.clone())
            .or_insert_with(|| filter.default_value())
            .insert(param.to_string(), value);
        Ok(())
    }

    /// Overwrite this keyframe's parameters with every parameter in `value`
    pub fn merge(&mut self, value: KeyframeValue) {
        for (name, params) in value {
            self.value.entry(name).or_default().extend(params);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::filter::FilterKind;

    fn sepia_at(list: &FilterList, time: f32, amount: f32) -> Keyframe {
        let mut keyframe = Keyframe::new(list, time, KeyframeValue::new());
        let sepia = list.get("sepia").unwrap();
        keyframe.set_param(sepia, "amount", ParamValue::Number(amount)).unwrap();
        keyframe
    }

    #[test]
    fn test_new_fills_defaults() {
        let list = FilterList::with_kinds([FilterKind::Blur, FilterKind::Opacity]);
        let keyframe = Keyframe::new(&list, 0.0, KeyframeValue::new());

        assert!(!keyframe.generated);
        assert_eq!(keyframe.value["blur"]["radius"], ParamValue::Number(0.0));
        assert_eq!(keyframe.value["opacity"]["amount"], ParamValue::Number(100.0));
    }

    #[test]
    fn test_blend_midpoint() {
        let list = FilterList::with_kinds([FilterKind::Sepia]);
        let a = sepia_at(&list, 0.0, 0.0);
        let b = sepia_at(&list, 10.0, 100.0);

        let mid = a.blend(&b, 0.5, 5.0);
        assert!(mid.generated);
        assert_eq!(mid.time, 5.0);
        assert_eq!(mid.value["sepia"]["amount"], ParamValue::Number(50.0));
    }

    #[test]
    fn test_blend_colors() {
        let list = FilterList::with_kinds([FilterKind::DropShadow]);
        let shadow = list.get("drop-shadow").unwrap();

        let mut a = Keyframe::new(&list, 0.0, KeyframeValue::new());
        a.set_param(shadow, "color", Color::BLACK.into()).unwrap();
        let mut b = Keyframe::new(&list, 1.0, KeyframeValue::new());
        b.set_param(shadow, "color", Color::WHITE.into()).unwrap();

        let mid = a.blend(&b, 0.25, 0.25);
        let color = mid.value["drop-shadow"]["color"].as_color().unwrap();
        assert!(color.approx_eq(&Color::rgb(0.25, 0.25, 0.25), 1e-6));
    }

    #[test]
    fn test_blend_keeps_one_sided_filters() {
        let mut list = FilterList::with_kinds([FilterKind::Sepia]);
        let a = sepia_at(&list, 0.0, 0.0);
        list.add_filter(FilterKind::Blur);
        let b = Keyframe::new(&list, 1.0, KeyframeValue::new());

        let mid = a.blend(&b, 0.5, 0.5);
        assert!(mid.value.contains_key("blur"));
        assert!(mid.value.contains_key("sepia"));
    }

    #[test]
    fn test_generated_clone() {
        let list = FilterList::with_kinds([FilterKind::Sepia]);
        let keyframe = sepia_at(&list, 3.0, 40.0);
        let clone = keyframe.make_generated_clone(8.0);

        assert!(clone.generated);
        assert_eq!(clone.time, 8.0);
        assert_eq!(clone.value, keyframe.value);
    }

    #[test]
    fn test_add_and_remove_filter_value() {
        let mut list = FilterList::with_kinds([FilterKind::Sepia]);
        let mut keyframe = sepia_at(&list, 0.0, 20.0);

        let invert = list.add_filter(FilterKind::Invert).clone();
        keyframe.add_filter_default_value(&invert);
        assert_eq!(keyframe.value["invert"]["amount"], ParamValue::Number(0.0));

        // Existing values are left alone
        let sepia = list.get("sepia").unwrap().clone();
        keyframe.add_filter_default_value(&sepia);
        assert_eq!(keyframe.value["sepia"]["amount"], ParamValue::Number(20.0));

        keyframe.remove_filter_value(&sepia);
        assert!(keyframe.filter_value("sepia").is_none());
    }

    #[test]
    fn test_merge_overwrites_params() {
        let list = FilterList::with_kinds([FilterKind::Sepia, FilterKind::Blur]);
        let mut keyframe = sepia_at(&list, 0.0, 20.0);
        let other = sepia_at(&list, 0.0, 70.0);

        keyframe.merge(other.value);
        assert_eq!(keyframe.value["sepia"]["amount"], ParamValue::Number(70.0));
        assert_eq!(keyframe.value["blur"]["radius"], ParamValue::Number(0.0));
    }
}
