//! Keyframe bracket lookup
//!
//! Finds the stored keyframes surrounding a query time: either the keyframe
//! sitting exactly at that time, or the pair enclosing it together with the
//! blend factor between them.

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a keyframe stored in an animation
    pub struct KeyframeId;
}

/// Stored keyframes in the neighborhood of a time
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyframeSet {
    /// A keyframe sits exactly at the query time
    Exact(KeyframeId),
    /// The query time falls strictly between two adjacent keyframes
    Between {
        lower: KeyframeId,
        upper: KeyframeId,
        /// `(time - lower.time) / (upper.time - lower.time)`, in `(0, 1)`
        factor: f32,
    },
}

/// Bracket `time` within `order`, which must be sorted ascending by `time_of`
///
/// Returns `None` when there are no keyframes, when `time` is outside
/// `[first.time, last.time]`, or when `time` is not comparable (NaN). Among
/// keyframes sharing the query time the earliest in `order` wins.
pub fn find_keyframe_set<F>(order: &[KeyframeId], time_of: F, time: f32) -> Option<KeyframeSet>
where
    F: Fn(KeyframeId) -> f32,
{
    let first = *order.first()?;
    let last = *order.last()?;

    if !(time_of(first) <= time && time <= time_of(last)) {
        return None;
    }

    // First keyframe strictly after `time`
    let after = order.partition_point(|&id| time_of(id) <= time);
    if after == 0 {
        return None;
    }

    let lower = order[after - 1];
    let lower_time = time_of(lower);
    if lower_time == time {
        let first_at = order.partition_point(|&id| time_of(id) < time);
        return Some(KeyframeSet::Exact(order[first_at]));
    }

    let upper = *order.get(after)?;
    let upper_time = time_of(upper);

    Some(KeyframeSet::Between {
        lower,
        upper,
        factor: (time - lower_time) / (upper_time - lower_time),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn timeline(times: &[f32]) -> (SlotMap<KeyframeId, f32>, Vec<KeyframeId>) {
        let mut map = SlotMap::with_key();
        let order = times.iter().map(|&t| map.insert(t)).collect();
        (map, order)
    }

    #[test]
    fn test_empty_has_no_bracket() {
        let (map, order) = timeline(&[]);
        assert_eq!(find_keyframe_set(&order, |id| map[id], 0.0), None);
    }

    #[test]
    fn test_out_of_range() {
        let (map, order) = timeline(&[2.0, 8.0]);
        assert_eq!(find_keyframe_set(&order, |id| map[id], 1.0), None);
        assert_eq!(find_keyframe_set(&order, |id| map[id], 9.0), None);
        assert_eq!(find_keyframe_set(&order, |id| map[id], f32::NAN), None);
    }

    #[test]
    fn test_exact_match() {
        let (map, order) = timeline(&[0.0, 5.0, 10.0]);
        for (index, time) in [0.0, 5.0, 10.0].into_iter().enumerate() {
            assert_eq!(
                find_keyframe_set(&order, |id| map[id], time),
                Some(KeyframeSet::Exact(order[index]))
            );
        }
    }

    #[test]
    fn test_between_factor() {
        let (map, order) = timeline(&[0.0, 4.0, 12.0]);

        assert_eq!(
            find_keyframe_set(&order, |id| map[id], 1.0),
            Some(KeyframeSet::Between {
                lower: order[0],
                upper: order[1],
                factor: 0.25,
            })
        );
        assert_eq!(
            find_keyframe_set(&order, |id| map[id], 10.0),
            Some(KeyframeSet::Between {
                lower: order[1],
                upper: order[2],
                factor: 0.75,
            })
        );
    }

    #[test]
    fn test_duplicate_times_pick_earliest() {
        let (map, order) = timeline(&[0.0, 5.0, 5.0, 10.0]);
        assert_eq!(
            find_keyframe_set(&order, |id| map[id], 5.0),
            Some(KeyframeSet::Exact(order[1]))
        );
    }

    #[test]
    fn test_single_keyframe() {
        let (map, order) = timeline(&[3.0]);
        assert_eq!(
            find_keyframe_set(&order, |id| map[id], 3.0),
            Some(KeyframeSet::Exact(order[0]))
        );
        assert_eq!(find_keyframe_set(&order, |id| map[id], 3.5), None);
    }
}
