//! The set of filters applied to the target element

use crate::error::{FilterError, Result};
use crate::filter::{Filter, FilterKind};
use crate::keyframe::Keyframe;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Serialized form of a filter inside an animation snapshot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl From<&Filter> for FilterEntry {
    fn from(filter: &Filter) -> Self {
        Self {
            name: filter.name.clone(),
            kind: filter.kind.type_name().to_string(),
            active: filter.active,
        }
    }
}

/// Ordered list of known filters plus the keyframe currently rendered through them
#[derive(Clone, Debug, Default)]
pub struct FilterList {
    filters: Vec<Filter>,
    source: Option<Keyframe>,
}

impl FilterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list holding one filter per kind, in order
    pub fn with_kinds(kinds: impl IntoIterator<Item = FilterKind>) -> Self {
        let mut list = Self::new();
        for kind in kinds {
            list.add_filter(kind);
        }
        list
    }

    /// Every known filter, active or not
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Filters that contribute to the rendered output
    pub fn active_filters(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter().filter(|filter| filter.active)
    }

    pub fn get(&self, name: &str) -> Option<&Filter> {
        self.filters.iter().find(|filter| filter.name == name)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Select the keyframe whose values are shown by the filter widgets
    pub fn set_source(&mut self, keyframe: &Keyframe) {
        self.source = Some(keyframe.clone());
    }

    pub fn source(&self) -> Option<&Keyframe> {
        self.source.as_ref()
    }

    /// Append a filter of the given kind under a fresh unique name
    pub fn add_filter(&mut self, kind: FilterKind) -> &Filter {
        let name = self.unique_name(kind);
        debug!("Adding filter {} ({})", name, kind);
        self.filters.push(Filter::new(name, kind));
        &self.filters[self.filters.len() - 1]
    }

    pub fn remove_filter(&mut self, name: &str) -> Result<Filter> {
        let index = self
            .filters
            .iter()
            .position(|filter| filter.name == name)
            .ok_or_else(|| FilterError::UnknownFilter(name.to_string()))?;
        Ok(self.filters.remove(index))
    }

    pub fn set_active(&mut self, name: &str, active: bool) -> Result<&Filter> {
        let filter = self
            .filters
            .iter_mut()
            .find(|filter| filter.name == name)
            .ok_or_else(|| FilterError::UnknownFilter(name.to_string()))?;
        filter.active = active;
        Ok(&*filter)
    }

    /// Replace the whole filter set
    ///
    /// Every entry is validated before anything changes, so a failed reload
    /// leaves the list untouched.
    pub fn reload(&mut self, entries: &[FilterEntry]) -> Result<()> {
        let filters = entries
            .iter()
            .map(|entry| {
                let kind = FilterKind::from_type_name(&entry.kind)?;
                Ok(Filter {
                    name: entry.name.clone(),
                    kind,
                    active: entry.active,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Reloaded {} filters", filters.len());
        self.filters = filters;
        self.source = None;
        Ok(())
    }

    /// Serializable description of every filter
    pub fn entries(&self) -> Vec<FilterEntry> {
        self.filters.iter().map(FilterEntry::from).collect()
    }

    fn unique_name(&self, kind: FilterKind) -> String {
        let base = kind.type_name();
        if self.get(base).is_none() {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{}-{}", base, n))
            .find(|name| self.get(name).is_none())
            .unwrap_or_else(|| base.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_names() {
        let mut list = FilterList::new();
        assert_eq!(list.add_filter(FilterKind::Blur).name, "blur");
        assert_eq!(list.add_filter(FilterKind::Blur).name, "blur-2");
        assert_eq!(list.add_filter(FilterKind::Sepia).name, "sepia");
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_active_filters() {
        let mut list = FilterList::with_kinds([FilterKind::Blur, FilterKind::Invert]);
        list.set_active("blur", false).unwrap();

        let active: Vec<_> = list.active_filters().map(|f| f.name.as_str()).collect();
        assert_eq!(active, vec!["invert"]);
        assert!(list.set_active("missing", true).is_err());
    }

    #[test]
    fn test_reload_is_all_or_nothing() {
        let mut list = FilterList::with_kinds([FilterKind::Blur]);
        let entries = vec![
            FilterEntry {
                name: "sepia".into(),
                kind: "sepia".into(),
                active: true,
            },
            FilterEntry {
                name: "shader".into(),
                kind: "custom".into(),
                active: true,
            },
        ];

        assert_eq!(
            list.reload(&entries),
            Err(FilterError::UnknownType("custom".into()))
        );
        assert_eq!(list.filters()[0].name, "blur");

        list.reload(&entries[..1]).unwrap();
        assert_eq!(list.entries(), entries[..1].to_vec());
    }

    #[test]
    fn test_entry_serde_uses_type_key() {
        let entry: FilterEntry =
            serde_json::from_str(r#"{"name": "blur", "type": "blur"}"#).unwrap();
        assert!(entry.active);
        assert_eq!(entry.kind, "blur");
    }
}
