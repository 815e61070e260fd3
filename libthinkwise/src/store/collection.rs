//! Id-keyed collection that keeps insertion order for display

use serde::{Deserialize, Serialize};

use crate::types::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list, keeping the first entry of any repeated id
    pub fn from_items(items: Vec<T>) -> Self {
        items
            .into_iter()
            .fold(Self::new(), |collection, item| collection.added(item).0)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Append `item`. A repeated id leaves the collection as it was; the
    /// flag reports whether the item went in.
    pub fn added(mut self, item: T) -> (Self, bool) {
        if self.contains(item.id()) {
            return (self, false);
        }
        self.items.push(item);
        (self, true)
    }

    /// Replace the entry with the same id; no-op when there is none
    pub fn updated(mut self, item: T) -> Self {
        if let Some(slot) = self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            *slot = item;
        }
        self
    }

    /// Drop the entry with `id`; no-op when there is none
    pub fn removed(mut self, id: &str) -> Self {
        self.items.retain(|item| item.id() != id);
        self
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        label: &'static str,
    }

    impl Entity for Item {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, label: &'static str) -> Item {
        Item {
            id: id.to_string(),
            label,
        }
    }

    #[test]
    fn test_add_preserves_order() {
        let (c, _) = Collection::new().added(item("b", "first"));
        let (c, _) = c.added(item("a", "second"));
        let ids: Vec<&str> = c.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_add_rejects_repeated_id() {
        let (c, inserted) = Collection::new().added(item("a", "original"));
        assert!(inserted);
        let (c, inserted) = c.added(item("a", "impostor"));
        assert!(!inserted);
        assert_eq!(c.len(), 1);
        assert_eq!(c.get("a").unwrap().label, "original");
    }

    #[test]
    fn test_update_replaces_in_place() {
        let c = Collection::from_items(vec![item("a", "1"), item("b", "2"), item("c", "3")]);
        let c = c.updated(item("b", "two"));
        let labels: Vec<&str> = c.iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["1", "two", "3"]);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let before = Collection::from_items(vec![item("a", "1")]);
        let after = before.clone().updated(item("zzz", "ghost"));
        assert_eq!(after, before);
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let c = Collection::from_items(vec![item("a", "1"), item("b", "2")]);
        let once = c.removed("a");
        let twice = once.clone().removed("a");
        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn test_from_items_keeps_first_duplicate() {
        let c = Collection::from_items(vec![item("a", "1"), item("a", "2")]);
        assert_eq!(c.len(), 1);
        assert_eq!(c.get("a").unwrap().label, "1");
    }
}
