//! Dynamic socket item lists with stable identities

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::graph::GraphError;

/// One dynamic input slot.
///
/// The identifier is generated once when the entry is created and never
/// recomputed; it is what lets the graph recognize the same slot across
/// removals of its neighbors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketItem {
    pub identifier: String,
}

impl SocketItem {
    fn fresh() -> Self {
        Self {
            identifier: Uuid::new_v4().to_string(),
        }
    }
}

/// Append/remove-only list of socket items.
///
/// Order is insertion order modulo explicit removals. Entries are
/// immutable once created; position is always recomputed from the list,
/// never cached.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocketItemList {
    entries: Vec<SocketItem>,
}

impl SocketItemList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fresh entry to the end of the list and returns its
    /// identifier
    pub fn add(&mut self) -> String {
        let item = SocketItem::fresh();
        let identifier = item.identifier.clone();
        self.entries.push(item);
        identifier
    }

    /// Removes the entry at `position`.
    ///
    /// Fails before any mutation if the position is out of range. Later
    /// entries shift down one position and keep their identifiers.
    pub fn remove(&mut self, position: usize) -> Result<SocketItem, GraphError> {
        if position >= self.entries.len() {
            return Err(GraphError::InvalidIndex {
                index: position,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(position))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&SocketItem> {
        self.entries.get(position)
    }

    /// Entries in list order
    pub fn iter(&self) -> std::slice::Iter<'_, SocketItem> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_added_entries_get_distinct_identifiers() {
        let mut items = SocketItemList::new();
        let first = items.add();
        let second = items.add();
        assert_ne!(first, second);
        assert_eq!(items.len(), 2);
        assert_eq!(items.get(0).unwrap().identifier, first);
        assert_eq!(items.get(1).unwrap().identifier, second);
    }

    #[test]
    fn test_removal_shifts_later_entries_without_renaming() {
        let mut items = SocketItemList::new();
        let first = items.add();
        let second = items.add();

        let removed = items.remove(0).unwrap();
        assert_eq!(removed.identifier, first);
        assert_eq!(items.len(), 1);
        assert_eq!(items.get(0).unwrap().identifier, second);
    }

    #[test]
    fn test_out_of_range_removal_leaves_list_unchanged() {
        let mut items = SocketItemList::new();
        let first = items.add();
        let second = items.add();

        let err = items.remove(2).unwrap_err();
        assert_eq!(err, GraphError::InvalidIndex { index: 2, len: 2 });
        assert_eq!(items.len(), 2);
        assert_eq!(items.get(0).unwrap().identifier, first);
        assert_eq!(items.get(1).unwrap().identifier, second);
    }

    #[test]
    fn test_persisted_layout_is_a_list_of_identifiers() {
        let mut items = SocketItemList::new();
        let id = items.add();

        let json = serde_json::to_value(&items).unwrap();
        assert_eq!(json, serde_json::json!([{ "identifier": id }]));

        let parsed: SocketItemList = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, items);
    }
}
