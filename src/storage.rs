/// Persisted group list for chrome.storage.local

use crate::tab_data::TabGroup;
use serde::{Deserialize, Serialize};

/// Single key holding the entire persisted state
pub const STORAGE_KEY: &str = "tabGroups";

/// Every saved group, oldest first. Serializes transparently, so the
/// stored value is a bare array of groups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct GroupList {
    pub groups: Vec<TabGroup>,
}

impl GroupList {
    pub fn new() -> Self {
        GroupList { groups: Vec::new() }
    }

    /// Append a group; save order is display order and is never re-sorted.
    pub fn push_group(&mut self, group: TabGroup) {
        self.groups.push(group);
    }

    /// Remove the group at `index`. An out-of-bounds index leaves the
    /// list untouched.
    pub fn remove_group(&mut self, index: usize) -> bool {
        if index < self.groups.len() {
            self.groups.remove(index);
            true
        } else {
            false
        }
    }

    /// Remove one tab from the group at `group_index`. The group stays in
    /// the list even when its last tab is removed. Out-of-bounds indices
    /// leave the list untouched.
    pub fn remove_tab(&mut self, group_index: usize, tab_index: usize) -> bool {
        match self.groups.get_mut(group_index) {
            Some(group) if tab_index < group.urls.len() => {
                group.urls.remove(tab_index);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_tabs(&self) -> usize {
        self.groups.iter().map(|g| g.urls.len()).sum()
    }
}

impl Default for GroupList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab_data::{saved_group_name, TabRecord};

    fn record(url: &str) -> TabRecord {
        TabRecord {
            url: url.to_string(),
            title: None,
            favicon: None,
            thumbnail: None,
        }
    }

    fn create_test_group(id: f64, urls: &[&str]) -> TabGroup {
        TabGroup::new(
            id,
            saved_group_name("10/28/2024, 10:30:00 AM"),
            urls.iter().map(|u| record(u)).collect(),
        )
    }

    #[test]
    fn test_group_list_new() {
        let list = GroupList::new();
        assert!(list.is_empty());
        assert_eq!(list.total_tabs(), 0);
    }

    #[test]
    fn test_push_keeps_save_order() {
        let mut list = GroupList::new();
        list.push_group(create_test_group(1.0, &["https://a"]));
        list.push_group(create_test_group(2.0, &["https://b"]));
        list.push_group(create_test_group(3.0, &["https://c"]));

        assert_eq!(list.len(), 3);
        assert_eq!(list.groups[0].id, 1.0);
        assert_eq!(list.groups[1].id, 2.0);
        assert_eq!(list.groups[2].id, 3.0);
    }

    #[test]
    fn test_remove_group_keeps_relative_order() {
        let mut list = GroupList::new();
        list.push_group(create_test_group(1.0, &["https://a"]));
        list.push_group(create_test_group(2.0, &["https://b"]));
        list.push_group(create_test_group(3.0, &["https://c"]));

        let removed = list.remove_group(1);

        assert!(removed);
        assert_eq!(list.len(), 2);
        assert_eq!(list.groups[0].id, 1.0);
        assert_eq!(list.groups[1].id, 3.0);
    }

    #[test]
    fn test_remove_group_out_of_bounds() {
        let mut list = GroupList::new();
        list.push_group(create_test_group(1.0, &["https://a"]));

        let removed = list.remove_group(5);

        assert!(!removed);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_tab_leaves_other_groups_untouched() {
        let mut list = GroupList::new();
        list.push_group(create_test_group(1.0, &["https://a", "https://b"]));
        list.push_group(create_test_group(2.0, &["https://c", "https://d"]));

        let removed = list.remove_tab(0, 1);

        assert!(removed);
        assert_eq!(list.groups[0].urls.len(), 1);
        assert_eq!(list.groups[0].urls[0].url, "https://a");
        assert_eq!(list.groups[1].urls.len(), 2);
    }

    #[test]
    fn test_remove_last_tab_keeps_group() {
        let mut list = GroupList::new();
        list.push_group(create_test_group(1.0, &["https://a"]));

        let removed = list.remove_tab(0, 0);

        assert!(removed);
        assert_eq!(list.len(), 1);
        assert!(list.groups[0].urls.is_empty());
    }

    #[test]
    fn test_remove_tab_out_of_bounds() {
        let mut list = GroupList::new();
        list.push_group(create_test_group(1.0, &["https://a"]));

        assert!(!list.remove_tab(0, 3));
        assert!(!list.remove_tab(9, 0));
        assert_eq!(list.groups[0].urls.len(), 1);
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let mut list = GroupList::new();
        list.push_group(create_test_group(1698508200000.0, &["https://a"]));

        let json = serde_json::to_string(&list).unwrap();

        assert!(json.starts_with('['), "expected an array, got {}", json);
        let deserialized: GroupList = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, list);
    }

    #[test]
    fn test_loads_stored_layout() {
        // Layout as written under the tabGroups key
        let json = r#"[{
            "id": 1698508200000,
            "name": "Tabs saved on 10/28/2024, 10:30:00 AM",
            "urls": [{"url": "https://google.com", "title": "Google"}]
        }]"#;

        let list: GroupList = serde_json::from_str(json).unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list.groups[0].id, 1698508200000.0);
        assert_eq!(list.groups[0].urls[0].title.as_deref(), Some("Google"));
        assert_eq!(list.groups[0].urls[0].thumbnail, None);
    }

    #[test]
    fn test_save_delete_scenario() {
        // Empty store, one save, one per-tab delete, one group delete
        let mut list = GroupList::new();
        assert!(list.is_empty());

        list.push_group(create_test_group(1.0, &["https://a", "https://b"]));
        assert_eq!(list.len(), 1);
        assert_eq!(list.groups[0].urls.len(), 2);

        assert!(list.remove_tab(0, 0));
        assert_eq!(list.groups[0].urls.len(), 1);
        assert_eq!(list.groups[0].urls[0].url, "https://b");

        assert!(list.remove_group(0));
        assert!(list.is_empty());
    }
}
