/// Tab group save/list/delete over the persisted list.
///
/// Every mutation reads the whole list, applies one change and writes the
/// whole list back. There is no version check: when two mutations race,
/// the later write wins and the earlier one is lost.

use crate::browser;
use crate::storage::{GroupList, STORAGE_KEY};
use crate::tab_data::{saved_group_name, TabGroup, TabRecord};
use wasm_bindgen::JsValue;

/// Read the persisted list; an absent key is an empty list
pub async fn list_groups() -> Result<GroupList, String> {
    let stored = browser::read_storage(STORAGE_KEY).await?;

    if stored.is_null() || stored.is_undefined() {
        Ok(GroupList::new())
    } else {
        serde_wasm_bindgen::from_value(stored)
            .map_err(|e| format!("Failed to parse stored groups: {:?}", e))
    }
}

async fn persist(list: &GroupList) -> Result<(), String> {
    let value = serde_wasm_bindgen::to_value(list)
        .map_err(|e| format!("Failed to serialize groups: {:?}", e))?;
    browser::write_storage(STORAGE_KEY, value).await
}

/// Append a new group holding `records` and persist the whole list.
/// Record content is stored as given, empty URLs included.
pub async fn save_group(records: Vec<TabRecord>) -> Result<TabGroup, String> {
    let now = js_sys::Date::new_0();
    let group = TabGroup::new(
        now.get_time(),
        saved_group_name(&String::from(now.to_locale_string("default", &JsValue::UNDEFINED))),
        records,
    );

    let mut list = list_groups().await?;
    list.push_group(group.clone());
    persist(&list).await?;

    log::info!("saved group {} with {} tabs", group.id, group.urls.len());
    Ok(group)
}

/// Remove the group at `index` (list position, not id) and persist.
/// Out-of-bounds indices leave the stored list unchanged.
pub async fn delete_group(index: usize) -> Result<GroupList, String> {
    let mut list = list_groups().await?;

    if !list.remove_group(index) {
        log::warn!("delete_group: index {} out of bounds, list unchanged", index);
        return Ok(list);
    }

    persist(&list).await?;
    Ok(list)
}

/// Remove one tab from the group at `group_index` and persist. The group
/// stays in the list even when it becomes empty.
pub async fn delete_tab_from_group(group_index: usize, tab_index: usize) -> Result<GroupList, String> {
    let mut list = list_groups().await?;

    if !list.remove_tab(group_index, tab_index) {
        log::warn!(
            "delete_tab_from_group: ({}, {}) out of bounds, list unchanged",
            group_index,
            tab_index
        );
        return Ok(list);
    }

    persist(&list).await?;
    Ok(list)
}
