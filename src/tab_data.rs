/// Data structures for Tab Shelf
use serde::{Deserialize, Serialize};

/// Information the browser reports about one open tab
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabSnapshot {
    pub id: i32,
    pub window_id: i32,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub favicon: Option<String>,
    pub active: bool,
    pub index: i32,
}

/// One tab as stored inside a saved group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabRecord {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Base64 JPEG payload without the data-URL prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl TabRecord {
    pub fn from_snapshot(snapshot: &TabSnapshot) -> TabRecord {
        TabRecord {
            url: snapshot.url.clone(),
            title: Some(snapshot.title.clone()),
            favicon: snapshot.favicon.clone(),
            thumbnail: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: Option<String>) -> TabRecord {
        self.thumbnail = thumbnail;
        self
    }
}

/// A saved snapshot of a window's tabs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabGroup {
    /// Creation time in ms since the epoch; uniqueness is best effort
    pub id: f64,
    pub name: String,
    /// Saved tabs in the order they appeared in the window
    pub urls: Vec<TabRecord>,
}

impl TabGroup {
    pub fn new(id: f64, name: String, urls: Vec<TabRecord>) -> TabGroup {
        TabGroup { id, name, urls }
    }
}

/// Display name for a group created at the given locale-formatted time
pub fn saved_group_name(local_time: &str) -> String {
    format!("Tabs saved on {}", local_time)
}
