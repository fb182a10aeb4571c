/// Bridge to the extension runtime. bridge.js is a thin shim over
/// chrome.tabs, chrome.storage.local and chrome.runtime.sendMessage.

use crate::tab_data::TabSnapshot;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn queryTabs(current_window: bool, background_only: bool) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeTab(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn activateTab(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn captureVisibleTab(window_id: i32, quality: u32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendMessage(request: JsValue) -> Result<JsValue, JsValue>;
}

/// Tabs of the current window, in tab-strip order
pub async fn current_window_tabs() -> Result<Vec<TabSnapshot>, String> {
    let tabs_js = queryTabs(true, false)
        .await
        .map_err(|e| format!("Failed to get tabs: {:?}", e))?;
    serde_wasm_bindgen::from_value(tabs_js).map_err(|e| format!("Failed to parse tabs: {:?}", e))
}

/// Non-active tabs of the current window
pub async fn background_tabs() -> Result<Vec<TabSnapshot>, String> {
    let tabs_js = queryTabs(true, true)
        .await
        .map_err(|e| format!("Failed to get tabs: {:?}", e))?;
    serde_wasm_bindgen::from_value(tabs_js).map_err(|e| format!("Failed to parse tabs: {:?}", e))
}

pub async fn open_tab(url: &str) -> Result<(), String> {
    createTab(url)
        .await
        .map(|_| ())
        .map_err(|e| format!("Failed to open tab: {:?}", e))
}

/// Open a tab without waiting for the browser to finish creating it
pub fn open_tab_detached(url: String) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = open_tab(&url).await {
            log::error!("{}", e);
        }
    });
}

pub async fn close_tab(tab_id: i32) -> Result<(), String> {
    removeTab(tab_id)
        .await
        .map_err(|e| format!("Failed to close tab {}: {:?}", tab_id, e))
}

pub async fn activate_tab(tab_id: i32) -> Result<(), String> {
    activateTab(tab_id)
        .await
        .map_err(|e| format!("Failed to activate tab {}: {:?}", tab_id, e))
}

/// JPEG capture of the currently visible tab of `window_id`, as a data URL
pub async fn capture_visible_tab(window_id: i32, quality: u32) -> Result<String, String> {
    let data_js = captureVisibleTab(window_id, quality)
        .await
        .map_err(|e| format!("Failed to capture tab: {:?}", e))?;
    data_js
        .as_string()
        .ok_or_else(|| "Capture did not return a data URL".to_string())
}

pub async fn read_storage(key: &str) -> Result<JsValue, String> {
    getStorage(key)
        .await
        .map_err(|e| format!("Failed to get storage: {:?}", e))
}

pub async fn write_storage(key: &str, value: JsValue) -> Result<(), String> {
    setStorage(key, value)
        .await
        .map_err(|e| format!("Failed to save storage: {:?}", e))
}

/// Send one request to the background context and wait for its reply
pub async fn send_message(request: JsValue) -> Result<JsValue, String> {
    sendMessage(request)
        .await
        .map_err(|e| format!("Failed to send message: {:?}", e))
}
