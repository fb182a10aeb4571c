/// Message handling for the extension's background context

use crate::browser;
use crate::groups;
use crate::tab_data::TabRecord;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

/// Page opened by the `openDashboard` action
const DASHBOARD_URL: &str = "dashboard.html";

/// One request from a UI surface. The `action` tag selects the variant;
/// payloads that carry no known tag fail to decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    SaveTabs,
    CloseAllTabs,
    OpenDashboard,
    OpenTabs { urls: Vec<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reply {
    pub success: bool,
}

/// Decode and run one request. The reply resolves only after the
/// requested operation has finished, so callers can sequence on it.
pub async fn handle_request(request: JsValue) -> Result<JsValue, JsValue> {
    let request: Request = serde_wasm_bindgen::from_value(request)
        .map_err(|e| JsValue::from_str(&format!("Unrecognized request: {:?}", e)))?;

    log::info!("background: handling {:?}", request);
    dispatch(request)
        .await
        .map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&Reply { success: true })
        .map_err(|e| JsValue::from_str(&format!("Failed to encode reply: {:?}", e)))
}

async fn dispatch(request: Request) -> Result<(), String> {
    match request {
        Request::SaveTabs => {
            let tabs = browser::current_window_tabs().await?;
            let records: Vec<TabRecord> = tabs.iter().map(TabRecord::from_snapshot).collect();
            groups::save_group(records).await?;
            Ok(())
        }
        Request::CloseAllTabs => {
            for tab in browser::background_tabs().await? {
                browser::close_tab(tab.id).await?;
            }
            Ok(())
        }
        Request::OpenDashboard => browser::open_tab(DASHBOARD_URL).await,
        Request::OpenTabs { urls } => {
            // One tab per URL; nothing waits on the individual creations
            for url in urls {
                browser::open_tab_detached(url);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_save_tabs() {
        let request: Request = serde_json::from_str(r#"{"action": "saveTabs"}"#).unwrap();
        assert_eq!(request, Request::SaveTabs);
    }

    #[test]
    fn test_decode_close_all_tabs() {
        let request: Request = serde_json::from_str(r#"{"action": "closeAllTabs"}"#).unwrap();
        assert_eq!(request, Request::CloseAllTabs);
    }

    #[test]
    fn test_decode_open_dashboard() {
        let request: Request = serde_json::from_str(r#"{"action": "openDashboard"}"#).unwrap();
        assert_eq!(request, Request::OpenDashboard);
    }

    #[test]
    fn test_decode_open_tabs_with_urls() {
        let request: Request =
            serde_json::from_str(r#"{"action": "openTabs", "urls": ["https://a", "https://b"]}"#)
                .unwrap();

        assert_eq!(
            request,
            Request::OpenTabs {
                urls: vec!["https://a".to_string(), "https://b".to_string()],
            }
        );
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result: Result<Request, _> = serde_json::from_str(r#"{"action": "dropStorage"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_open_tabs_requires_urls() {
        let result: Result<Request, _> = serde_json::from_str(r#"{"action": "openTabs"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_request_round_trip() {
        // The popup serializes the same type the background decodes
        let request = Request::OpenTabs {
            urls: vec!["https://a".to_string()],
        };

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"action":"openTabs","urls":["https://a"]}"#);
        let decoded: Request = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_reply_layout() {
        let json = serde_json::to_string(&Reply { success: true }).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }
}
