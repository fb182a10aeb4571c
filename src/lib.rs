/// Tab Shelf - browser extension for saving and reopening tab groups
/// Built with Rust + WASM + Yew

mod background;
mod browser;
mod groups;
mod storage;
mod tab_data;
mod thumbnail;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::Popup>::new().render();
}

// Start the Yew app for the dashboard page
#[wasm_bindgen]
pub fn start_dashboard() {
    yew::Renderer::<ui::dashboard::Dashboard>::new().render();
}

// Entry point for the background message listener; the JS shim feeds the
// returned promise into sendResponse so the reply waits for completion
#[wasm_bindgen]
pub async fn handle_message(request: JsValue) -> Result<JsValue, JsValue> {
    background::handle_request(request).await
}
