/// Tab thumbnail capture for the save-and-close flow

use crate::browser;
use crate::tab_data::TabSnapshot;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// Stored thumbnails fit inside this box
pub const MAX_WIDTH: u32 = 200;
pub const MAX_HEIGHT: u32 = 150;

/// JPEG quality for the capture request (0-100)
const CAPTURE_QUALITY: u32 = 50;
/// JPEG quality for the re-encoded thumbnail (0.0-1.0)
const ENCODE_QUALITY: f64 = 0.7;
/// Time for a freshly activated tab to paint before capturing
const SETTLE_MS: i32 = 250;

/// Scale (width, height) down so neither side exceeds the bounds, keeping
/// aspect ratio. Never scales up.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }

    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    if scale >= 1.0 {
        return (width, height);
    }

    (
        ((width as f64 * scale).round() as u32).max(1),
        ((height as f64 * scale).round() as u32).max(1),
    )
}

/// Bring the tab forward, let it paint, capture and downscale it.
///
/// Any failure yields `None`: a missing thumbnail is not an error. The tab
/// is left activated; callers iterating a window restore nothing.
pub async fn capture_and_resize(snapshot: &TabSnapshot) -> Option<String> {
    if let Err(e) = browser::activate_tab(snapshot.id).await {
        log::warn!("could not activate tab {}: {}", snapshot.id, e);
        return None;
    }
    sleep_ms(SETTLE_MS).await;

    let data_url = match browser::capture_visible_tab(snapshot.window_id, CAPTURE_QUALITY).await {
        Ok(url) => url,
        Err(e) => {
            log::warn!("capture failed for tab {}: {}", snapshot.id, e);
            return None;
        }
    };

    match downscale(&data_url).await {
        Ok(encoded) => Some(encoded),
        Err(e) => {
            log::warn!("resize failed for tab {}: {:?}", snapshot.id, e);
            None
        }
    }
}

/// Decode the captured data URL, draw it scaled onto a canvas and
/// re-encode as JPEG. Returns the base64 payload without the prefix.
async fn downscale(data_url: &str) -> Result<String, JsValue> {
    let image = load_image(data_url).await?;
    let (width, height) = fit_within(
        image.natural_width(),
        image.natural_height(),
        MAX_WIDTH,
        MAX_HEIGHT,
    );

    let document = web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not a canvas element"))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not a 2d context"))?;
    context.draw_image_with_html_image_element_and_dw_and_dh(
        &image,
        0.0,
        0.0,
        width as f64,
        height as f64,
    )?;

    let encoded =
        canvas.to_data_url_with_type_and_encoder_options("image/jpeg", &JsValue::from_f64(ENCODE_QUALITY))?;
    match encoded.split_once(',') {
        Some((_, payload)) => Ok(payload.to_string()),
        None => Ok(encoded),
    }
}

async fn load_image(data_url: &str) -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new()?;
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(data_url);
    JsFuture::from(loaded).await?;
    Ok(image)
}

async fn sleep_ms(ms: i32) {
    let timer = js_sys::Promise::new(&mut |resolve, _| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = JsFuture::from(timer).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_within_hits_both_bounds() {
        assert_eq!(fit_within(400, 300, 200, 150), (200, 150));
    }

    #[test]
    fn test_fit_within_never_upscales() {
        assert_eq!(fit_within(100, 50, 200, 150), (100, 50));
        assert_eq!(fit_within(200, 150, 200, 150), (200, 150));
    }

    #[test]
    fn test_fit_within_wide_input() {
        // Width is the binding constraint
        assert_eq!(fit_within(800, 200, 200, 150), (200, 50));
    }

    #[test]
    fn test_fit_within_tall_input() {
        // Height is the binding constraint
        assert_eq!(fit_within(300, 600, 200, 150), (75, 150));
    }

    #[test]
    fn test_fit_within_bounds_both_dimensions() {
        // Landscape input whose height would still overflow after a
        // width-only fit
        let (w, h) = fit_within(400, 350, 200, 150);
        assert!(w <= 200 && h <= 150);
        assert_eq!((w, h), (171, 150));
    }

    #[test]
    fn test_fit_within_degenerate_input() {
        assert_eq!(fit_within(0, 300, 200, 150), (0, 300));
        assert_eq!(fit_within(400, 0, 200, 150), (400, 0));
    }

    #[test]
    fn test_fit_within_tiny_result_stays_visible() {
        // Extreme aspect ratios still round to at least one pixel
        let (w, h) = fit_within(10_000, 10, 200, 150);
        assert_eq!(w, 200);
        assert!(h >= 1);
    }
}
