//! Browser Helpers
//!
//! Thin wrappers over `web_sys` / `js_sys` used by the components.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::JsCast;

use crate::board::TOUCH_BREAKPOINT_PX;

pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

pub fn local_hour() -> u32 {
    js_sys::Date::new_0().get_hours()
}

pub fn today() -> Option<NaiveDate> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
}

pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(f64::MAX)
}

/// Touch-capable device or a narrow viewport
pub fn is_touch_device() -> bool {
    let touch_points = web_sys::window()
        .map(|w| w.navigator().max_touch_points())
        .unwrap_or(0);
    touch_points > 0 || viewport_width() <= TOUCH_BREAKPOINT_PX
}

/// Smoothly scroll the element with `id` into the middle of the viewport
pub fn scroll_into_view(id: &str) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        return;
    };
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    options.set_block(web_sys::ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

// ========================
// Embedded contact editor
// ========================

pub const CONTACT_FRAME_ID: &str = "editContact";

/// Snapshot handed to the embedded contact editor
#[derive(Serialize)]
pub struct FrameMessage<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: &'a Value,
    pub token: &'a str,
    pub ergebnisse: &'a Value,
}

impl<'a> FrameMessage<'a> {
    pub fn new(data: &'a Value, token: &'a str, merged: &'a Value) -> Self {
        Self { kind: "firebaseData", data, token, ergebnisse: merged }
    }
}

/// Post `message` to the `#editContact` iframe when it is present
pub fn post_to_contact_frame(message: &FrameMessage<'_>) {
    let Some(frame) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONTACT_FRAME_ID))
        .and_then(|el| el.dyn_into::<web_sys::HtmlIFrameElement>().ok())
    else {
        return;
    };
    let Some(target) = frame.content_window() else {
        return;
    };
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    match message.serialize(&serializer) {
        Ok(payload) => {
            if let Err(e) = target.post_message(&payload, "*") {
                log::warn!("postMessage to contact frame failed: {:?}", e);
            }
        }
        Err(e) => log::warn!("could not encode contact frame message: {}", e),
    }
}
