//! Thin wrappers over the window and document.

use folio_motion::ScrollHost;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions};

use crate::diag::log_verbose;

/// Smooth-scrolls the real window
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowScroll;

impl ScrollHost for WindowScroll {
    fn scroll_to_anchor(&self, id: &str) -> bool {
        let Some(element) = element_by_id(id) else {
            log_verbose(&format!("No element with id '{}'; navigation skipped", id));
            return false;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
        true
    }

    fn scroll_to_top(&self) {
        scroll_to(0.0);
    }
}

/// Smooth-scroll the document to a vertical offset
pub fn scroll_to(top: f64) {
    if let Some(window) = web_sys::window() {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

pub fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn viewport_height() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Set `scroll-behavior` on the root element
pub fn set_scroll_behavior(value: &str) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if let Some(root) = root {
        let _ = root.style().set_property("scroll-behavior", value);
    }
}

/// Offset of an element's top edge from the top of the document
pub fn document_top(element: &web_sys::Element) -> f64 {
    element.get_bounding_client_rect().top() + scroll_y()
}

pub fn element_by_id(id: &str) -> Option<web_sys::Element> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
}
