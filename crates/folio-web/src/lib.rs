#[allow(clippy::unit_arg, clippy::unused_unit)]
mod app;
mod components;
mod diag;
mod dom;
mod motion;
mod transport;

use wasm_bindgen::prelude::*;

/// Entry point for the WASM application.
///
/// This function is called automatically when the WASM module is loaded in the browser.
/// It sets up the panic hook and mounts the portfolio to the document body.
#[wasm_bindgen(start)]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
