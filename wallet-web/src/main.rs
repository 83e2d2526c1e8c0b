//! Bellschain Game - browser entry point
//!
//! Detects the Nintondo Wallet extension and connects to it on request.
//! Detection and handshake logic live in `lib-wallet`; this crate supplies
//! the browser sources and the UI.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

mod app;
mod components;
mod pages;
mod services;
mod state;
mod utils;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::new(utils::config::log_level()));
    log::info!("{} starting...", utils::constants::APP_TITLE);

    hide_loading_screen();
    leptos::mount::mount_to_body(|| view! { <App/> });
}

/// Hide the static loading element shipped in index.html
fn hide_loading_screen() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        log::warn!("No document available");
        return;
    };

    match document.get_element_by_id("leptos-loading") {
        Some(loading_element) => {
            if let Err(err) = loading_element.class_list().add_1("hidden") {
                log::warn!("Failed to hide loading screen: {:?}", err);
            }
        }
        None => log::debug!("Loading element not found"),
    }
}
