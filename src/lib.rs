// ==================== Imports ====================
use wasm_bindgen::prelude::*;

#[macro_use]
mod browser;
pub mod config;
pub mod engine;
mod host;
pub mod input;
pub mod rocket;
pub mod session;
pub mod sprite;

use config::HostConfig;
use host::Host;

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - prepares the canvas and draws the title prompt
/// - first click rasterizes sprites and loads the game binary
/// - later clicks pause and resume
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    start(HostConfig::default())
}

/// Same as `main_js`, with page specific overrides, e.g.
/// `main_js_with_config({ moduleUrl: "/static/rocket.wasm" })`
#[wasm_bindgen]
pub fn main_js_with_config(config: JsValue) -> Result<(), JsValue> {
    let config = if config.is_undefined() || config.is_null() {
        HostConfig::default()
    } else {
        serde_wasm_bindgen::from_value::<HostConfig>(config)?
    };
    start(config)
}

fn start(config: HostConfig) -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();

    Host::new(config)
        .and_then(|host| host.install())
        .map_err(|err| JsValue::from_str(&format!("{:#}", err)))
}
