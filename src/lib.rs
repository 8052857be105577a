use leptos::{mount_to_body, view};
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::domain::logging::{LogComponent, get_logger};

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod event_utils;
pub mod infrastructure;
pub mod presentation;
pub mod time_utils;
pub mod view_state;

pub use config::HeatmapConfig;
pub use view_state::{ViewState, ViewportTransform};

/// Install the panic hook and browser logging. Runs when the module loads.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();
    infrastructure::services::initialize_browser_logging();
    get_logger().info(LogComponent::Presentation("Initialize"), "Block map module initialized");
}

/// Mount the Leptos app on `<body>`. `config_json` may override any subset
/// of the default configuration.
#[wasm_bindgen(js_name = runApp)]
pub fn run_app(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => HeatmapConfig::from_json(&json)?,
        None => HeatmapConfig::default(),
    };
    mount_to_body(move || view! { <App config=config /> });
    Ok(())
}
