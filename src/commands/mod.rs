//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod forest;
mod positions;
mod config;
mod backend;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Rejected promises surface as `Err` instead of a thrown exception
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Backend rejections are plain strings; anything else is debug-printed
fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

// Re-export all public items
pub use forest::*;
pub use positions::*;
pub use config::*;
pub use backend::TauriBackend;
