//! VideoGlitch - WebGL video glitch post-processing effect in WASM

use wasm_bindgen::prelude::*;
use web_sys::console;

pub mod config;
pub mod constants;
pub mod noise;
pub mod pixel;
pub mod renderer;
pub mod shaders;

pub use config::{GlitchConfig, WrapMode};
pub use constants::*;
pub use noise::snoise;
pub use renderer::{GlitchShader, RenderResult};

#[wasm_bindgen(start)]
pub fn main() {
    let mode = if RUNTIME_CONFIGURABLE {
        "configurable"
    } else {
        "release"
    };
    console::log_1(&format!("[VideoGlitch] WASM loaded ({mode})").into());
}

#[wasm_bindgen]
pub fn is_runtime_configurable() -> bool {
    RUNTIME_CONFIGURABLE
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").into()
}
