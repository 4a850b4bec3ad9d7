//! Glitch pass configuration

use crate::constants::*;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlImageElement, WebGlRenderingContext as GL};

/// Texture boundary behavior for the displaced sample.
///
/// The displacement can push the sampled x coordinate below 0; the wrap
/// mode decides what comes back. `Repeat` and `Mirror` only work with
/// power-of-two texture dimensions under WebGL 1.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapMode {
    Clamp,
    Repeat,
    Mirror,
}

impl Default for WrapMode {
    fn default() -> Self {
        WrapMode::Clamp
    }
}

impl WrapMode {
    pub(crate) fn to_gl(self) -> i32 {
        match self {
            WrapMode::Clamp => GL::CLAMP_TO_EDGE as i32,
            WrapMode::Repeat => GL::REPEAT as i32,
            WrapMode::Mirror => GL::MIRRORED_REPEAT as i32,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "clamp" => Some(WrapMode::Clamp),
            "repeat" => Some(WrapMode::Repeat),
            "mirror" => Some(WrapMode::Mirror),
            _ => None,
        }
    }
}

#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct GlitchConfig {
    /// Clock-rate multiplier; the effect animates at `speed` times the
    /// timestamps the host passes to `render`.
    pub speed: f32,
    pub wrap_mode: WrapMode,

    #[wasm_bindgen(getter_with_clone)]
    pub source: Option<HtmlImageElement>,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            wrap_mode: WrapMode::default(),
            source: None,
        }
    }
}

#[wasm_bindgen]
impl GlitchConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GlitchConfig {
    pub fn from_js(value: JsValue) -> Self {
        let mut config = Self::default();

        if !value.is_object() {
            if let Some(speed) = value.as_f64() {
                config.speed = speed as f32;
            }
            return config;
        }

        macro_rules! extract {
            ($field:ident, $key:expr, $ty:ty) => {
                if let Ok(v) = js_sys::Reflect::get(&value, &$key.into()) {
                    if let Some(num) = v.as_f64() {
                        config.$field = num as $ty;
                    }
                }
            };
        }

        extract!(speed, "speed", f32);

        if let Ok(wrap_val) = js_sys::Reflect::get(&value, &"wrapMode".into()) {
            if let Some(name) = wrap_val.as_string() {
                if let Some(mode) = WrapMode::parse(&name) {
                    config.wrap_mode = mode;
                }
            }
        }

        if let Ok(src_val) = js_sys::Reflect::get(&value, &"source".into()) {
            if !src_val.is_undefined() && !src_val.is_null() {
                if let Ok(img) = src_val.dyn_into::<HtmlImageElement>() {
                    config.source = Some(img);
                }
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = GlitchConfig::default();
        assert_eq!(config.speed, DEFAULT_SPEED);
        assert_eq!(config.wrap_mode, WrapMode::Clamp);
        assert!(config.source.is_none());
    }

    #[test]
    fn wrap_mode_parses_known_names() {
        assert_eq!(WrapMode::parse("clamp"), Some(WrapMode::Clamp));
        assert_eq!(WrapMode::parse("repeat"), Some(WrapMode::Repeat));
        assert_eq!(WrapMode::parse("mirror"), Some(WrapMode::Mirror));
        assert_eq!(WrapMode::parse("tile"), None);
    }

    #[test]
    fn wrap_mode_maps_to_gl_constants() {
        assert_eq!(WrapMode::Clamp.to_gl(), GL::CLAMP_TO_EDGE as i32);
        assert_eq!(WrapMode::Repeat.to_gl(), GL::REPEAT as i32);
        assert_eq!(WrapMode::Mirror.to_gl(), GL::MIRRORED_REPEAT as i32);
    }
}
