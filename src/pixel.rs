//! CPU reference of the glitch pass
//!
//! Evaluates the exact per-pixel formula the fragment shader runs, one call
//! per pixel, against any sampler. Useful for headless evaluation and for
//! pinning down the formula's behavior in native tests; the WebGL path in
//! [`crate::renderer`] is the production renderer.

use glam::{vec2, Vec2, Vec3, Vec4};

use crate::constants::*;
use crate::noise::snoise;

/// The shared noise signal driving displacement, interference and the line
/// pattern: thresholded large waves plus fine jitter.
pub fn combined_noise(time: f32, uv_y: f32) -> f32 {
    combined_noise_with(snoise, time, uv_y)
}

/// Same signal over an injected noise primitive.
pub fn combined_noise_with<N>(noise: N, time: f32, uv_y: f32) -> f32
where
    N: Fn(Vec2) -> f32,
{
    let wave = (noise(vec2(time * WAVE_TIME_SCALE, uv_y * WAVE_Y_FREQ)) - WAVE_THRESHOLD)
        .max(0.0)
        * WAVE_GAIN;
    let jitter = (noise(vec2(time * JITTER_TIME_SCALE, uv_y * JITTER_Y_FREQ)) - JITTER_BIAS)
        * JITTER_GAIN;
    wave + jitter
}

/// Shade one pixel.
///
/// `uv` is the normalized coordinate in [0,1]^2, `frag_y` the pixel's
/// y-coordinate in framebuffer pixels (the line pattern runs on absolute
/// pixels, not uv). `sample` resolves a texture lookup; out-of-range
/// coordinates are its business, the formula does not clamp them.
pub fn shade<S>(sample: S, uv: Vec2, time: f32, frag_y: f32) -> Vec4
where
    S: Fn(Vec2) -> Vec4,
{
    shade_with_noise(snoise, sample, uv, time, frag_y)
}

/// [`shade`] over an injected noise primitive.
pub fn shade_with_noise<N, S>(noise: N, sample: S, uv: Vec2, time: f32, frag_y: f32) -> Vec4
where
    N: Fn(Vec2) -> f32,
    S: Fn(Vec2) -> Vec4,
{
    let noise = combined_noise_with(noise, time, uv.y);

    // Horizontal displacement, always toward smaller x.
    let xpos = uv.x - noise * noise * DISPLACE_GAIN;
    let color = sample(vec2(xpos, uv.y));

    // Interference mix toward black.
    let mut rgb = color.truncate().lerp(Vec3::ZERO, noise * INTERFERENCE_MIX);

    // Line pattern: darken every other 4-pixel band.
    if (frag_y * LINE_BAND_SCALE).rem_euclid(2.0).floor() == 0.0 {
        rgb *= 1.0 - LINE_DARKEN * noise;
    }

    rgb.extend(color.w)
}
