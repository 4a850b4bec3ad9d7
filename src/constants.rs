//! Glitch formula constants
//!
//! The effect formula itself is fixed; these coefficients exist so the CPU
//! reference in [`crate::pixel`] evaluates exactly what the fragment shader
//! runs. Only the clock speed and texture wrap mode can change at runtime,
//! and only with the `configurable` feature.

// Large displacement waves
pub const WAVE_TIME_SCALE: f32 = 2.0;
pub const WAVE_Y_FREQ: f32 = 0.3;
pub const WAVE_THRESHOLD: f32 = 0.3;
pub const WAVE_GAIN: f32 = 0.15;

// Fine jitter layered on top
pub const JITTER_TIME_SCALE: f32 = 20.0;
pub const JITTER_Y_FREQ: f32 = 2.4;
pub const JITTER_BIAS: f32 = 0.5;
pub const JITTER_GAIN: f32 = 0.0375;

// How the combined signal is applied
pub const DISPLACE_GAIN: f32 = 0.25;
pub const INTERFERENCE_MIX: f32 = 0.3;
pub const LINE_DARKEN: f32 = 0.15;
pub const LINE_BAND_SCALE: f32 = 0.25;

// Clock
pub const DEFAULT_SPEED: f32 = 1.0;

// Feature flag
pub const RUNTIME_CONFIGURABLE: bool = cfg!(feature = "configurable");
