//! CPU port of the 2D simplex noise the fragment shader uses
//!
//! Same algorithm as [`crate::shaders::SIMPLEX_NOISE_SOURCE`] (Ian McEwan,
//! Ashima Arts, MIT), so the reference evaluation in [`crate::pixel`] sees
//! the same noise field the GPU does, modulo floating point.

use glam::{vec2, vec3, vec4, Vec2, Vec2Swizzles, Vec3, Vec3Swizzles, Vec4Swizzles};

// Skew/unskew and gradient constants, spelled like the GLSL module's C.
const C_X: f32 = 0.211324865405187; // (3.0 - sqrt(3.0)) / 6.0
const C_Y: f32 = 0.366025403784439; // 0.5 * (sqrt(3.0) - 1.0)
const C_Z: f32 = -0.577350269189626; // -1.0 + 2.0 * C_X
const C_W: f32 = 0.024390243902439; // 1.0 / 41.0

fn mod289(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn mod289_2(x: Vec2) -> Vec2 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn permute(x: Vec3) -> Vec3 {
    mod289((x * 34.0 + 1.0) * x)
}

// GLSL fract: x - floor(x). Spelled out because glam's `fract` truncates.
fn fract_gl(x: Vec3) -> Vec3 {
    x - x.floor()
}

/// 2D simplex noise. Deterministic, continuous, range roughly [-1, 1].
pub fn snoise(v: Vec2) -> f32 {
    // First corner
    let i = (v + v.dot(Vec2::splat(C_Y))).floor();
    let x0 = v - i + i.dot(Vec2::splat(C_X));

    // Other corners
    let i1 = if x0.x > x0.y {
        vec2(1.0, 0.0)
    } else {
        vec2(0.0, 1.0)
    };
    let mut x12 = x0.xyxy() + vec4(C_X, C_X, C_Z, C_Z);
    x12.x -= i1.x;
    x12.y -= i1.y;

    // Permutations
    let i = mod289_2(i);
    let p = permute(permute(i.y + vec3(0.0, i1.y, 1.0)) + i.x + vec3(0.0, i1.x, 1.0));

    let m = (0.5 - vec3(x0.dot(x0), x12.xy().dot(x12.xy()), x12.zw().dot(x12.zw())))
        .max(Vec3::ZERO);
    let m = m * m;
    let m = m * m;

    // Gradients: 41 points uniformly over a line, mapped onto a diamond
    let x = 2.0 * fract_gl(p * C_W) - 1.0;
    let h = x.abs() - 0.5;
    let ox = (x + 0.5).floor();
    let a0 = x - ox;

    // Normalise gradients implicitly by scaling m
    let m = m * (1.79284291400159 - 0.85373472095314 * (a0 * a0 + h * h));

    let g_yz = a0.yz() * x12.xz() + h.yz() * x12.yw();
    let g = vec3(a0.x * x0.x + h.x * x0.y, g_yz.x, g_yz.y);
    130.0 * m.dot(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    // A coarse lattice-avoiding sweep over a few noise periods.
    fn sample_points() -> impl Iterator<Item = Vec2> {
        (-40..40).flat_map(|ix| {
            (-40..40).map(move |iy| vec2(ix as f32 * 0.437 + 0.011, iy as f32 * 0.291 + 0.007))
        })
    }

    #[test]
    fn snoise_is_deterministic() {
        for p in sample_points().take(200) {
            assert_eq!(snoise(p), snoise(p));
        }
    }

    #[test]
    fn snoise_stays_in_range() {
        for p in sample_points() {
            let n = snoise(p);
            assert!(
                (-1.0..=1.0).contains(&n),
                "snoise({p:?}) = {n} out of range"
            );
        }
    }

    #[test]
    fn snoise_is_continuous_in_both_axes() {
        let eps = 1e-4;
        for p in sample_points() {
            let n = snoise(p);
            assert!((snoise(p + vec2(eps, 0.0)) - n).abs() < 1e-2);
            assert!((snoise(p + vec2(0.0, eps)) - n).abs() < 1e-2);
        }
    }

    #[test]
    fn snoise_actually_varies() {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for p in sample_points() {
            let n = snoise(p);
            min = min.min(n);
            max = max.max(n);
        }
        assert!(max - min > 0.5, "noise is nearly flat: [{min}, {max}]");
    }
}
