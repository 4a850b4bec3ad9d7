//! GLSL shaders
//!
//! The fragment stage is assembled at program-creation time by splicing the
//! shared simplex-noise module between the uniform declarations and the
//! glitch body, so the body can call `snoise` like any built-in.

pub const VERTEX_SHADER_SOURCE: &str = r#"
    precision highp float;

    attribute vec2 a_position;

    varying vec2 v_uv;

    void main() {
        // Clip-space quad corners map straight onto [0,1] texture space.
        v_uv = a_position * 0.5 + 0.5;
        gl_Position = vec4(a_position, 0.0, 1.0);
    }
"#;

/// Textureless 2D simplex noise by Ian McEwan, Ashima Arts (MIT).
/// `snoise` is deterministic, continuous and stays roughly within [-1, 1].
pub const SIMPLEX_NOISE_SOURCE: &str = r#"
    vec3 mod289(vec3 x) {
        return x - floor(x * (1.0 / 289.0)) * 289.0;
    }

    vec2 mod289(vec2 x) {
        return x - floor(x * (1.0 / 289.0)) * 289.0;
    }

    vec3 permute(vec3 x) {
        return mod289(((x * 34.0) + 1.0) * x);
    }

    float snoise(vec2 v) {
        const vec4 C = vec4(0.211324865405187,   // (3.0 - sqrt(3.0)) / 6.0
                            0.366025403784439,   // 0.5 * (sqrt(3.0) - 1.0)
                           -0.577350269189626,   // -1.0 + 2.0 * C.x
                            0.024390243902439);  // 1.0 / 41.0

        // First corner
        vec2 i = floor(v + dot(v, C.yy));
        vec2 x0 = v - i + dot(i, C.xx);

        // Other corners
        vec2 i1 = (x0.x > x0.y) ? vec2(1.0, 0.0) : vec2(0.0, 1.0);
        vec4 x12 = x0.xyxy + C.xxzz;
        x12.xy -= i1;

        // Permutations
        i = mod289(i);
        vec3 p = permute(permute(i.y + vec3(0.0, i1.y, 1.0))
                + i.x + vec3(0.0, i1.x, 1.0));

        vec3 m = max(0.5 - vec3(dot(x0, x0), dot(x12.xy, x12.xy), dot(x12.zw, x12.zw)), 0.0);
        m = m * m;
        m = m * m;

        // Gradients: 41 points uniformly over a line, mapped onto a diamond
        vec3 x = 2.0 * fract(p * C.www) - 1.0;
        vec3 h = abs(x) - 0.5;
        vec3 ox = floor(x + 0.5);
        vec3 a0 = x - ox;

        // Normalise gradients implicitly by scaling m
        m *= 1.79284291400159 - 0.85373472095314 * (a0 * a0 + h * h);

        vec3 g;
        g.x = a0.x * x0.x + h.x * x0.y;
        g.yz = a0.yz * x12.xz + h.yz * x12.yw;
        return 130.0 * dot(m, g);
    }
"#;

const FRAGMENT_SHADER_HEADER: &str = r#"
    precision highp float;

    uniform sampler2D u_texture;
    uniform float u_time;

    varying vec2 v_uv;
"#;

const FRAGMENT_SHADER_BODY: &str = r#"
    void main() {
        vec2 uv = v_uv;

        // Large, incidental waves; the threshold keeps the effect quiet
        // most of the time.
        float noise = max(0.0, snoise(vec2(u_time * 2.0, uv.y * 0.3)) - 0.3) * 0.15;

        // Constant fine jitter layered on top.
        noise += (snoise(vec2(u_time * 20.0, uv.y * 2.4)) - 0.5) * 0.0375;

        // Displace each line horizontally. Squaring keeps the offset
        // non-negative and small outside of noise spikes.
        float xpos = uv.x - noise * noise * 0.25;
        gl_FragColor = texture2D(u_texture, vec2(xpos, uv.y));

        // Interference: pull the sample toward black with the same signal.
        gl_FragColor.rgb = mix(gl_FragColor.rgb, vec3(0.0), noise * 0.3);

        // Darken every other 4-pixel band.
        if (floor(mod(gl_FragCoord.y * 0.25, 2.0)) == 0.0) {
            gl_FragColor.rgb *= 1.0 - (0.15 * noise);
        }
    }
"#;

/// Glitch fragment shader with the noise module spliced in.
pub fn fragment_shader_source() -> String {
    format!("{FRAGMENT_SHADER_HEADER}\n{SIMPLEX_NOISE_SOURCE}\n{FRAGMENT_SHADER_BODY}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    #[test]
    fn vertex_shader_declares_quad_interface() {
        assert!(VERTEX_SHADER_SOURCE.contains("attribute vec2 a_position"));
        assert!(VERTEX_SHADER_SOURCE.contains("varying vec2 v_uv"));
        assert!(VERTEX_SHADER_SOURCE.contains("gl_Position"));
        assert!(VERTEX_SHADER_SOURCE.contains("void main()"));
    }

    #[test]
    fn fragment_source_declares_pass_interface() {
        let src = fragment_shader_source();
        assert!(src.contains("uniform sampler2D u_texture"));
        assert!(src.contains("uniform float u_time"));
        assert!(src.contains("varying vec2 v_uv"));
        assert!(src.contains("void main()"));
    }

    #[test]
    fn fragment_source_splices_noise_module_once() {
        let src = fragment_shader_source();
        assert_eq!(src.matches("float snoise(vec2 v)").count(), 1);
        // The body relies on the module; both snoise calls must be present.
        assert_eq!(src.matches("snoise(vec2(u_time").count(), 2);
    }

    #[test]
    fn fragment_source_carries_formula_coefficients() {
        // The GLSL body spells the coefficients as literals; keep them in
        // lockstep with the constants the CPU reference uses.
        let src = fragment_shader_source();
        let wave = format!(
            "max(0.0, snoise(vec2(u_time * {WAVE_TIME_SCALE:?}, uv.y * {WAVE_Y_FREQ:?})) - {WAVE_THRESHOLD:?}) * {WAVE_GAIN:?}"
        );
        assert!(src.contains(&wave), "wave term missing from:\n{src}");

        let jitter = format!(
            "(snoise(vec2(u_time * {JITTER_TIME_SCALE:?}, uv.y * {JITTER_Y_FREQ:?})) - {JITTER_BIAS:?}) * {JITTER_GAIN:?}"
        );
        assert!(src.contains(&jitter), "jitter term missing from:\n{src}");

        assert!(src.contains(&format!("noise * noise * {DISPLACE_GAIN:?}")));
        assert!(src.contains(&format!("noise * {INTERFERENCE_MIX:?}")));
        assert!(src.contains(&format!("{LINE_DARKEN:?} * noise")));
        assert!(src.contains(&format!("gl_FragCoord.y * {LINE_BAND_SCALE:?}")));
    }
}
