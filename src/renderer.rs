//! Glitch pass rendering module

use wasm_bindgen::prelude::*;
use web_sys::{
    console, HtmlCanvasElement, HtmlImageElement, HtmlMediaElement, HtmlVideoElement, WebGlBuffer,
    WebGlProgram, WebGlRenderingContext as GL, WebGlShader, WebGlTexture, WebGlUniformLocation,
};

use crate::config::{GlitchConfig, WrapMode};
use crate::constants::*;
use crate::shaders::{fragment_shader_source, VERTEX_SHADER_SOURCE};

struct Uniforms {
    time: Option<WebGlUniformLocation>,
    texture: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn load(gl: &GL, program: &WebGlProgram) -> Self {
        let get = |name| gl.get_uniform_location(program, name);
        Self {
            time: get("u_time"),
            texture: get("u_texture"),
        }
    }
}

#[wasm_bindgen]
pub struct RenderResult {
    pub fps: u32,
    pub time: f32,
}

#[wasm_bindgen]
pub struct GlitchShader {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    uniforms: Uniforms,
    // Bound once and consumed by the GPU for every draw.
    #[allow(dead_code)]
    quad: Option<WebGlBuffer>,
    texture: Option<WebGlTexture>,
    // When a video is attached, its current frame is re-uploaded per render.
    video: Option<HtmlVideoElement>,

    time: f32,
    last_time: f32,

    config: GlitchConfig,

    frame_count: u32,
    fps_last_time: f32,
    current_fps: u32,
}

#[wasm_bindgen]
impl GlitchShader {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_val: JsValue) -> Result<Self, JsValue> {
        console::log_1(&"[VideoGlitch] Initializing WASM module...".into());

        let config = GlitchConfig::from_js(config_val);

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Failed to get document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or("Canvas not found")?
            .dyn_into()?;

        let gl: GL = canvas
            .get_context("webgl")?
            .ok_or("WebGL is not supported")?
            .dyn_into()?;

        gl.clear_color(0.0, 0.0, 0.0, 0.0);

        let program = Self::create_program(&gl)?;
        gl.use_program(Some(&program));

        let uniforms = Uniforms::load(&gl, &program);

        let mut shader = Self {
            gl,
            canvas,
            program,
            uniforms,
            quad: None,
            texture: None,
            video: None,
            time: 0.0,
            last_time: 0.0,
            config: config.clone(),
            frame_count: 0,
            fps_last_time: 0.0,
            current_fps: 0,
        };

        shader.resize()?;
        shader.setup_quad()?;

        if let Some(source) = &config.source {
            shader.set_texture(source)?;
        }

        console::log_1(&"[VideoGlitch] Initialized".into());
        Ok(shader)
    }

    fn create_program(gl: &GL) -> Result<WebGlProgram, JsValue> {
        let vs = Self::compile_shader(gl, GL::VERTEX_SHADER, VERTEX_SHADER_SOURCE)?;
        let fs = Self::compile_shader(gl, GL::FRAGMENT_SHADER, &fragment_shader_source())?;

        let program = gl.create_program().ok_or("Failed to create program")?;
        gl.attach_shader(&program, &vs);
        gl.attach_shader(&program, &fs);
        gl.link_program(&program);

        if !gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
        {
            let info = gl.get_program_info_log(&program).unwrap_or_default();
            return Err(format!("Link error: {info}").into());
        }
        Ok(program)
    }

    fn compile_shader(gl: &GL, shader_type: u32, source: &str) -> Result<WebGlShader, JsValue> {
        let shader = gl
            .create_shader(shader_type)
            .ok_or("Failed to create shader")?;
        gl.shader_source(&shader, source);
        gl.compile_shader(&shader);

        if !gl
            .get_shader_parameter(&shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
        {
            let info = gl.get_shader_info_log(&shader).unwrap_or_default();
            gl.delete_shader(Some(&shader));
            return Err(format!("Shader compilation error: {info}").into());
        }
        Ok(shader)
    }

    fn setup_quad(&mut self) -> Result<(), JsValue> {
        // Fullscreen triangle strip; the vertex stage derives v_uv from it.
        let positions: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];

        let buffer = self.gl.create_buffer().ok_or("Failed to create buffer")?;
        self.gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));

        unsafe {
            let array = js_sys::Float32Array::view(&positions);
            self.gl
                .buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);
        }

        let location = self.gl.get_attrib_location(&self.program, "a_position");
        if location >= 0 {
            let loc = location as u32;
            self.gl.enable_vertex_attrib_array(loc);
            self.gl
                .vertex_attrib_pointer_with_i32(loc, 2, GL::FLOAT, false, 0, 0);
        }

        self.quad = Some(buffer);
        Ok(())
    }

    #[inline]
    fn set_uniform_1f(&self, loc: &Option<WebGlUniformLocation>, v: f32) {
        if let Some(l) = loc {
            self.gl.uniform1f(Some(l), v);
        }
    }

    fn ensure_texture(&mut self) -> Result<(), JsValue> {
        if self.texture.is_none() {
            self.texture = self.gl.create_texture();
        }
        let texture = self.texture.as_ref().ok_or("Failed to create texture")?;

        self.gl.active_texture(GL::TEXTURE0);
        self.gl.bind_texture(GL::TEXTURE_2D, Some(texture));
        // Source pixels arrive top-down; texture space runs bottom-up.
        self.gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
        Ok(())
    }

    fn apply_sampling_params(&self) {
        let wrap = self.config.wrap_mode.to_gl();
        self.gl
            .tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, wrap);
        self.gl
            .tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, wrap);
        self.gl
            .tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
        self.gl
            .tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);

        if let Some(loc) = &self.uniforms.texture {
            self.gl.uniform1i(Some(loc), 0);
        }
    }

    /// Use a still image as the glitched source.
    pub fn set_texture(&mut self, image: &HtmlImageElement) -> Result<(), JsValue> {
        self.ensure_texture()?;
        self.gl.tex_image_2d_with_u32_and_u32_and_image(
            GL::TEXTURE_2D,
            0,
            GL::RGBA as i32,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            image,
        )?;
        self.apply_sampling_params();
        self.video = None;

        console::log_1(
            &format!(
                "[VideoGlitch] Source loaded: {}x{}",
                image.natural_width(),
                image.natural_height()
            )
            .into(),
        );
        Ok(())
    }

    /// Use a playing video as the glitched source; each `render` call picks
    /// up the current frame.
    pub fn set_video(&mut self, video: &HtmlVideoElement) -> Result<(), JsValue> {
        self.ensure_texture()?;
        self.upload_video_frame(video)?;
        self.apply_sampling_params();
        self.video = Some(video.clone());

        console::log_1(
            &format!(
                "[VideoGlitch] Video source attached: {}x{}",
                video.video_width(),
                video.video_height()
            )
            .into(),
        );
        Ok(())
    }

    fn upload_video_frame(&self, video: &HtmlVideoElement) -> Result<(), JsValue> {
        if video.ready_state() < HtmlMediaElement::HAVE_CURRENT_DATA {
            return Ok(());
        }
        self.gl.tex_image_2d_with_u32_and_u32_and_video(
            GL::TEXTURE_2D,
            0,
            GL::RGBA as i32,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            video,
        )
    }

    /// Drop the source; the pass renders transparent black until a new one
    /// is attached.
    pub fn clear_source(&mut self) {
        if let Some(texture) = self.texture.take() {
            self.gl.delete_texture(Some(&texture));
        }
        self.video = None;

        console::log_1(&"[VideoGlitch] Source cleared".into());
    }

    pub fn resize(&mut self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("Failed to get window")?;
        let dpi = window.device_pixel_ratio();

        let (width, height) = (
            (self.canvas.client_width() as f64 * dpi) as u32,
            (self.canvas.client_height() as f64 * dpi) as u32,
        );

        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.gl.viewport(0, 0, width as i32, height as i32);
        Ok(())
    }

    pub fn render(&mut self, current_time: f32) -> Result<RenderResult, JsValue> {
        let delta = (current_time - self.last_time) * 0.001;
        self.last_time = current_time;

        self.frame_count += 1;
        if current_time - self.fps_last_time >= 1000.0 {
            self.current_fps = self.frame_count;
            self.frame_count = 0;
            self.fps_last_time = current_time;
        }

        self.time += delta * self.config.speed;

        if let Some(video) = &self.video {
            self.upload_video_frame(video)?;
        }

        self.set_uniform_1f(&self.uniforms.time, self.time);

        self.gl.clear(GL::COLOR_BUFFER_BIT);
        self.gl.draw_arrays(GL::TRIANGLE_STRIP, 0, 4);

        Ok(RenderResult {
            fps: self.current_fps,
            time: self.time,
        })
    }

    #[cfg(feature = "configurable")]
    pub fn set_speed(&mut self, value: f32) {
        self.config.speed = value;
    }

    #[cfg(feature = "configurable")]
    pub fn set_wrap_mode(&mut self, mode: WrapMode) {
        self.config.wrap_mode = mode;
        if let Some(texture) = &self.texture {
            self.gl.active_texture(GL::TEXTURE0);
            self.gl.bind_texture(GL::TEXTURE_2D, Some(texture));
            self.apply_sampling_params();
        }
    }

    pub fn get_fps(&self) -> u32 {
        self.current_fps
    }
    pub fn get_time(&self) -> f32 {
        self.time
    }
    pub fn get_speed(&self) -> f32 {
        self.config.speed
    }
    pub fn get_wrap_mode(&self) -> WrapMode {
        self.config.wrap_mode
    }
    pub fn get_config(&self) -> GlitchConfig {
        self.config.clone()
    }
    pub fn is_configurable(&self) -> bool {
        RUNTIME_CONFIGURABLE
    }
}
