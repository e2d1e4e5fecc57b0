//! The animated quad.
//!
//! [`QuadScene`] owns every GPU object the demo draws with and renders one
//! frame at a time; [`run`] drives it from the window's event loop.

use std::sync::Arc;

use glam::Vec4;

use crate::abs::*;
use crate::config::Config;
use crate::error::Result;

/// Corners of a unit quad centred on the origin.
pub const POSITIONS: [f32; 8] = [
    -0.5, -0.5, // 0
    0.5, -0.5, // 1
    0.5, 0.5, // 2
    -0.5, 0.5, // 3
];

/// Two triangles covering [`POSITIONS`].
pub const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

pub const COLOR_UNIFORM: &str = "u_Color";

/// A scalar that climbs slowly past 1.0, then drops back below 0.0 in a few
/// large steps.
///
/// The rise and fall rates differ: the red channel fades in and snaps back
/// out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPulse {
    value: f32,
    increment: f32,
}

impl ColorPulse {
    pub const RISE: f32 = 0.05;
    pub const FALL: f32 = -0.5;

    pub fn new() -> Self {
        Self::with_state(0.0, Self::RISE)
    }

    pub fn with_state(value: f32, increment: f32) -> Self {
        Self { value, increment }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn increment(&self) -> f32 {
        self.increment
    }

    /// Advances one frame and returns the new value.
    pub fn step(&mut self) -> f32 {
        if self.value > 1.0 {
            self.increment = Self::FALL;
        } else if self.value < 0.0 {
            self.increment = Self::RISE;
        }
        self.value += self.increment;
        self.value
    }
}

impl Default for ColorPulse {
    fn default() -> Self {
        Self::new()
    }
}

pub struct QuadScene<D: Driver> {
    renderer: Renderer<D>,
    shader: ShaderProgram<D>,
    color_location: D::UniformLocation,
    vertex_array: VertexArray<D>,
    _vertex_buffer: VertexBuffer<D>,
    index_buffer: IndexBuffer<D>,
    pulse: ColorPulse,
}

impl<D: Driver> QuadScene<D> {
    /// Uploads the quad and builds its shader program.
    ///
    /// Everything is unbound again before this returns, so each frame binds
    /// what it draws with.
    pub fn new(gl: &Arc<D>, source: &ShaderProgramSource, clear_color: Vec4) -> Result<Self> {
        let vertex_array = VertexArray::new(gl)?;
        let vertex_buffer = VertexBuffer::new(gl, &POSITIONS)?;
        let mut layout = VertexBufferLayout::new();
        layout.push(ElementKind::F32, 2)?;
        vertex_array.add_buffer(&vertex_buffer, &layout)?;

        let index_buffer = IndexBuffer::new(gl, &INDICES)?;

        let shader = ShaderProgram::from_source(gl, source)?;
        shader.bind()?;
        let color_location = shader.require_uniform(COLOR_UNIFORM)?;

        vertex_array.unbind()?;
        shader.unbind()?;
        vertex_buffer.unbind()?;
        index_buffer.unbind()?;

        Ok(Self {
            renderer: Renderer::new(gl, clear_color),
            shader,
            color_location,
            vertex_array,
            _vertex_buffer: vertex_buffer,
            index_buffer,
            pulse: ColorPulse::new(),
        })
    }

    /// Clears, draws the quad in the current pulse color, and advances the
    /// pulse.
    pub fn frame(&mut self) -> Result<()> {
        self.renderer.clear()?;
        self.shader.bind()?;
        self.shader
            .set_uniform_at(&self.color_location, self.color())?;
        self.renderer.draw(&self.vertex_array, &self.index_buffer)?;
        self.pulse.step();
        Ok(())
    }

    pub fn color(&self) -> Vec4 {
        Vec4::new(self.pulse.value(), 0.7, 0.8, 1.0)
    }
}

/// Renders frames until the window is closed.
pub fn run(app: &mut App, scene: &mut QuadScene<glow::Context>) -> Result<()> {
    let mut frames: u64 = 0;
    loop {
        scene.frame()?;
        app.swap();
        frames += 1;
        if app.poll_events()? {
            break;
        }
    }
    log::info!("Window closed after {frames} frames");
    Ok(())
}

/// Opens the window described by `config` and runs the demo in it.
pub fn start(config: &Config) -> Result<()> {
    let mut app = App::new(&config.title, config.width, config.height, config.vsync)?;
    let source = ShaderProgramSource::from_file(&config.shader)?;
    let mut scene = QuadScene::new(&app.gl, &source, config.clear_color())?;
    run(&mut app, &mut scene)
}
