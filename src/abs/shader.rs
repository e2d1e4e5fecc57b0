//! OpenGL Shaders
//!
//! This module defines [`ShaderProgramSource`], which splits one sectioned
//! source file into its stages, and the [`Shader`] and [`ShaderProgram`]
//! structs for compiling and linking them. It also provides the [`Uniform`]
//! trait for setting uniform variables in shader programs.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use glam::Vec4;

use super::{Driver, checked};
use crate::error::{Error, Result};

const MARKER: &str = "#shader";

/// A stage of the shader pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub const fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    /// Picks the stage named by a `#shader` marker line.
    fn from_marker(line: &str) -> Option<Self> {
        if line.contains("vertex") {
            Some(ShaderStage::Vertex)
        } else if line.contains("fragment") {
            Some(ShaderStage::Fragment)
        } else {
            None
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// The vertex and fragment sources of one program.
///
/// A source file holds both stages, each introduced by a marker line:
///
/// ```text
/// #shader vertex
/// ...
/// #shader fragment
/// ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderProgramSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderProgramSource {
    /// Reads and splits the file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }
}

impl FromStr for ShaderProgramSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut vertex: Option<String> = None;
        let mut fragment: Option<String> = None;
        let mut active = None;

        for (i, line) in s.lines().enumerate() {
            if line.contains(MARKER) {
                let stage = ShaderStage::from_marker(line).ok_or_else(|| Error::UnknownStage {
                    line: i + 1,
                    text: line.to_string(),
                })?;
                match stage {
                    ShaderStage::Vertex => vertex.get_or_insert_with(String::new),
                    ShaderStage::Fragment => fragment.get_or_insert_with(String::new),
                };
                active = Some(stage);
                continue;
            }

            let section = match active {
                Some(ShaderStage::Vertex) => vertex.get_or_insert_with(String::new),
                Some(ShaderStage::Fragment) => fragment.get_or_insert_with(String::new),
                None => return Err(Error::MissingMarker { line: i + 1 }),
            };
            section.push_str(line);
            section.push('\n');
        }

        Ok(Self {
            vertex: vertex.ok_or(Error::MissingStage(ShaderStage::Vertex))?,
            fragment: fragment.ok_or(Error::MissingStage(ShaderStage::Fragment))?,
        })
    }
}

/// Represents an individual compiled OpenGL shader stage.
pub struct Shader<D: Driver> {
    gl: Arc<D>,
    id: D::Shader,
    stage: ShaderStage,
}

impl<D: Driver> Shader<D> {
    /// Compiles a new shader stage from the given source code.
    ///
    /// On failure the driver's info log is logged and returned, and the stage
    /// is deleted.
    pub fn new(gl: &Arc<D>, stage: ShaderStage, source: &str) -> Result<Self> {
        let id = checked(gl.as_ref(), "glCreateShader", || gl.create_shader(stage.gl_enum()))?
            .map_err(|e| Error::Resource(format!("{stage} shader: {e}")))?;
        let shader = Self {
            gl: Arc::clone(gl),
            id,
            stage,
        };

        checked(gl.as_ref(), "glShaderSource", || gl.shader_source(id, source))?;
        checked(gl.as_ref(), "glCompileShader", || gl.compile_shader(id))?;

        let compiled = checked(gl.as_ref(), "glGetShaderiv", || gl.shader_compile_status(id))?;
        if !compiled {
            let log = checked(gl.as_ref(), "glGetShaderInfoLog", || gl.shader_info_log(id))?;
            log::error!("Failed to compile {stage} shader:\n{log}");
            return Err(Error::Compile { stage, log });
        }

        Ok(shader)
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<D: Driver> Drop for Shader<D> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Uploads the value to `location` of the program currently in use.
    fn upload<D: Driver>(&self, gl: &D, location: &D::UniformLocation);
}

impl Uniform for f32 {
    fn upload<D: Driver>(&self, gl: &D, location: &D::UniformLocation) {
        gl.uniform_1_f32(location, *self);
    }
}

impl Uniform for Vec4 {
    fn upload<D: Driver>(&self, gl: &D, location: &D::UniformLocation) {
        gl.uniform_4_f32(location, self.x, self.y, self.z, self.w);
    }
}

impl<T: Uniform> Uniform for &T {
    fn upload<D: Driver>(&self, gl: &D, location: &D::UniformLocation) {
        (*self).upload(gl, location);
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram<D: Driver> {
    gl: Arc<D>,
    id: D::Program,
    locations: RefCell<HashMap<String, Option<D::UniformLocation>>>,
}

impl<D: Driver> ShaderProgram<D> {
    /// Compiles both stages of `source` and links them.
    ///
    /// The stage objects are released before this returns, whether or not
    /// linking succeeds.
    pub fn from_source(gl: &Arc<D>, source: &ShaderProgramSource) -> Result<Self> {
        let vertex = Shader::new(gl, ShaderStage::Vertex, &source.vertex)?;
        let fragment = Shader::new(gl, ShaderStage::Fragment, &source.fragment)?;
        Self::new(gl, &[&vertex, &fragment])
    }

    /// Reads, splits, compiles and links the sectioned source file at `path`.
    pub fn from_file(gl: &Arc<D>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let program = Self::from_source(gl, &ShaderProgramSource::from_file(path)?)?;
        log::info!("Built shader program from {}", path.display());
        Ok(program)
    }

    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<D>, shaders: &[&Shader<D>]) -> Result<Self> {
        let id = checked(gl.as_ref(), "glCreateProgram", || gl.create_program())?
            .map_err(|e| Error::Resource(format!("shader program: {e}")))?;
        let program = Self {
            gl: Arc::clone(gl),
            id,
            locations: RefCell::new(HashMap::new()),
        };

        for shader in shaders {
            log::debug!("Attaching {} shader {:?} to program {id:?}", shader.stage(), shader.id);
            checked(gl.as_ref(), "glAttachShader", || gl.attach_shader(id, shader.id))?;
        }

        checked(gl.as_ref(), "glLinkProgram", || gl.link_program(id))?;
        let linked = checked(gl.as_ref(), "glGetProgramiv", || gl.program_link_status(id))?;
        if !linked {
            let log = checked(gl.as_ref(), "glGetProgramInfoLog", || gl.program_info_log(id))?;
            log::error!("Failed to link shader program:\n{log}");
            return Err(Error::Link(log));
        }

        checked(gl.as_ref(), "glValidateProgram", || gl.validate_program(id))?;
        let valid = checked(gl.as_ref(), "glGetProgramiv", || gl.program_validate_status(id))?;
        if !valid {
            let log = checked(gl.as_ref(), "glGetProgramInfoLog", || gl.program_info_log(id))?;
            log::warn!("Shader program {id:?} failed validation:\n{log}");
        }

        for shader in shaders {
            checked(gl.as_ref(), "glDetachShader", || gl.detach_shader(id, shader.id))?;
        }

        log::debug!("Linked shader program {id:?}");
        Ok(program)
    }

    /// Binds the shader program for use.
    pub fn bind(&self) -> Result<()> {
        checked(self.gl.as_ref(), "glUseProgram", || {
            self.gl.use_program(Some(self.id))
        })
    }

    pub fn unbind(&self) -> Result<()> {
        checked(self.gl.as_ref(), "glUseProgram", || self.gl.use_program(None))
    }

    /// Looks up a uniform, asking the driver only the first time per name.
    pub fn uniform_location(&self, name: &str) -> Result<Option<D::UniformLocation>> {
        if let Some(location) = self.locations.borrow().get(name) {
            return Ok(location.clone());
        }

        let location = checked(self.gl.as_ref(), "glGetUniformLocation", || {
            self.gl.uniform_location(self.id, name)
        })?;
        if location.is_none() {
            log::warn!("Uniform `{name}` doesn't exist in shader program {:?}", self.id);
        }
        self.locations
            .borrow_mut()
            .insert(name.to_string(), location.clone());
        Ok(location)
    }

    /// Like [`uniform_location`](Self::uniform_location), but a missing uniform
    /// is an error.
    pub fn require_uniform(&self, name: &str) -> Result<D::UniformLocation> {
        self.uniform_location(name)?
            .ok_or_else(|| Error::UniformNotFound(name.to_string()))
    }

    /// Sets a uniform variable by name. Unknown names are skipped.
    ///
    /// The program must be bound.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) -> Result<()> {
        match self.uniform_location(name)? {
            Some(location) => self.set_uniform_at(&location, value),
            None => Ok(()),
        }
    }

    /// Sets a uniform variable at an already resolved location.
    pub fn set_uniform_at<T: Uniform>(&self, location: &D::UniformLocation, value: T) -> Result<()> {
        checked(self.gl.as_ref(), "glUniform", || {
            value.upload(self.gl.as_ref(), location)
        })
    }
}

impl<D: Driver> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        self.gl.delete_program(self.id);
    }
}
