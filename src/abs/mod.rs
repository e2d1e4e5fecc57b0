//! This module contains the OpenGL abstractions used by the demo,
//! including window setup, buffers, vertex layouts, shaders and drawing.

pub mod app;
pub mod buffer;
pub mod check;
pub mod driver;
pub mod layout;
pub mod renderer;
pub mod shader;
pub mod vertex_array;

#[cfg(test)]
pub mod testing;

pub use app::*;
pub use buffer::*;
pub use check::*;
pub use driver::*;
pub use layout::*;
pub use renderer::*;
pub use shader::*;
pub use vertex_array::*;
