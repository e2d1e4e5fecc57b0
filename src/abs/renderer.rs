//! Frame clearing and indexed draw submission.

use std::sync::Arc;

use glam::Vec4;

use super::{Driver, IndexBuffer, IndexType, VertexArray, checked};
use crate::error::{Error, Result};

pub struct Renderer<D: Driver> {
    gl: Arc<D>,
    clear_color: Vec4,
}

impl<D: Driver> Renderer<D> {
    pub fn new(gl: &Arc<D>, clear_color: Vec4) -> Self {
        Self {
            gl: Arc::clone(gl),
            clear_color,
        }
    }

    pub fn clear(&self) -> Result<()> {
        let gl = self.gl.as_ref();
        let c = self.clear_color;
        checked(gl, "glClearColor", || gl.clear_color(c.x, c.y, c.z, c.w))?;
        checked(gl, "glClear", || gl.clear(glow::COLOR_BUFFER_BIT))
    }

    /// Draws every index of `ib` as a triangle list.
    pub fn draw(&self, va: &VertexArray<D>, ib: &IndexBuffer<D>) -> Result<()> {
        self.draw_indexed(va, ib, ib.count(), ib.index_type())
    }

    /// Draws the first `count` indices of `ib`, read as `index_type`.
    ///
    /// `index_type` has to match what the buffer was uploaded with; drawing
    /// `u32` data as `u16` would read the wrong vertices.
    pub fn draw_indexed(
        &self,
        va: &VertexArray<D>,
        ib: &IndexBuffer<D>,
        count: usize,
        index_type: IndexType,
    ) -> Result<()> {
        if index_type != ib.index_type() {
            return Err(Error::IndexTypeMismatch {
                expected: ib.index_type(),
                requested: index_type,
            });
        }
        if count > ib.count() {
            return Err(Error::IndexOutOfRange {
                count,
                available: ib.count(),
            });
        }

        va.bind()?;
        ib.bind()?;
        let gl = self.gl.as_ref();
        checked(gl, "glDrawElements", || {
            gl.draw_elements(glow::TRIANGLES, count as i32, index_type.gl_enum(), 0)
        })
    }
}
