//! Vertex array objects.

use std::sync::Arc;

use super::{Driver, VertexBuffer, VertexBufferLayout, checked};
use crate::error::{Error, Result};

/// Binds vertex buffer layouts to shader attribute slots.
pub struct VertexArray<D: Driver> {
    gl: Arc<D>,
    id: D::VertexArray,
}

impl<D: Driver> VertexArray<D> {
    pub fn new(gl: &Arc<D>) -> Result<Self> {
        let id = checked(gl.as_ref(), "glGenVertexArrays", || gl.create_vertex_array())?
            .map_err(|e| Error::Resource(format!("vertex array: {e}")))?;
        log::debug!("Created vertex array {id:?}");
        Ok(Self {
            gl: Arc::clone(gl),
            id,
        })
    }

    /// Describes `buffer` to the vertex fetch stage according to `layout`.
    ///
    /// Attributes take slots `0..n` in layout order, at increasing byte offsets
    /// within one `layout.stride()` sized record.
    pub fn add_buffer(&self, buffer: &VertexBuffer<D>, layout: &VertexBufferLayout) -> Result<()> {
        let gl = self.gl.as_ref();
        self.bind()?;
        buffer.bind()?;

        let stride = layout.stride() as i32;
        for attribute in layout.attributes() {
            let element = attribute.element;
            checked(gl, "glEnableVertexAttribArray", || {
                gl.enable_vertex_attrib_array(attribute.index)
            })?;
            checked(gl, "glVertexAttribPointer", || {
                gl.vertex_attrib_pointer(
                    attribute.index,
                    element.count as i32,
                    element.kind.gl_enum(),
                    element.normalized,
                    stride,
                    attribute.offset as i32,
                )
            })?;
        }
        Ok(())
    }

    pub fn bind(&self) -> Result<()> {
        checked(self.gl.as_ref(), "glBindVertexArray", || {
            self.gl.bind_vertex_array(Some(self.id))
        })
    }

    pub fn unbind(&self) -> Result<()> {
        checked(self.gl.as_ref(), "glBindVertexArray", || {
            self.gl.bind_vertex_array(None)
        })
    }
}

impl<D: Driver> Drop for VertexArray<D> {
    fn drop(&mut self) {
        self.gl.delete_vertex_array(self.id);
    }
}
