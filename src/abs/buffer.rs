//! GPU buffer objects.
//!
//! This module defines [`VertexBuffer`] and [`IndexBuffer`]. Both upload their
//! data once on construction and delete the GPU buffer when dropped.

use std::fmt;
use std::sync::Arc;

use super::{Driver, checked};
use crate::error::{Error, Result};

/// The integer width of an index buffer's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexType {
    U8,
    U16,
    U32,
}

impl IndexType {
    pub const fn size(self) -> usize {
        match self {
            IndexType::U8 => 1,
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }

    pub const fn gl_enum(self) -> u32 {
        match self {
            IndexType::U8 => glow::UNSIGNED_BYTE,
            IndexType::U16 => glow::UNSIGNED_SHORT,
            IndexType::U32 => glow::UNSIGNED_INT,
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexType::U8 => "u8",
            IndexType::U16 => "u16",
            IndexType::U32 => "u32",
        })
    }
}

fn generate<D: Driver>(gl: &D) -> Result<D::Buffer> {
    checked(gl, "glGenBuffers", || gl.create_buffer())?
        .map_err(|e| Error::Resource(format!("buffer: {e}")))
}

fn upload<D: Driver>(gl: &D, target: u32, id: D::Buffer, data: &[u8]) -> Result<()> {
    checked(gl, "glBindBuffer", || gl.bind_buffer(target, Some(id)))?;
    checked(gl, "glBufferData", || {
        gl.buffer_data(target, data, glow::STATIC_DRAW)
    })
}

/// Vertex data stored on the GPU side.
pub struct VertexBuffer<D: Driver> {
    gl: Arc<D>,
    id: D::Buffer,
    size: usize,
}

impl<D: Driver> VertexBuffer<D> {
    /// Uploads `vertices` into a new buffer, which is left bound.
    pub fn new<T: bytemuck::Pod>(gl: &Arc<D>, vertices: &[T]) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let buffer = Self {
            gl: Arc::clone(gl),
            id: generate(gl.as_ref())?,
            size: bytes.len(),
        };
        upload(gl.as_ref(), glow::ARRAY_BUFFER, buffer.id, bytes)?;
        log::debug!("Created vertex buffer {:?} ({} bytes)", buffer.id, buffer.size);
        Ok(buffer)
    }

    pub fn bind(&self) -> Result<()> {
        checked(self.gl.as_ref(), "glBindBuffer", || {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.id))
        })
    }

    pub fn unbind(&self) -> Result<()> {
        checked(self.gl.as_ref(), "glBindBuffer", || {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None)
        })
    }

    /// Size of the uploaded data in bytes.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl<D: Driver> Drop for VertexBuffer<D> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.id);
    }
}

/// 32-bit indices stored on the GPU side.
pub struct IndexBuffer<D: Driver> {
    gl: Arc<D>,
    id: D::Buffer,
    count: usize,
}

impl<D: Driver> IndexBuffer<D> {
    /// Uploads `indices` into a new buffer, which is left bound.
    pub fn new(gl: &Arc<D>, indices: &[u32]) -> Result<Self> {
        let buffer = Self {
            gl: Arc::clone(gl),
            id: generate(gl.as_ref())?,
            count: indices.len(),
        };
        upload(
            gl.as_ref(),
            glow::ELEMENT_ARRAY_BUFFER,
            buffer.id,
            bytemuck::cast_slice(indices),
        )?;
        log::debug!("Created index buffer {:?} ({} indices)", buffer.id, buffer.count);
        Ok(buffer)
    }

    pub fn bind(&self) -> Result<()> {
        checked(self.gl.as_ref(), "glBindBuffer", || {
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.id))
        })
    }

    pub fn unbind(&self) -> Result<()> {
        checked(self.gl.as_ref(), "glBindBuffer", || {
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None)
        })
    }

    /// Number of indices in the buffer.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn index_type(&self) -> IndexType {
        IndexType::U32
    }
}

impl<D: Driver> Drop for IndexBuffer<D> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.id);
    }
}
