//! Vertex buffer layouts.
//!
//! A [`VertexBufferLayout`] describes how one interleaved vertex record is laid
//! out in a buffer: an ordered list of [`VertexBufferElement`]s and the total
//! stride in bytes. [`VertexArray::add_buffer`](super::VertexArray::add_buffer)
//! turns it into attribute pointers.

use crate::error::{Error, Result};

/// The component types a vertex attribute may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    F32,
    U8,
    U32,
}

impl ElementKind {
    /// Size of one component in bytes.
    pub const fn size(self) -> u32 {
        match self {
            ElementKind::F32 => 4,
            ElementKind::U8 => 1,
            ElementKind::U32 => 4,
        }
    }

    pub const fn gl_enum(self) -> u32 {
        match self {
            ElementKind::F32 => glow::FLOAT,
            ElementKind::U8 => glow::UNSIGNED_BYTE,
            ElementKind::U32 => glow::UNSIGNED_INT,
        }
    }

    /// Byte values are read as colors, so they are normalized to `0.0..=1.0`.
    pub const fn normalized(self) -> bool {
        matches!(self, ElementKind::U8)
    }
}

impl TryFrom<u32> for ElementKind {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            glow::FLOAT => Ok(ElementKind::F32),
            glow::UNSIGNED_BYTE => Ok(ElementKind::U8),
            glow::UNSIGNED_INT => Ok(ElementKind::U32),
            other => Err(Error::UnsupportedElementKind(other)),
        }
    }
}

/// One attribute of a vertex record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBufferElement {
    pub kind: ElementKind,
    pub count: u32,
    pub normalized: bool,
}

impl VertexBufferElement {
    pub const fn size(&self) -> u32 {
        self.count * self.kind.size()
    }
}

/// An attribute together with the slot and byte offset it binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub index: u32,
    pub element: VertexBufferElement,
    pub offset: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexBufferLayout {
    elements: Vec<VertexBufferElement>,
    stride: u32,
}

impl VertexBufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `count` components of `kind`.
    ///
    /// Fails without touching the layout if `count` is not in `1..=4`.
    pub fn push(&mut self, kind: ElementKind, count: u32) -> Result<&mut Self> {
        if !(1..=4).contains(&count) {
            return Err(Error::InvalidComponentCount(count));
        }
        let element = VertexBufferElement {
            kind,
            count,
            normalized: kind.normalized(),
        };
        self.stride += element.size();
        self.elements.push(element);
        Ok(self)
    }

    /// Like [`push`](Self::push), but takes a raw OpenGL type enum.
    pub fn push_gl(&mut self, gl_type: u32, count: u32) -> Result<&mut Self> {
        let kind = ElementKind::try_from(gl_type)?;
        self.push(kind, count)
    }

    pub fn elements(&self) -> &[VertexBufferElement] {
        &self.elements
    }

    /// Size of one whole vertex record in bytes.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Yields every element with its attribute slot and byte offset.
    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.elements
            .iter()
            .enumerate()
            .scan(0u32, |offset, (index, element)| {
                let attribute = Attribute {
                    index: index as u32,
                    element: *element,
                    offset: *offset,
                };
                *offset += element.size();
                Some(attribute)
            })
    }
}
