//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::abs::{IndexType, ShaderStage};

/// Everything that can go wrong while setting up or drawing the quad.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: shader source before the first `#shader` marker")]
    MissingMarker { line: usize },
    #[error("line {line}: `{text}` does not name a shader stage")]
    UnknownStage { line: usize, text: String },
    #[error("no `#shader {0}` section found")]
    MissingStage(ShaderStage),
    #[error("failed to compile {stage} shader: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("failed to link shader program: {0}")]
    Link(String),
    #[error("failed to create {0}")]
    Resource(String),
    #[error("OpenGL error {code:#06x} in {call} at {file}:{line}")]
    Driver {
        call: &'static str,
        code: u32,
        file: &'static str,
        line: u32,
    },
    #[error("uniform `{0}` not found in shader program")]
    UniformNotFound(String),
    #[error("unsupported vertex element type {0:#06x}")]
    UnsupportedElementKind(u32),
    #[error("vertex element component count {0} is outside 1..=4")]
    InvalidComponentCount(u32),
    #[error("draw requested {requested} indices but the buffer holds {expected}")]
    IndexTypeMismatch {
        expected: IndexType,
        requested: IndexType,
    },
    #[error("draw requested {count} indices but the buffer holds {available}")]
    IndexOutOfRange { count: usize, available: usize },
    #[error("window error: {0}")]
    Window(String),
    #[error("invalid config {path}: {reason}")]
    Config { path: PathBuf, reason: String },
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, Error>;
