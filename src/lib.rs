//! A minimal OpenGL demo: one indexed quad whose color pulses every frame.
//!
//! The [`abs`] module wraps the handful of OpenGL objects involved (buffers,
//! vertex arrays, shader programs) in owned types, and [`demo`] puts them
//! together into the render loop.

pub mod abs;
pub mod config;
pub mod demo;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
