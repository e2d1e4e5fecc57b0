//! Checked driver calls.
//!
//! OpenGL reports failures through an error queue instead of return values.
//! [`checked`] drains that queue, performs one call, and turns whatever the
//! call left behind into an [`Error::Driver`] tagged with the caller's
//! location.

use std::panic::Location;

use super::Driver;
use crate::error::{Error, Result};

/// Runs `f` against a clean error queue and reports the first error it raised.
///
/// `call` is the OpenGL entry point name used in diagnostics.
#[track_caller]
pub fn checked<D, T, F>(gl: &D, call: &'static str, f: F) -> Result<T>
where
    D: Driver + ?Sized,
    F: FnOnce() -> T,
{
    clear_errors(gl);
    let value = f();
    let code = gl.get_error();
    if code == glow::NO_ERROR {
        return Ok(value);
    }

    let location = Location::caller();
    log::error!(
        "[OpenGL error {code:#06x}] {call} : {} : {}",
        location.file(),
        location.line()
    );
    Err(Error::Driver {
        call,
        code,
        file: location.file(),
        line: location.line(),
    })
}

/// Discards every pending error code.
pub fn clear_errors<D: Driver + ?Sized>(gl: &D) {
    while gl.get_error() != glow::NO_ERROR {}
}
