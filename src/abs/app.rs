//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::video::SwapInterval;

use super::{Driver, checked};
use crate::error::{Error, Result};

fn window_error(e: impl ToString) -> Error {
    Error::Window(e.to_string())
}

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Opens a window with an OpenGL 3.3 core context made current on this
    /// thread. With `vsync` set, buffer swaps wait for the display refresh.
    pub fn new(title: &str, width: u32, height: u32, vsync: bool) -> Result<Self> {
        let sdl = sdl2::init().map_err(window_error)?;
        let video_subsystem = sdl.video().map_err(window_error)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = video_subsystem
            .window(title, width, height)
            .opengl()
            .resizable()
            .build()
            .map_err(window_error)?;
        let gl_context = window.gl_create_context().map_err(window_error)?;
        window.gl_make_current(&gl_context).map_err(window_error)?;
        video_subsystem
            .gl_set_swap_interval(if vsync {
                SwapInterval::VSync
            } else {
                SwapInterval::Immediate
            })
            .map_err(window_error)?;

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(window_error)?;
        log::info!("Opened {width}x{height} window \"{title}\" (vsync: {vsync})");

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl: Arc::new(gl),
            event_pump,
        })
    }

    /// Presents the back buffer.
    pub fn swap(&self) {
        self.window.gl_swap_window();
    }

    /// Drains pending window events and reports whether the user asked to
    /// close the window.
    pub fn poll_events(&mut self) -> Result<bool> {
        let mut close_requested = false;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => close_requested = true,
                Event::Window {
                    win_event: WindowEvent::Resized(width, height),
                    ..
                } => {
                    let gl = self.gl.as_ref();
                    checked(gl, "glViewport", || gl.viewport(0, 0, width, height))?;
                }
                _ => {}
            }
        }
        Ok(close_requested)
    }
}
