//! A [`Driver`] that records calls instead of talking to a GPU.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use super::Driver;

/// One recorded driver call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateBuffer(u32),
    BindBuffer(u32, Option<u32>),
    BufferData { target: u32, len: usize, usage: u32 },
    DeleteBuffer(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    EnableVertexAttribArray(u32),
    VertexAttribPointer {
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    CreateShader(u32, u32),
    ShaderSource(u32),
    CompileShader(u32),
    GetShaderiv(u32),
    GetShaderInfoLog(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    ValidateProgram(u32),
    GetProgramiv(u32, u32),
    GetProgramInfoLog(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    UniformLocation(String),
    Uniform1f(u32, f32),
    Uniform4f(u32, [f32; 4]),
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear(u32),
    DrawElements { mode: u32, count: i32, element_type: u32, offset: i32 },
}

impl Call {
    /// The OpenGL entry point this call stands for.
    pub fn name(&self) -> &'static str {
        match self {
            Call::CreateBuffer(_) => "glGenBuffers",
            Call::BindBuffer(..) => "glBindBuffer",
            Call::BufferData { .. } => "glBufferData",
            Call::DeleteBuffer(_) => "glDeleteBuffers",
            Call::CreateVertexArray(_) => "glGenVertexArrays",
            Call::BindVertexArray(_) => "glBindVertexArray",
            Call::DeleteVertexArray(_) => "glDeleteVertexArrays",
            Call::EnableVertexAttribArray(_) => "glEnableVertexAttribArray",
            Call::VertexAttribPointer { .. } => "glVertexAttribPointer",
            Call::CreateShader(..) => "glCreateShader",
            Call::ShaderSource(_) => "glShaderSource",
            Call::CompileShader(_) => "glCompileShader",
            Call::GetShaderiv(_) => "glGetShaderiv",
            Call::GetShaderInfoLog(_) => "glGetShaderInfoLog",
            Call::DeleteShader(_) => "glDeleteShader",
            Call::CreateProgram(_) => "glCreateProgram",
            Call::AttachShader(..) => "glAttachShader",
            Call::DetachShader(..) => "glDetachShader",
            Call::LinkProgram(_) => "glLinkProgram",
            Call::ValidateProgram(_) => "glValidateProgram",
            Call::GetProgramiv(..) => "glGetProgramiv",
            Call::GetProgramInfoLog(_) => "glGetProgramInfoLog",
            Call::UseProgram(_) => "glUseProgram",
            Call::DeleteProgram(_) => "glDeleteProgram",
            Call::UniformLocation(_) => "glGetUniformLocation",
            Call::Uniform1f(..) => "glUniform1f",
            Call::Uniform4f(..) => "glUniform4f",
            Call::Viewport(..) => "glViewport",
            Call::ClearColor(_) => "glClearColor",
            Call::Clear(_) => "glClear",
            Call::DrawElements { .. } => "glDrawElements",
        }
    }
}

/// Records every call in order and hands out increasing integer handles.
pub struct RecordingDriver {
    calls: Mutex<Vec<Call>>,
    errors: Mutex<VecDeque<u32>>,
    fail_after: Mutex<HashMap<&'static str, u32>>,
    shader_kinds: Mutex<HashMap<u32, u32>>,
    uniforms: Mutex<HashSet<String>>,
    next_handle: AtomicU32,
    rejected_stage: Option<u32>,
    reject_link: bool,
    reject_validation: bool,
}

impl Default for RecordingDriver {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            errors: Mutex::new(VecDeque::new()),
            fail_after: Mutex::new(HashMap::new()),
            shader_kinds: Mutex::new(HashMap::new()),
            uniforms: Mutex::new(HashSet::from(["u_Color".to_string()])),
            next_handle: AtomicU32::new(1),
            rejected_stage: None,
            reject_link: false,
            reject_validation: false,
        }
    }
}

impl RecordingDriver {
    pub const COMPILE_LOG: &'static str = "0:3(1): error: syntax error, unexpected '}'";
    pub const LINK_LOG: &'static str = "error: unresolved symbol main";

    /// Shaders of `shader_type` report a failed compile.
    pub fn rejecting_stage(shader_type: u32) -> Self {
        Self {
            rejected_stage: Some(shader_type),
            ..Self::default()
        }
    }

    /// Every program reports a failed link.
    pub fn rejecting_link() -> Self {
        Self {
            reject_link: true,
            ..Self::default()
        }
    }

    /// Every program links but reports a failed validation.
    pub fn rejecting_validation() -> Self {
        Self {
            reject_validation: true,
            ..Self::default()
        }
    }

    /// Queues `code` on the error queue right after the next call named `call`.
    pub fn fail_after(&self, call: &'static str, code: u32) {
        self.fail_after.lock().unwrap().insert(call, code);
    }

    /// Queues `code` immediately, as if an earlier call had failed.
    pub fn push_error(&self, code: u32) {
        self.errors.lock().unwrap().push_back(code);
    }

    pub fn forget_uniform(&self, name: &str) {
        self.uniforms.lock().unwrap().remove(name);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(*c)).count()
    }

    fn record(&self, call: Call) {
        if let Some(code) = self.fail_after.lock().unwrap().remove(call.name()) {
            self.errors.lock().unwrap().push_back(code);
        }
        self.calls.lock().unwrap().push(call);
    }

    fn handle(&self) -> u32 {
        self.next_handle.fetch_add(1, Ordering::Relaxed)
    }
}

impl Driver for RecordingDriver {
    type Buffer = u32;
    type VertexArray = u32;
    type Shader = u32;
    type Program = u32;
    type UniformLocation = u32;

    fn get_error(&self) -> u32 {
        self.errors
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(glow::NO_ERROR)
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let id = self.handle();
        self.record(Call::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        self.record(Call::BufferData {
            target,
            len: data.len(),
            usage,
        });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let id = self.handle();
        self.record(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, array: Option<u32>) {
        self.record(Call::BindVertexArray(array));
    }

    fn delete_vertex_array(&self, array: u32) {
        self.record(Call::DeleteVertexArray(array));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record(Call::VertexAttribPointer {
            index,
            size,
            data_type,
            normalized,
            stride,
            offset,
        });
    }

    fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        let id = self.handle();
        self.shader_kinds.lock().unwrap().insert(id, shader_type);
        self.record(Call::CreateShader(id, shader_type));
        Ok(id)
    }

    fn shader_source(&self, shader: u32, _source: &str) {
        self.record(Call::ShaderSource(shader));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.record(Call::GetShaderiv(shader));
        let kind = self.shader_kinds.lock().unwrap().get(&shader).copied();
        self.rejected_stage.is_none() || kind != self.rejected_stage
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.record(Call::GetShaderInfoLog(shader));
        Self::COMPILE_LOG.to_string()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.handle();
        self.record(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.record(Call::GetProgramiv(program, glow::LINK_STATUS));
        !self.reject_link
    }

    fn validate_program(&self, program: u32) {
        self.record(Call::ValidateProgram(program));
    }

    fn program_validate_status(&self, program: u32) -> bool {
        self.record(Call::GetProgramiv(program, glow::VALIDATE_STATUS));
        !self.reject_validation
    }

    fn program_info_log(&self, program: u32) -> String {
        self.record(Call::GetProgramInfoLog(program));
        Self::LINK_LOG.to_string()
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.record(Call::UniformLocation(name.to_string()));
        let uniforms = self.uniforms.lock().unwrap();
        let mut names: Vec<&String> = uniforms.iter().collect();
        names.sort();
        names.iter().position(|n| *n == name).map(|i| i as u32)
    }

    fn uniform_1_f32(&self, location: &u32, x: f32) {
        self.record(Call::Uniform1f(*location, x));
    }

    fn uniform_4_f32(&self, location: &u32, x: f32, y: f32, z: f32, w: f32) {
        self.record(Call::Uniform4f(*location, [x, y, z, w]));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        self.record(Call::DrawElements {
            mode,
            count,
            element_type,
            offset,
        });
    }
}
