//! A [Graphics] backend that records calls instead of talking to a GPU.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use anyhow::{bail, Result};
use glarea::{glam::Mat4, LoadShaders};

use crate::gfx::{AttribLayout, BufferTarget, Graphics};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ClearColor([f32; 4]),
    Clear,
    BindVertexArray(usize),
    BindBuffer(BufferTarget, usize),
    BufferData(BufferTarget, Vec<u8>),
    UseProgram(usize),
    EnableAttrib(u32),
    DisableAttrib(u32),
    AttribPointer(u32, AttribLayout),
    DrawTriangles(i32),
    UniformMat4(i32, Mat4),
}

/// Names a shader declares, as the driver would report them.
#[derive(Debug, Default, Clone)]
struct Bindings {
    attributes: Vec<String>,
    uniforms: Vec<String>,
}

impl Bindings {
    fn scan(shaders: &LoadShaders) -> Self {
        let mut bindings = Bindings::default();
        for (line, is_vertex) in shaders
            .vertex()
            .lines()
            .map(|line| (line, true))
            .chain(shaders.fragment().lines().map(|line| (line, false)))
        {
            let line = line.trim();
            let name = line
                .trim_end_matches(';')
                .split_whitespace()
                .last()
                .unwrap_or_default()
                .to_string();
            // Only vertex inputs are attributes.
            if is_vertex && line.starts_with("in ") {
                bindings.attributes.push(name);
            } else if line.starts_with("uniform ") && !bindings.uniforms.contains(&name) {
                bindings.uniforms.push(name);
            }
        }
        bindings
    }
}

#[derive(Debug, Default)]
pub struct Recorder {
    calls: RefCell<Vec<Call>>,
    next_handle: Cell<usize>,
    bound: RefCell<HashMap<BufferTarget, usize>>,
    sizes: RefCell<HashMap<usize, usize>>,
    programs: RefCell<HashMap<usize, Bindings>>,
    fail_compile: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_compile() -> Self {
        Recorder {
            fail_compile: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn draws(&self) -> Vec<i32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::DrawTriangles(count) => Some(*count),
                _ => None,
            })
            .collect()
    }

    pub fn uploads(&self) -> Vec<(BufferTarget, Vec<u8>)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::BufferData(target, data) => Some((*target, data.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn last_mvp(&self) -> Option<Mat4> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            Call::UniformMat4(_, matrix) => Some(*matrix),
            _ => None,
        })
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn handle(&self) -> usize {
        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        handle
    }
}

impl Graphics for Recorder {
    type Buffer = usize;
    type Program = usize;
    type VertexArray = usize;
    type UniformLocation = i32;

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(Call::ClearColor([red, green, blue, alpha]));
    }

    fn clear(&self) {
        self.record(Call::Clear);
    }

    fn create_vertex_array(&self) -> Result<usize> {
        Ok(self.handle())
    }

    fn bind_vertex_array(&self, vertex_array: usize) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn create_buffer(&self) -> Result<usize> {
        Ok(self.handle())
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: usize) {
        self.bound.borrow_mut().insert(target, buffer);
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        if let Some(buffer) = self.bound.borrow().get(&target) {
            self.sizes.borrow_mut().insert(*buffer, data.len());
        }
        self.record(Call::BufferData(target, data.to_vec()));
    }

    fn buffer_size(&self, target: BufferTarget) -> i32 {
        let bound = self.bound.borrow();
        let sizes = self.sizes.borrow();
        bound
            .get(&target)
            .and_then(|buffer| sizes.get(buffer))
            .map_or(0, |&size| size as i32)
    }

    fn compile_program(&self, shaders: LoadShaders) -> Result<usize> {
        if self.fail_compile {
            bail!("vertex shader failed to compile: 0:1: syntax error");
        }
        let program = self.handle();
        self.programs
            .borrow_mut()
            .insert(program, Bindings::scan(&shaders));
        Ok(program)
    }

    fn use_program(&self, program: usize) {
        self.record(Call::UseProgram(program));
    }

    fn attrib_location(&self, program: usize, name: &str) -> Option<u32> {
        let programs = self.programs.borrow();
        let attributes = &programs.get(&program)?.attributes;
        attributes
            .iter()
            .position(|attribute| attribute == name)
            .map(|location| location as u32)
    }

    fn uniform_location(&self, program: usize, name: &str) -> Option<i32> {
        let programs = self.programs.borrow();
        let uniforms = &programs.get(&program)?.uniforms;
        uniforms
            .iter()
            .position(|uniform| uniform == name)
            .map(|location| location as i32)
    }

    fn enable_attrib(&self, location: u32) {
        self.record(Call::EnableAttrib(location));
    }

    fn disable_attrib(&self, location: u32) {
        self.record(Call::DisableAttrib(location));
    }

    fn attrib_pointer(&self, location: u32, layout: AttribLayout) {
        self.record(Call::AttribPointer(location, layout));
    }

    fn draw_triangles_u16(&self, count: i32) {
        self.record(Call::DrawTriangles(count));
    }

    fn uniform_mat4(&self, location: &i32, matrix: &Mat4) {
        self.record(Call::UniformMat4(*location, *matrix));
    }
}
