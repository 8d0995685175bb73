use std::fmt::Debug;

use anyhow::{anyhow, Result};
use glarea::{
    glam::Mat4,
    glow::{
        Context, HasContext, NativeBuffer, NativeProgram, NativeUniformLocation,
        NativeVertexArray, ARRAY_BUFFER, BUFFER_SIZE, COLOR_BUFFER_BIT, DEPTH_BUFFER_BIT,
        ELEMENT_ARRAY_BUFFER, FLOAT, STATIC_DRAW, TRIANGLES, UNSIGNED_SHORT,
    },
    LoadShaders,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    Array,
    Element,
}

impl BufferTarget {
    fn gl_enum(self) -> u32 {
        match self {
            BufferTarget::Array => ARRAY_BUFFER,
            BufferTarget::Element => ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// Where one float attribute lives inside an interleaved vertex buffer.
/// All values are in the units GL expects: components, then bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttribLayout {
    pub components: i32,
    pub stride: i32,
    pub offset: i32,
}

/// The GL calls the cube needs, and nothing more.
pub trait Graphics {
    type Buffer: Copy + Debug;
    type Program: Copy + Debug;
    type VertexArray: Copy + Debug;
    type UniformLocation: Clone + Debug;

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32);
    /// Clears both color and depth.
    fn clear(&self);

    fn create_vertex_array(&self) -> Result<Self::VertexArray>;
    fn bind_vertex_array(&self, vertex_array: Self::VertexArray);

    fn create_buffer(&self) -> Result<Self::Buffer>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Self::Buffer);
    /// Uploads to whatever is bound to `target`, as static data.
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);
    /// Byte size of whatever is bound to `target`.
    fn buffer_size(&self, target: BufferTarget) -> i32;

    fn compile_program(&self, shaders: LoadShaders) -> Result<Self::Program>;
    fn use_program(&self, program: Self::Program);
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    fn enable_attrib(&self, location: u32);
    fn disable_attrib(&self, location: u32);
    fn attrib_pointer(&self, location: u32, layout: AttribLayout);

    /// Indexed triangle list, `u16` indices, from the start of the bound
    /// element buffer.
    fn draw_triangles_u16(&self, count: i32);
    fn uniform_mat4(&self, location: &Self::UniformLocation, matrix: &Mat4);
}

impl Graphics for Context {
    type Buffer = NativeBuffer;
    type Program = NativeProgram;
    type VertexArray = NativeVertexArray;
    type UniformLocation = NativeUniformLocation;

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        unsafe { HasContext::clear_color(self, red, green, blue, alpha) }
    }

    fn clear(&self) {
        unsafe { HasContext::clear(self, COLOR_BUFFER_BIT | DEPTH_BUFFER_BIT) }
    }

    fn create_vertex_array(&self) -> Result<NativeVertexArray> {
        unsafe { HasContext::create_vertex_array(self) }
            .map_err(|e| anyhow!("cannot create vertex array: {e}"))
    }

    fn bind_vertex_array(&self, vertex_array: NativeVertexArray) {
        unsafe { HasContext::bind_vertex_array(self, Some(vertex_array)) }
    }

    fn create_buffer(&self) -> Result<NativeBuffer> {
        unsafe { HasContext::create_buffer(self) }
            .map_err(|e| anyhow!("cannot create buffer: {e}"))
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: NativeBuffer) {
        unsafe { HasContext::bind_buffer(self, target.gl_enum(), Some(buffer)) }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        unsafe { self.buffer_data_u8_slice(target.gl_enum(), data, STATIC_DRAW) }
    }

    fn buffer_size(&self, target: BufferTarget) -> i32 {
        unsafe { self.get_buffer_parameter_i32(target.gl_enum(), BUFFER_SIZE) }
    }

    fn compile_program(&self, shaders: LoadShaders) -> Result<NativeProgram> {
        shaders.compile(self)
    }

    fn use_program(&self, program: NativeProgram) {
        unsafe { HasContext::use_program(self, Some(program)) }
    }

    fn attrib_location(&self, program: NativeProgram, name: &str) -> Option<u32> {
        unsafe { self.get_attrib_location(program, name) }
    }

    fn uniform_location(
        &self,
        program: NativeProgram,
        name: &str,
    ) -> Option<NativeUniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn enable_attrib(&self, location: u32) {
        unsafe { self.enable_vertex_attrib_array(location) }
    }

    fn disable_attrib(&self, location: u32) {
        unsafe { self.disable_vertex_attrib_array(location) }
    }

    fn attrib_pointer(&self, location: u32, layout: AttribLayout) {
        unsafe {
            self.vertex_attrib_pointer_f32(
                location,
                layout.components,
                FLOAT,
                false,
                layout.stride,
                layout.offset,
            )
        }
    }

    fn draw_triangles_u16(&self, count: i32) {
        unsafe { self.draw_elements(TRIANGLES, count, UNSIGNED_SHORT, 0) }
    }

    fn uniform_mat4(&self, location: &NativeUniformLocation, matrix: &Mat4) {
        unsafe {
            self.uniform_matrix_4_f32_slice(Some(location), false, &matrix.to_cols_array())
        }
    }
}
