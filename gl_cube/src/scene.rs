use std::mem::size_of;

use anyhow::{anyhow, Context as _, Result};
use glarea::{glam::Mat4, LoadShaders};

use crate::cube::{Vertex, INDICES, VERTICES};
use crate::gfx::{BufferTarget, Graphics};

pub const POSITION_ATTRIBUTE: &str = "coord3d";
pub const COLOR_ATTRIBUTE: &str = "v_color";
pub const MVP_UNIFORM: &str = "mvp";

/// The cube's GPU side: buffers, program and the bindings resolved in it.
pub struct Scene<G: Graphics> {
    program: G::Program,
    #[allow(unused)]
    vertex_array: G::VertexArray,
    vertex_buffer: G::Buffer,
    index_buffer: G::Buffer,
    coord3d: u32,
    v_color: u32,
    mvp: G::UniformLocation,
}

impl<G: Graphics> Scene<G> {
    /// Needs a current context. Fails on the first shader problem or
    /// binding that cannot be resolved.
    pub fn init(gfx: &G, shaders: LoadShaders) -> Result<Self> {
        let vertex_array = gfx.create_vertex_array()?;
        gfx.bind_vertex_array(vertex_array);

        let program = gfx
            .compile_program(shaders)
            .context("cannot build cube program")?;

        let vertex_buffer = gfx.create_buffer()?;
        gfx.bind_buffer(BufferTarget::Array, vertex_buffer);
        gfx.buffer_data(BufferTarget::Array, bytemuck::cast_slice(&VERTICES));

        let index_buffer = gfx.create_buffer()?;
        gfx.bind_buffer(BufferTarget::Element, index_buffer);
        gfx.buffer_data(BufferTarget::Element, bytemuck::cast_slice(&INDICES));

        let coord3d = attribute(gfx, program, POSITION_ATTRIBUTE)?;
        let v_color = attribute(gfx, program, COLOR_ATTRIBUTE)?;
        let mvp = gfx
            .uniform_location(program, MVP_UNIFORM)
            .ok_or_else(|| anyhow!("could not bind uniform {MVP_UNIFORM}"))?;

        Ok(Scene {
            program,
            vertex_array,
            vertex_buffer,
            index_buffer,
            coord3d,
            v_color,
            mvp,
        })
    }

    /// Draws the whole index buffer. Nothing carries over from the last call.
    pub fn render(&self, gfx: &G) {
        gfx.use_program(self.program);
        gfx.enable_attrib(self.coord3d);
        gfx.enable_attrib(self.v_color);

        gfx.bind_buffer(BufferTarget::Array, self.vertex_buffer);
        gfx.attrib_pointer(self.coord3d, Vertex::POSITION);
        gfx.attrib_pointer(self.v_color, Vertex::COLOR);

        gfx.bind_buffer(BufferTarget::Element, self.index_buffer);
        let size = gfx.buffer_size(BufferTarget::Element);
        gfx.draw_triangles_u16(size / size_of::<u16>() as i32);

        gfx.disable_attrib(self.coord3d);
        gfx.disable_attrib(self.v_color);
    }

    pub fn set_mvp(&self, gfx: &G, mvp: &Mat4) {
        gfx.use_program(self.program);
        gfx.uniform_mat4(&self.mvp, mvp);
    }
}

fn attribute<G: Graphics>(gfx: &G, program: G::Program, name: &str) -> Result<u32> {
    gfx.attrib_location(program, name)
        .ok_or_else(|| anyhow!("could not bind attribute {name}"))
}
