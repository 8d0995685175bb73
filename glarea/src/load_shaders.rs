use std::path::Path;

use anyhow::{anyhow, Context as _, Result};
use glow::{Context, HasContext as _, NativeProgram, NativeShader, FRAGMENT_SHADER, VERTEX_SHADER};

/// Vertex and fragment shader sources waiting to be linked into a program.
#[derive(Debug, Clone)]
pub struct LoadShaders {
    vertex: String,
    fragment: String,
}

impl LoadShaders {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        LoadShaders {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    pub fn new_from_path(
        vertex_shader_path: impl AsRef<Path>,
        fragment_shader_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let vertex = read_source(vertex_shader_path.as_ref())?;
        let fragment = read_source(fragment_shader_path.as_ref())?;
        Ok(Self::new(vertex, fragment))
    }

    pub fn vertex(&self) -> &str {
        &self.vertex
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn compile(self, gl: &Context) -> Result<NativeProgram> {
        compile_shaders(
            gl,
            &[(VERTEX_SHADER, self.vertex), (FRAGMENT_SHADER, self.fragment)],
        )
    }
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("cannot read shader source {}", path.display()))
}

fn shader_kind(shader_type: u32) -> &'static str {
    match shader_type {
        VERTEX_SHADER => "vertex",
        FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

fn compile_shaders(gl: &Context, shaders: &[(u32, String)]) -> Result<NativeProgram> {
    unsafe {
        let program = gl.create_program().map_err(|e| anyhow!("cannot create program: {e}"))?;

        let mut compiled: Vec<NativeShader> = Vec::with_capacity(shaders.len());
        let mut failure = None;
        for (shader_type, shader_source) in shaders {
            let shader = match gl.create_shader(*shader_type) {
                Ok(shader) => shader,
                Err(e) => {
                    let kind = shader_kind(*shader_type);
                    failure = Some(anyhow!("cannot create {kind} shader: {e}"));
                    break;
                }
            };
            gl.shader_source(shader, shader_source);
            gl.compile_shader(shader);
            if !gl.get_shader_compile_status(shader) {
                failure = Some(anyhow!(
                    "{} shader failed to compile: {}",
                    shader_kind(*shader_type),
                    gl.get_shader_info_log(shader)
                ));
                gl.delete_shader(shader);
                break;
            }
            gl.attach_shader(program, shader);
            compiled.push(shader);
        }

        if failure.is_none() {
            gl.link_program(program);
            if !gl.get_program_link_status(program) {
                failure = Some(anyhow!(
                    "program failed to link: {}",
                    gl.get_program_info_log(program)
                ));
            }
        }

        for shader in compiled {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }

        if let Some(err) = failure {
            gl.delete_program(program);
            return Err(err);
        }
        Ok(program)
    }
}
