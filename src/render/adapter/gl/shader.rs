// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! Shader compilation, linking and uniform reflection.
//!
//! [`build_program`] either returns a fully linked and reflected
//! [`ShaderProgram`] or an error, and in the error case every GL object it
//! created has already been deleted.

use crate::{
    error::{ShaderError, Stage},
    reload::ProgramFactory,
    render::adapter::gl::shader_source::{fragment_source, vertex_source},
    uniform::{base_name, UniformInfo, UniformKind, UniformTable},
};
use glow::HasContext;
use log::debug;
use std::sync::Arc;

/// A linked GL program together with its active uniforms.
///
/// Owns the program object and deletes it exactly once on drop.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    program: glow::Program,
    uniforms: UniformTable,
}

impl ShaderProgram {
    pub fn bind(&self) {
        unsafe {
            self.gl.use_program(Some(self.program));
        }
    }

    pub fn uniforms(&self) -> &UniformTable {
        &self.uniforms
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
        }
    }
}

/// Compile one stage, deleting the shader object if compilation fails
fn compile_stage(
    gl: &glow::Context,
    stage: Stage,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    let shader_type = match stage {
        Stage::Vertex => glow::VERTEX_SHADER,
        Stage::Fragment => glow::FRAGMENT_SHADER,
    };
    unsafe {
        let shader = gl.create_shader(shader_type).map_err(ShaderError::Create)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(ShaderError::Compile { stage, log });
        }
        Ok(shader)
    }
}

/// Enumerate the active uniforms of a linked program.
///
/// Uniforms the linker optimised away are not listed.
pub fn reflect_uniforms(gl: &glow::Context, program: glow::Program) -> UniformTable {
    let mut table = UniformTable::new();
    unsafe {
        let count = gl.get_active_uniforms(program);
        for index in 0..count {
            let Some(active) = gl.get_active_uniform(program, index) else {
                continue;
            };
            let Some(location) = gl.get_uniform_location(program, &active.name) else {
                // uniforms inside blocks have no location
                continue;
            };
            table.insert(
                base_name(&active.name).to_string(),
                UniformInfo {
                    location: location.0,
                    kind: UniformKind::from_gl(active.utype),
                },
            );
        }
    }
    table
}

/// Build a program from the user's fragment code and `channels` samplers
pub fn build_program(
    gl: &Arc<glow::Context>,
    body: &str,
    channels: usize,
) -> Result<ShaderProgram, ShaderError> {
    let vs = compile_stage(gl, Stage::Vertex, &vertex_source())?;
    let fs = match compile_stage(gl, Stage::Fragment, &fragment_source(body, channels)) {
        Ok(fs) => fs,
        Err(e) => {
            unsafe { gl.delete_shader(vs) };
            return Err(e);
        }
    };

    unsafe {
        let program = match gl.create_program() {
            Ok(p) => p,
            Err(e) => {
                gl.delete_shader(vs);
                gl.delete_shader(fs);
                return Err(ShaderError::Create(e));
            }
        };
        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);

        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(ShaderError::Link(log));
        }

        let uniforms = reflect_uniforms(gl, program);
        debug!("linked program {:?}, {} active uniforms", program, uniforms.len());
        Ok(ShaderProgram {
            gl: gl.clone(),
            program,
            uniforms,
        })
    }
}

/// [`ProgramFactory`] backed by a live GL context
pub struct GlProgramFactory {
    gl: Arc<glow::Context>,
    channels: usize,
}

impl GlProgramFactory {
    pub fn new(gl: Arc<glow::Context>, channels: usize) -> Self {
        Self { gl, channels }
    }
}

impl ProgramFactory for GlProgramFactory {
    type Program = ShaderProgram;

    fn build(&mut self, source: &str) -> Result<ShaderProgram, ShaderError> {
        build_program(&self.gl, source, self.channels)
    }
}
