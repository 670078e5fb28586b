// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! The full-screen quad and the GL implementation of [`UniformSink`].
//!
//! The vertex stage generates its own positions from gl_VertexID, so the
//! quad is just an empty vertex array object that core profile requires to
//! be bound for glDrawArrays.

use crate::{error::ViewerError, frame::UniformSink};
use glow::HasContext;
use std::sync::Arc;

pub struct FullscreenQuad {
    gl: Arc<glow::Context>,
    vao: glow::VertexArray,
}

impl FullscreenQuad {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, ViewerError> {
        let vao = unsafe { gl.create_vertex_array().map_err(ViewerError::Gpu)? };
        Ok(Self {
            gl: gl.clone(),
            vao,
        })
    }

    pub fn bind(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
        }
    }
}

impl Drop for FullscreenQuad {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

/// Writes uniforms of the currently bound program
pub struct GlUniformSink<'a> {
    gl: &'a glow::Context,
}

impl<'a> GlUniformSink<'a> {
    pub fn new(gl: &'a glow::Context) -> Self {
        Self { gl }
    }
}

fn loc(location: u32) -> glow::UniformLocation {
    glow::NativeUniformLocation(location)
}

impl UniformSink for GlUniformSink<'_> {
    fn set_int(&mut self, location: u32, v: i32) {
        unsafe { self.gl.uniform_1_i32(Some(&loc(location)), v) }
    }

    fn set_float(&mut self, location: u32, v: f32) {
        unsafe { self.gl.uniform_1_f32(Some(&loc(location)), v) }
    }

    fn set_vec3(&mut self, location: u32, v: [f32; 3]) {
        unsafe { self.gl.uniform_3_f32(Some(&loc(location)), v[0], v[1], v[2]) }
    }

    fn set_vec4(&mut self, location: u32, v: [f32; 4]) {
        unsafe {
            self.gl
                .uniform_4_f32(Some(&loc(location)), v[0], v[1], v[2], v[3])
        }
    }

    fn set_vec3_array(&mut self, location: u32, v: &[[f32; 3]]) {
        let flat: Vec<f32> = v.iter().flatten().copied().collect();
        unsafe { self.gl.uniform_3_f32_slice(Some(&loc(location)), &flat) }
    }

    fn draw_triangles(&mut self, vertex_count: i32) {
        unsafe { self.gl.draw_arrays(glow::TRIANGLES, 0, vertex_count) }
    }
}
