// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! Input textures (`iChannelN`).
//!
//! Images are decoded up front into a [`TextureImage`] so a bad file fails
//! before any window exists. Uploading consumes the image, so pixel memory
//! is freed as soon as the GPU copy exists.

use crate::error::ViewerError;
use glow::HasContext;
use image::DynamicImage;
use log::info;
use std::{path::Path, sync::Arc};

/// Decoded RGBA8 pixels, rows flipped so row 0 is the bottom of the image
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    pub fn open(path: &Path) -> Result<Self, ViewerError> {
        let img = image::open(path).map_err(|source| ViewerError::Texture {
            path: path.to_path_buf(),
            source,
        })?;
        let color = img.color();
        let tex = Self::from_image(img);
        info!(
            "texture {:?} decoded ({}x{}, {:?})",
            path, tex.width, tex.height, color
        );
        Ok(tex)
    }

    pub fn from_image(img: DynamicImage) -> Self {
        let rgba = img.flipv().to_rgba8();
        Self {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
        }
    }
}

/// A 2D texture living on the GPU, deleted on drop
pub struct GlTexture {
    gl: Arc<glow::Context>,
    texture: glow::Texture,
    pub width: u32,
    pub height: u32,
}

impl GlTexture {
    pub fn upload(gl: &Arc<glow::Context>, image: TextureImage) -> Result<Self, ViewerError> {
        unsafe {
            let texture = gl.create_texture().map_err(ViewerError::Gpu)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                image.width as i32,
                image.height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(&image.pixels),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::REPEAT as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::REPEAT as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: gl.clone(),
                texture,
                width: image.width,
                height: image.height,
            })
        }
    }

    /// Bind to texture unit `unit`
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
        }
    }

    /// Resolution as seen by the shader: (w, h, 0)
    pub fn resolution(&self) -> [f32; 3] {
        [self.width as f32, self.height as f32, 0.0]
    }
}

impl Drop for GlTexture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.texture);
        }
    }
}
