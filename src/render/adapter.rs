// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! Rendering adapter: an OpenGL window (`winit_glow_adapter`) and the GL
//! objects used to draw the shader (`gl`).

pub mod gl;
pub mod winit_glow_adapter;
