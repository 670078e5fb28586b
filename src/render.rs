// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! # Render module
//!
//! ## Submodules
//! - `adapter`: winit + glutin window and the OpenGL objects drawn into it

pub mod adapter;
