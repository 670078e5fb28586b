// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! # OpenGL objects
//!
//! ```text
//!   shader_source ──▶ shader ──▶ ShaderProgram + UniformTable
//!                                       │
//!   texture ──▶ GlTexture (iChannelN)   │
//!                       │               ▼
//!                       └──────▶ quad::GlUniformSink ──▶ glDrawArrays(6)
//! ```
//!
//! Every GL handle is owned by a type holding an `Arc<glow::Context>` and
//! is deleted in its `Drop`.

/// GLSL source of the fixed vertex stage and the fragment wrapper
pub mod shader_source;

/// Compilation, linking and uniform reflection
pub mod shader;

/// Image decoding and texture upload
pub mod texture;

/// Full-screen quad and uniform upload
pub mod quad;
