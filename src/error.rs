// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! Error types.
//!
//! [`ShaderError`] covers everything that can go wrong while building a
//! program from the watched file; it is logged and absorbed by the reload
//! controller. [`ViewerError`] is fatal and ends the process.

use std::{fmt, io, path::PathBuf};

/// Shader stage, used to label compile diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Vertex => write!(f, "vertex"),
            Stage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Failure to build a program from shader text
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShaderError {
    /// The driver refused to allocate a shader or program object
    #[error("cannot create GL object: {0}")]
    Create(String),

    #[error("{stage} shader compilation failed:\n{log}")]
    Compile { stage: Stage, log: String },

    #[error("program linking failed:\n{0}")]
    Link(String),
}

/// Fatal errors that stop the viewer
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("could not open shader file '{path}': {source}")]
    ShaderFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to load texture '{path}': {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    ConfigValue(String),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Window, GL context or surface failure reported by winit/glutin
    #[error("window system error: {0}")]
    Window(String),

    /// GPU resource creation failure outside the reload cycle
    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("failed to initialise logging: {0}")]
    Log(String),
}

impl From<glutin::error::Error> for ViewerError {
    fn from(e: glutin::error::Error) -> Self {
        ViewerError::Window(e.to_string())
    }
}
