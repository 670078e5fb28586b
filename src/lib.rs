// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! shaderdude is a live-reloading fragment shader viewer.
//!
//! It watches a GLSL file that defines
//! `void mainImage(out vec4 fragColor, in vec2 fragCoord)`, rebuilds it
//! whenever the file changes and draws it over the whole window. A failed
//! build keeps the previous shader on screen, so the file can be edited
//! freely while the viewer runs.
//!
//! Built-in uniforms: `iTime`, `iResolution`, `iMouse`, `iFrame`,
//! `iChannelN` and `iChannelResolution[N]` for images given on the command
//! line. Uniforms whose name starts with the control prefix (`ctl_` by
//! default) get a widget in the control panel (toggle with F1).
//!
//! Modules, leaf first:
//! - `uniform`: uniform kinds, values and the user value store
//! - `render`: window, GL context, shader building, textures, quad
//! - `reload`: file polling and program replacement
//! - `frame`: per-frame uniform push and draw
//! - `panel`: egui control panel
//! - `config`, `log`, `error`: command line/TOML config, log4rs, error types
//! - `viewer`: the main loop

pub mod config;
pub mod error;
pub mod frame;
pub mod log;
pub mod panel;
pub mod reload;
pub mod render;
pub mod uniform;
pub mod viewer;

pub use config::{Args, ViewerConfig};
pub use error::{ShaderError, ViewerError};
pub use viewer::run;
