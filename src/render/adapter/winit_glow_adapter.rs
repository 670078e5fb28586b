// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! # Winit + Glow window
//!
//! Window and OpenGL context creation based on the winit + glutin + glow
//! technology stack.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 GlWindow                    │
//! ├─────────────────────────────────────────────┤
//! │  Window Management  │  OpenGL Context       │
//! │  - winit::Window    │  - glutin::Context    │
//! │                     │  - glutin::Surface    │
//! │                     │  - glow::Context      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The window has to be created from inside winit's `resumed` callback, so
//! [`GlWindow::create`] takes the active event loop.

use crate::{config::WindowConfig, error::ViewerError};
use glutin::{
    config::{ConfigTemplateBuilder, GlConfig},
    context::{
        ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext,
        PossiblyCurrentContext, Version,
    },
    display::{GetGlDisplay, GlDisplay},
    prelude::GlSurface,
    surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface},
};
use glutin_winit::DisplayBuilder;
use log::{info, warn};
use std::{
    num::NonZeroU32,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};
use winit::{
    dpi::LogicalSize, event_loop::ActiveEventLoop, raw_window_handle::HasWindowHandle,
    window::Window,
};

/// A window with a current OpenGL 3.3 core context
pub struct GlWindow {
    pub gl: Arc<glow::Context>,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    pub window: Window,
}

const NO_GL_CONFIG: &str = "no usable OpenGL config offered";

fn non_zero(v: u32) -> NonZeroU32 {
    NonZeroU32::new(v).unwrap_or(NonZeroU32::MIN)
}

/// Config with the most samples; the first one wins ties
fn most_samples<C>(configs: impl Iterator<Item = C>, samples: impl Fn(&C) -> u8) -> Option<C> {
    configs.reduce(|accum, config| {
        if samples(&config) > samples(&accum) {
            config
        } else {
            accum
        }
    })
}

impl GlWindow {
    pub fn create(
        event_loop: &ActiveEventLoop,
        params: &WindowConfig,
        title: &str,
    ) -> Result<Self, ViewerError> {
        info!("Creating OpenGL window and context...");

        let template = ConfigTemplateBuilder::new();
        let display_builder = DisplayBuilder::new().with_window_attributes(Some(
            Window::default_attributes()
                .with_title(title)
                .with_inner_size(LogicalSize::new(params.width, params.height))
                .with_resizable(true),
        ));

        // the picker has to return a config, so an empty list unwinds out of
        // `build` and is reported as an error here
        let built = panic::catch_unwind(AssertUnwindSafe(|| {
            display_builder.build(event_loop, template, |configs| {
                most_samples(configs, |c| c.num_samples()).expect(NO_GL_CONFIG)
            })
        }));
        let (window, gl_config) = match built {
            Ok(result) => result.map_err(|e| ViewerError::Window(e.to_string()))?,
            Err(_) => return Err(ViewerError::Window(NO_GL_CONFIG.to_string())),
        };

        let window = window.ok_or_else(|| ViewerError::Window("no window created".into()))?;
        let raw_window_handle = window
            .window_handle()
            .map_err(|e| ViewerError::Window(e.to_string()))?
            .as_raw();

        let gl_display = gl_config.display();
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));
        let not_current_gl_context =
            unsafe { gl_display.create_context(&gl_config, &context_attributes)? };

        let physical_size = window.inner_size();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            non_zero(physical_size.width),
            non_zero(physical_size.height),
        );
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs)? };
        let gl_context = not_current_gl_context.make_current(&gl_surface)?;

        let interval = if params.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = gl_surface.set_swap_interval(&gl_context, interval) {
            warn!("could not set swap interval: {}", e);
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|s| gl_display.get_proc_address(s))
        };

        info!(
            "Window created - logical: {}x{}, physical: {}x{}",
            params.width, params.height, physical_size.width, physical_size.height
        );

        Ok(Self {
            gl: Arc::new(gl),
            gl_surface,
            gl_context,
            window,
        })
    }

    /// Current drawable size in physical pixels
    pub fn physical_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.gl_surface
            .resize(&self.gl_context, non_zero(width), non_zero(height));
    }

    pub fn swap_buffers(&self) -> Result<(), ViewerError> {
        self.gl_surface.swap_buffers(&self.gl_context)?;
        Ok(())
    }
}
