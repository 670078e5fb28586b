// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! Viewer encapsulates the window, the shader scene and the control panel
//! and implements the main loop.
//!
//! Every frame, in order: pump window events, sample window size and the
//! shader file (every `poll_frames` frames), clear, draw the quad with the
//! current program, draw the panel, swap buffers.

use crate::{
    config::{Args, ViewerConfig},
    error::ViewerError,
    frame::{draw_frame, Cadence, FrameInputs, MouseState},
    log::init_log,
    panel::ControlPanel,
    reload::HotReload,
    render::adapter::{
        gl::{
            quad::{FullscreenQuad, GlUniformSink},
            shader::{GlProgramFactory, ShaderProgram},
            texture::{GlTexture, TextureImage},
        },
        winit_glow_adapter::GlWindow,
    },
    uniform::UniformValueStore,
};
use egui_glow::EguiGlow;
use glow::HasContext;
use log::{debug, info};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::WindowId,
};

/// Key that shows/hides the control panel
pub const TOGGLE_PANEL_KEY: KeyCode = KeyCode::F1;

fn toggles_panel(key: PhysicalKey, state: ElementState, repeat: bool) -> bool {
    key == PhysicalKey::Code(TOGGLE_PANEL_KEY) && state == ElementState::Pressed && !repeat
}

/// Mouse state as reported by winit, top-left origin
#[derive(Debug, Clone, Copy, Default)]
struct InputState {
    cursor: (f64, f64),
    left: bool,
    right: bool,
}

impl InputState {
    /// Mouse uniform for a drawable of the given height (bottom-left origin)
    fn mouse(&self, height: u32) -> MouseState {
        MouseState {
            x: self.cursor.0 as f32,
            y: height as f32 - self.cursor.1 as f32,
            left: self.left,
            right: self.right,
        }
    }
}

/// GPU side of the viewer: program, textures and the quad
struct Scene {
    gl: Arc<glow::Context>,
    reload: HotReload<ShaderProgram>,
    factory: GlProgramFactory,
    textures: Vec<GlTexture>,
    quad: FullscreenQuad,
    size: (u32, u32),
    frame: u64,
    cadence: Cadence,
}

impl Scene {
    fn new(
        gl: &Arc<glow::Context>,
        shader: &Path,
        images: Vec<TextureImage>,
        poll_frames: u64,
    ) -> Result<Self, ViewerError> {
        let textures = images
            .into_iter()
            .map(|img| GlTexture::upload(gl, img))
            .collect::<Result<Vec<_>, _>>()?;
        let quad = FullscreenQuad::new(gl)?;
        unsafe {
            gl.disable(glow::DEPTH_TEST);
        }
        Ok(Self {
            gl: gl.clone(),
            reload: HotReload::new(shader),
            factory: GlProgramFactory::new(gl.clone(), textures.len()),
            textures,
            quad,
            size: (0, 0),
            frame: 0,
            cadence: Cadence::new(poll_frames),
        })
    }

    fn draw(&self, now: Instant, input: &InputState, store: &UniformValueStore) {
        let gl = &self.gl;
        let (width, height) = self.size;
        unsafe {
            // the GUI pass leaves its own state behind
            gl.disable(glow::SCISSOR_TEST);
            gl.disable(glow::BLEND);
            gl.viewport(0, 0, width as i32, height as i32);
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }

        let Some(program) = self.reload.current() else {
            return;
        };
        program.bind();
        self.quad.bind();
        for (unit, texture) in self.textures.iter().enumerate() {
            texture.bind(unit as u32);
        }

        let inputs = FrameInputs {
            time: self.reload.elapsed(now),
            width,
            height,
            mouse: input.mouse(height),
            frame: self.frame as i32,
            channels: self.textures.iter().map(|t| t.resolution()).collect(),
        };
        draw_frame(
            &mut GlUniformSink::new(gl),
            program.uniforms(),
            &inputs,
            store,
        );
    }
}

struct Graphics {
    egui: EguiGlow,
    scene: Scene,
    window: GlWindow,
}

impl Graphics {
    fn create(
        event_loop: &ActiveEventLoop,
        config: &ViewerConfig,
        shader: &Path,
        images: Vec<TextureImage>,
    ) -> Result<Self, ViewerError> {
        let title = format!("{} - {}", config.window.title, shader.display());
        let window = GlWindow::create(event_loop, &config.window, &title)?;
        let scene = Scene::new(&window.gl, shader, images, config.poll_frames)?;
        let egui = EguiGlow::new(event_loop, window.gl.clone(), None, None, true);
        Ok(Self {
            egui,
            scene,
            window,
        })
    }

    /// GUI backend first, then GL objects, then the context and window
    fn destroy(self) {
        let Graphics {
            mut egui,
            scene,
            window,
        } = self;
        egui.destroy();
        drop(egui);
        drop(scene);
        drop(window);
    }
}

pub struct Viewer {
    config: ViewerConfig,
    shader: PathBuf,
    /// decoded images waiting for a GL context
    images: Vec<TextureImage>,
    gfx: Option<Graphics>,
    input: InputState,
    store: UniformValueStore,
    panel: ControlPanel,
    should_exit: bool,
    fatal: Option<ViewerError>,
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gfx.is_some() {
            return;
        }
        let images = std::mem::take(&mut self.images);
        match Graphics::create(event_loop, &self.config, &self.shader, images) {
            Ok(gfx) => {
                info!("OpenGL window & context initialized successfully");
                self.gfx = Some(gfx);
            }
            Err(e) => {
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(gfx) = self.gfx.as_mut() else {
            return;
        };
        let consumed = gfx
            .egui
            .on_window_event(&gfx.window.window, &event)
            .consumed;

        match event {
            WindowEvent::CloseRequested => {
                self.should_exit = true;
                event_loop.exit();
            }
            // the toggle key works even while a panel field has focus
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        repeat,
                        ..
                    },
                ..
            } if toggles_panel(physical_key, state, repeat) => {
                self.panel.toggle();
                debug!("control panel visible: {}", self.panel.is_visible());
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.cursor = (position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == ElementState::Pressed;
                // clicks on the panel are not forwarded to the shader
                if pressed && consumed {
                    return;
                }
                match button {
                    MouseButton::Left => self.input.left = pressed,
                    MouseButton::Right => self.input.right = pressed,
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

impl Viewer {
    pub fn new(config: ViewerConfig, shader: PathBuf, images: Vec<TextureImage>) -> Self {
        let panel = ControlPanel::new(&config.control_prefix, config.show_panel);
        Self {
            config,
            shader,
            images,
            gfx: None,
            input: InputState::default(),
            store: UniformValueStore::new(),
            panel,
            should_exit: false,
            fatal: None,
        }
    }

    /// One frame after events have been pumped
    fn tick(&mut self, now: Instant) -> Result<(), ViewerError> {
        let Some(gfx) = self.gfx.as_mut() else {
            return Ok(());
        };
        let scene = &mut gfx.scene;

        if scene.cadence.is_due(scene.frame) {
            let size = gfx.window.physical_size();
            if size != scene.size {
                gfx.window.resize(size.0, size.1);
                scene.size = size;
                debug!("viewport {}x{}", size.0, size.1);
            }
            scene.reload.check(&mut scene.factory, now);
        }

        scene.draw(now, &self.input, &self.store);

        let panel = &self.panel;
        let store = &mut self.store;
        let table = scene.reload.current().map(|p| p.uniforms());
        gfx.egui.run(&gfx.window.window, |ctx| {
            if let Some(table) = table {
                panel.show(ctx, table, store);
            }
        });
        gfx.egui.paint(&gfx.window.window);

        gfx.window.swap_buffers()?;
        scene.frame = scene.frame.wrapping_add(1);
        Ok(())
    }

    fn shutdown(&mut self) {
        if let Some(gfx) = self.gfx.take() {
            info!("shutting down");
            gfx.destroy();
        }
    }
}

/// Fail before any window exists if the shader cannot be read
fn check_shader(path: &Path) -> Result<(), ViewerError> {
    fs::read_to_string(path)
        .map(|_| ())
        .map_err(|source| ViewerError::ShaderFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Entry point: load config, validate inputs, run the main loop
pub fn run(args: Args) -> Result<(), ViewerError> {
    let config = args.load_config()?;
    init_log(config.log_level()?, config.log.file.as_deref())?;
    info!("shaderdude start...{:?}", args.shader);

    check_shader(&args.shader)?;
    let images = args
        .textures
        .iter()
        .map(|p| TextureImage::open(p))
        .collect::<Result<Vec<_>, _>>()?;

    let mut event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut viewer = Viewer::new(config, args.shader, images);

    let result = loop {
        let status = event_loop.pump_app_events(Some(Duration::ZERO), &mut viewer);
        if let Some(e) = viewer.fatal.take() {
            break Err(e);
        }
        if viewer.should_exit || matches!(status, PumpStatus::Exit(_)) {
            break Ok(());
        }
        if let Err(e) = viewer.tick(Instant::now()) {
            break Err(e);
        }
    };

    viewer.shutdown();
    result
}
