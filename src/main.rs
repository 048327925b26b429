use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use glam::Vec2;
use tracing::{error, info, trace};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod math;
mod renderer;
mod scene;
mod ui;

use config::DemoConfig;
use error::DemoError;
use math::SHAPES;
use renderer::{GpuState, ShapeStats};
use scene::{ChaseState, InputState, RenderMode};
use ui::{UiState, apply_theme, draw_help_overlay, draw_hud};

struct App {
    config: DemoConfig,

    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    egui_ctx: egui::Context,

    ui_state: UiState,
    shape_stats: Vec<ShapeStats>,
    input: InputState,
    mode: RenderMode,
    chase: ChaseState,
    start: Instant,

    fatal: Option<DemoError>,
}

impl App {
    fn new(config: DemoConfig) -> Self {
        let now = Instant::now();
        Self {
            ui_state: UiState::new(config.show_hud, now),
            shape_stats: Vec::new(),
            input: InputState {
                cursor: Vec2::ZERO,
                window: Vec2::new(config.width as f32, config.height as f32),
            },
            config,
            window: None,
            gpu: None,
            egui_state: None,
            egui_renderer: None,
            egui_ctx: egui::Context::default(),
            mode: RenderMode::Wireframe,
            chase: ChaseState::default(),
            start: now,
            fatal: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: DemoError) {
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), DemoError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_position(PhysicalPosition::new(
                self.config.position.0,
                self.config.position.1,
            ))
            .with_resizable(self.config.resizable);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let mut gpu = pollster::block_on(GpuState::new(window.clone(), &self.config))?;

        let meshes: Vec<_> = SHAPES
            .iter()
            .map(|def| (def.id, def.id.build()))
            .collect();
        self.shape_stats = ShapeStats::collect(&meshes);
        gpu.upload_meshes(meshes);

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            self.egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2048),
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        apply_theme(&self.egui_ctx);

        let size = window.inner_size();
        self.input.window = Vec2::new(size.width as f32, size.height as f32);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
        self.start = Instant::now();

        info!(mode = self.mode.name(), "ready");
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        if let Some(mode) = RenderMode::from_key(key) {
            if mode != self.mode {
                info!(from = self.mode.name(), to = mode.name(), "render mode changed");
                self.mode = mode;
            }
            return;
        }

        match key {
            KeyCode::KeyH => self.ui_state.toggle_hud(),
            KeyCode::Escape => event_loop.exit(),
            _ => {}
        }
    }

    fn render(&mut self) -> Result<(), DemoError> {
        let (Some(window), Some(egui_state)) = (&self.window, &mut self.egui_state) else {
            return Ok(());
        };

        let frame = self.input.snapshot(self.start.elapsed().as_secs_f32());
        let commands = (self.mode.strategy())(&frame, &mut self.chase);
        trace!(draws = commands.len(), elapsed = frame.elapsed, "frame");

        let raw_input = egui_state.take_egui_input(window);

        let stats = &self.shape_stats;
        let mode = self.mode;
        let ui_state = &self.ui_state;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if ui_state.show_hud {
                draw_hud(ctx, ui_state, mode, stats);
                draw_help_overlay(ctx, frame.mouse);
            }
        });

        let Some(gpu) = &mut self.gpu else {
            return Ok(());
        };
        let Some(egui_renderer) = &mut self.egui_renderer else {
            return Ok(());
        };

        egui_state.handle_platform_output(window, full_output.platform_output);

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.resize(gpu.size);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(DemoError::OutOfMemory);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                return Ok(());
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, id, &delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        gpu.render_scene(&view, &mut encoder, &commands);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            egui_renderer.free_texture(&id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        self.ui_state.tick(Instant::now());
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(egui_state), Some(window)) = (&mut self.egui_state, &self.window) {
            let response = egui_state.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                }
                self.input.window = Vec2::new(size.width as f32, size.height as f32);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let PhysicalKey::Code(key) = event.physical_key {
                        self.handle_key(event_loop, key);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.input.cursor = Vec2::new(position.x as f32, position.y as f32);
            }

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.render() {
                    self.fail(event_loop, err);
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn run() -> Result<(), DemoError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(DemoConfig::default());
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        error!("{err}");
        std::process::exit(-1);
    }
}
