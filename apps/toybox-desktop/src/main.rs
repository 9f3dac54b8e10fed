use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use std::sync::Arc;
use std::time::{Duration, Instant};
use toybox_common::PerspectiveCamera;
use toybox_input::{InputEvent, InputRouter, Key};
use toybox_kernel::Playground;
use toybox_render::DrawList;
use toybox_render_wgpu::WgpuRenderer;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key as WinitKey, KeyCode, NamedKey, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "toybox-desktop", about = "Spinning, bursting, flashing shapes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Seed for every random draw in the session (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Show the overlay with object count and key help (toggle with F1)
    #[arg(long)]
    hud: bool,
}

/// Fatal startup failures. Any of these ends the program.
#[derive(Debug, thiserror::Error)]
enum InitError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create drawing surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("drawing surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Simulation and input state, independent of the GPU.
struct AppState {
    playground: Playground,
    router: InputRouter,
    camera: PerspectiveCamera,
    cursor: Vec2,
    started: Instant,
    show_hud: bool,
}

impl AppState {
    fn new(seed: u64, show_hud: bool) -> Self {
        Self {
            playground: Playground::new(seed),
            router: InputRouter::new(seed ^ 0x9e37_79b9_7f4a_7c15),
            camera: PerspectiveCamera::default(),
            cursor: Vec2::ZERO,
            started: Instant::now(),
            show_hud,
        }
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn handle_input(&mut self, event: InputEvent) {
        let now = self.elapsed();
        for effect in self.router.route(event, &mut self.camera) {
            self.playground.apply(effect, now);
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if key.state != ElementState::Pressed {
            return;
        }
        if key.physical_key == PhysicalKey::Code(KeyCode::F1) {
            self.show_hud = !self.show_hud;
            return;
        }
        self.handle_input(InputEvent::KeyDown(map_key(&key.logical_key)));
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }
        let scene = self.playground.scene();
        egui::Window::new("Toybox")
            .resizable(false)
            .default_pos([12.0, 12.0])
            .show(ctx, |ui| {
                ui.label(format!("Objects: {}", scene.len()));
                ui.label(format!(
                    "Drifting: {}",
                    scene.objects().iter().filter(|o| o.velocity.is_some()).count()
                ));
                ui.label(format!("Frame: {}", self.playground.frame_count()));
                ui.label(format!("Pending timers: {}", self.playground.pending_timers()));
                ui.separator();
                ui.small("Click: burst + flash | Space: bounce | B: burst | C: flash | F1: hide");
            });
    }
}

/// Map a winit logical key onto the keys the router understands.
fn map_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(NamedKey::Space) => Key::Space,
        WinitKey::Character(text) => Key::from_text(text.as_str()),
        _ => Key::Other,
    }
}

/// Everything that only exists once a window is up.
struct GpuContext {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl GpuContext {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext) -> Result<Self, InitError> {
        let attrs = Window::default_attributes()
            .with_title("Toybox")
            .with_inner_size(PhysicalSize::new(1280u32, 720))
            .with_maximized(true);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(InitError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("toybox_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(InitError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(&device, renderer.surface_format(), None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn render(&mut self, state: &AppState, egui_ctx: &EguiContext) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let draws = DrawList::build(state.playground.scene());
        self.renderer
            .render(&self.device, &self.queue, &view, &state.camera, &draws);

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| state.draw_ui(ctx));
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<GpuContext>,
    egui_ctx: EguiContext,
    init_error: Option<InitError>,
}

impl GpuApp {
    fn new(seed: u64, show_hud: bool) -> Self {
        Self {
            state: AppState::new(seed, show_hud),
            gpu: None,
            egui_ctx: EguiContext::default(),
            init_error: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match GpuContext::new(event_loop, &self.egui_ctx) {
            Ok(gpu) => {
                let size = gpu.window.inner_size();
                self.state.handle_input(InputEvent::Resize {
                    width: size.width,
                    height: size.height,
                });
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("initialization failed: {e}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        if self.state.show_hud {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size);
                self.state.handle_input(InputEvent::Resize {
                    width: gpu.config.width,
                    height: gpu.config.height,
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.cursor = Vec2::new(position.x as f32, position.y as f32);
                self.state
                    .handle_input(InputEvent::PointerMove(self.state.cursor));
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Released,
                ..
            } => {
                self.state.handle_input(InputEvent::Click(self.state.cursor));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.state.handle_key(&event);
            }
            WindowEvent::RedrawRequested => {
                let now = self.state.elapsed();
                self.state.playground.frame(now);
                gpu.render(&self.state, &self.egui_ctx);
                gpu.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "toybox-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(seed, cli.hud);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.init_error.take() {
        return Err(e.into());
    }
    Ok(())
}
