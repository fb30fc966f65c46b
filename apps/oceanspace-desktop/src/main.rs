use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use oceanspace_assets::{BuiltinVehicleLoader, GltfVehicleLoader};
use oceanspace_input::{InputState, KeyBindings};
use oceanspace_kernel::{LocomotionConfig, LocomotionKind};
use oceanspace_render_wgpu::OceanRenderer;
use oceanspace_session::{Clock, SimConfig, Simulation, WallClock, launch};
use oceanspace_stream::WavePath;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "oceanspace-desktop", about = "Sail a vehicle across an endless ocean")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML or JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vehicle model (.gltf or .glb); a placeholder hull is used otherwise
    #[arg(long)]
    vehicle: Option<PathBuf>,

    /// Locomotion model: heading_thrust or screen_thrust
    #[arg(short, long)]
    model: Option<LocomotionKind>,

    /// Evaluate waves on the host (cpu) or in the vertex shader (gpu)
    #[arg(long)]
    wave_path: Option<WavePath>,
}

/// Name `KeyBindings` uses for a physical key.
fn key_name(key: KeyCode) -> Option<&'static str> {
    Some(match key {
        KeyCode::KeyW => "w",
        KeyCode::KeyA => "a",
        KeyCode::KeyS => "s",
        KeyCode::KeyD => "d",
        KeyCode::ArrowUp => "arrowup",
        KeyCode::ArrowDown => "arrowdown",
        KeyCode::ArrowLeft => "arrowleft",
        KeyCode::ArrowRight => "arrowright",
        _ => return None,
    })
}

struct GpuApp {
    sim: Simulation,
    clock: WallClock,
    bindings: KeyBindings,
    input: InputState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<OceanRenderer>,
}

impl GpuApp {
    fn new(sim: Simulation) -> Self {
        Self {
            sim,
            clock: WallClock::new(),
            bindings: KeyBindings::default(),
            input: InputState::new(),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode, pressed: bool) {
        if key == KeyCode::Escape && pressed {
            event_loop.exit();
            return;
        }
        if let Some(name) = key_name(key) {
            self.bindings.apply(&mut self.input, name, pressed);
        }
    }

    fn redraw(&mut self) {
        let time = self.clock.advance();
        let report = self.sim.tick(&self.input, time);

        if report.tick % 60 == 0 {
            if let Some(window) = &self.window {
                window.set_title(&format!(
                    "Oceanspace | pos ({:.0}, {:.0}) | speed {:.2} | cell {:?}",
                    report.position.x, report.position.y, report.speed, report.center
                ));
            }
        }

        let (Some(surface), Some(device), Some(queue), Some(renderer)) =
            (&self.surface, &self.device, &self.queue, &mut self.renderer)
        else {
            return;
        };

        let output = match surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(config) = &self.config {
                    surface.configure(device, config);
                }
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

        renderer.draw(device, queue, &view, &self.sim.frame_view());
        output.present();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Oceanspace")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("oceanspace_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sim_config = self.sim.config();
        let mut renderer = OceanRenderer::new(
            &device,
            surface_format,
            config.width,
            config.height,
            self.sim.ocean().layout(),
            self.sim.ocean().patches().len(),
            &sim_config.waves,
            sim_config.wave_path,
        );
        renderer.set_hull_color(self.sim.visual().base_color());

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.handle_key(event_loop, key, key_state == ElementState::Pressed);
            }
            WindowEvent::Focused(false) => {
                // Key releases are lost while unfocused.
                self.input.clear();
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(window) = &self.window {
                    window.request_redraw();
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

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(kind) = cli.model {
        if kind != config.locomotion.kind() {
            config.locomotion = LocomotionConfig::for_kind(kind);
        }
    }
    if let Some(path) = cli.wave_path {
        config.wave_path = path;
    }

    tracing::info!(model = %config.locomotion.kind(), "oceanspace-desktop starting");

    // The event loop only starts once the vehicle is ready.
    let sim = match &cli.vehicle {
        Some(path) => pollster::block_on(launch(&GltfVehicleLoader::new(path), config)),
        None => pollster::block_on(launch(&BuiltinVehicleLoader, config)),
    }?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(sim);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oceanspace_input::Action;

    #[test]
    fn default_bindings_cover_mapped_keys() {
        let bindings = KeyBindings::default();
        for key in [
            KeyCode::KeyW,
            KeyCode::KeyA,
            KeyCode::KeyS,
            KeyCode::KeyD,
            KeyCode::ArrowUp,
            KeyCode::ArrowDown,
            KeyCode::ArrowLeft,
            KeyCode::ArrowRight,
        ] {
            let name = key_name(key).unwrap();
            assert!(bindings.action_for(name).is_some(), "{name} unbound");
        }
        assert_eq!(bindings.action_for(key_name(KeyCode::KeyW).unwrap()), Some(Action::Forward));
        assert!(key_name(KeyCode::Space).is_none());
    }
}
