use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use oceanspace_assets::{BuiltinVehicleLoader, GltfVehicleLoader, VehicleLoader};
use oceanspace_input::InputState;
use oceanspace_kernel::{LocomotionConfig, LocomotionKind};
use oceanspace_render::{DebugTextRenderer, Renderer};
use oceanspace_session::{FixedClock, SessionSummary, SimConfig, run_session};
use oceanspace_stream::{WaveField, WavePath};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oceanspace-cli", about = "Headless ocean sailing runner")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML or JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the effective configuration as YAML
    Config,
    /// Run a headless session with a fixed clock and constant input
    Run {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "100")]
        ticks: u64,
        /// Seconds per tick
        #[arg(long, default_value = "0.1")]
        dt: f32,
        /// Locomotion model: heading_thrust or screen_thrust
        #[arg(short, long)]
        model: Option<LocomotionKind>,
        /// Actions held for the whole run, e.g. `forward,left`
        #[arg(long, value_delimiter = ',')]
        hold: Vec<String>,
        /// Vehicle model (.gltf or .glb); a placeholder hull is used otherwise
        #[arg(long)]
        vehicle: Option<PathBuf>,
        /// Uniform scale applied to the vehicle model
        #[arg(long, default_value = "2.0")]
        scale: f32,
        /// Wave coefficients to use
        #[arg(long, value_enum)]
        waves: Option<WavePreset>,
        /// Evaluate waves on the host (cpu) or leave them to the shader (gpu)
        #[arg(long)]
        wave_path: Option<WavePath>,
        /// Print a frame every N ticks (0 prints only the last)
        #[arg(short, long, default_value = "10")]
        every: u64,
        /// Include every ocean patch in printed frames
        #[arg(long)]
        patches: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum WavePreset {
    Canonical,
    Shader,
    Calm,
}

impl WavePreset {
    fn field(self) -> WaveField {
        match self {
            WavePreset::Canonical => WaveField::canonical(),
            WavePreset::Shader => WaveField::shader_variant(),
            WavePreset::Calm => WaveField::calm(),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SimConfig> {
    match path {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(SimConfig::default()),
    }
}

fn held_input(names: &[String]) -> InputState {
    let mut input = InputState::new();
    for name in names {
        if !input.set_named(name, true) {
            tracing::warn!(name = name.as_str(), "ignoring unknown action");
        }
    }
    input
}

struct RunOptions {
    ticks: u64,
    dt: f32,
    input: InputState,
    every: u64,
    renderer: DebugTextRenderer,
}

fn run_with<L: VehicleLoader>(
    loader: &L,
    config: SimConfig,
    options: RunOptions,
) -> anyhow::Result<SessionSummary> {
    let RunOptions {
        ticks,
        dt,
        mut input,
        every,
        renderer,
    } = options;
    let mut clock = FixedClock::new(dt);

    let summary = pollster::block_on(run_session(
        loader,
        config,
        &mut clock,
        &mut input,
        ticks,
        |sim, report| {
            let periodic = every > 0 && report.tick % every == 0;
            if periodic || report.tick == ticks {
                print!("{}", renderer.render(&sim.frame_view()));
            }
        },
    ))?;
    Ok(summary)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Info => {
            println!("oceanspace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", oceanspace_common::crate_info());
            println!("input: {}", oceanspace_input::crate_info());
            println!("kernel: {}", oceanspace_kernel::crate_info());
            println!("stream: {}", oceanspace_stream::crate_info());
            println!("render: {}", oceanspace_render::crate_info());
            println!("assets: {}", oceanspace_assets::crate_info());
            println!("session: {}", oceanspace_session::crate_info());
        }
        Commands::Config => {
            let config = load_config(cli.config.as_ref())?;
            print!("{}", config.to_yaml()?);
        }
        Commands::Run {
            ticks,
            dt,
            model,
            hold,
            vehicle,
            scale,
            waves,
            wave_path,
            every,
            patches,
        } => {
            let mut config = load_config(cli.config.as_ref())?;
            if let Some(kind) = model {
                if kind != config.locomotion.kind() {
                    config.locomotion = LocomotionConfig::for_kind(kind);
                }
            }
            if let Some(preset) = waves {
                config.waves = preset.field();
            }
            if let Some(path) = wave_path {
                config.wave_path = path;
            }

            let renderer = if patches {
                DebugTextRenderer::new().with_patches()
            } else {
                DebugTextRenderer::new()
            };
            let options = RunOptions {
                ticks,
                dt,
                input: held_input(&hold),
                every,
                renderer,
            };
            println!(
                "Running {ticks} ticks: model={}, dt={dt}, waves={:?}",
                config.locomotion.kind(),
                config.wave_path
            );

            let summary = match &vehicle {
                Some(path) => run_with(&GltfVehicleLoader::new(path).with_scale(scale), config, options),
                None => run_with(&BuiltinVehicleLoader, config, options),
            }?;

            println!(
                "Finished: ticks={}, t={:.2}s, pos=({:.2}, {:.2}), speed={:.3}, peak={:.3}, patch moves={}",
                summary.ticks,
                summary.elapsed,
                summary.final_position.x,
                summary.final_position.y,
                summary.final_speed,
                summary.peak_speed,
                summary.patches_moved
            );
            println!(
                "Tick time: avg={:?}, max={:?}",
                summary.average_tick, summary.slowest_tick
            );
        }
    }

    Ok(())
}
