use std::time::{Duration, Instant};

use glam::Vec2;
use oceanspace_assets::{VehicleLoader, VehicleVisual};
use oceanspace_common::Transform;
use oceanspace_input::InputState;
use oceanspace_kernel::{HeadingSmoother, LocomotionModel, Vehicle2D};
use oceanspace_render::{CameraPose, FrameView};
use oceanspace_stream::{CellCoord, OceanTiler, WavePath};

use crate::clock::{Clock, FrameTime};
use crate::config::SimConfig;
use crate::error::StartupError;
use crate::source::InputSource;
use crate::timer::FrameTimer;

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Number of ticks completed, including this one.
    pub tick: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub speed: f32,
    /// Smoothed visual facing, radians.
    pub facing: f32,
    pub patches_moved: usize,
    pub center: CellCoord,
}

/// A running session. Only [`launch`] creates one, and only after the vehicle
/// visual has loaded.
pub struct Simulation {
    config: SimConfig,
    visual: VehicleVisual,
    vehicle: Vehicle2D,
    locomotion: Box<dyn LocomotionModel>,
    smoother: HeadingSmoother,
    vehicle_transform: Transform,
    camera: CameraPose,
    ocean: OceanTiler,
    ticks: u64,
    elapsed: f32,
}

/// Validate `config`, load the vehicle visual, and build the simulation.
///
/// Configuration errors are reported before the loader runs. A failed load is
/// returned as-is; nothing is left to tick and the load is not retried.
pub async fn launch<L: VehicleLoader>(
    loader: &L,
    config: SimConfig,
) -> Result<Simulation, StartupError> {
    if let Err(e) = config.validate() {
        tracing::error!("rejecting configuration: {e}");
        return Err(e.into());
    }

    let visual = match loader.load_vehicle().await {
        Ok(visual) => visual,
        Err(e) => {
            tracing::error!("vehicle failed to load: {e}");
            return Err(e.into());
        }
    };
    tracing::debug!(
        id = ?visual.id,
        meshes = visual.meshes.len(),
        scale = visual.scale,
        "vehicle visual ready"
    );

    Ok(Simulation::new(config, visual))
}

impl Simulation {
    fn new(config: SimConfig, visual: VehicleVisual) -> Self {
        let vehicle = Vehicle2D::new();
        let smoother = HeadingSmoother::new(config.heading, vehicle.heading());
        let mut ocean = OceanTiler::new(config.tiler);
        if config.wave_path == WavePath::Cpu {
            ocean.update_waves(&config.waves, 0.0);
        }
        let mut sim = Self {
            locomotion: config.locomotion.build(),
            camera: config.camera.derive(&vehicle),
            vehicle_transform: Transform::default(),
            config,
            visual,
            vehicle,
            smoother,
            ocean,
            ticks: 0,
            elapsed: 0.0,
        };
        sim.vehicle_transform = sim.visual_transform(0.0);
        sim
    }

    fn visual_transform(&self, elapsed: f32) -> Transform {
        let sway = self.config.sway.sample(elapsed);
        Transform::from_yaw_pitch_roll(
            self.vehicle.world_position(self.visual.ride_height + sway.lift),
            self.smoother.facing(),
            sway.pitch,
            sway.roll,
            self.visual.scale,
        )
    }

    /// Advance one tick: locomotion, facing, camera, recentering, waves.
    pub fn tick(&mut self, input: &InputState, time: FrameTime) -> TickReport {
        let _span = tracing::info_span!("tick", tick = self.ticks).entered();

        self.elapsed = time.elapsed;
        self.locomotion.advance(&mut self.vehicle, input, time.delta);
        let facing = self.smoother.update(self.vehicle.velocity());
        self.vehicle_transform = self.visual_transform(time.elapsed);
        self.camera = self.config.camera.derive(&self.vehicle);

        let patches_moved = self.ocean.recenter(self.vehicle.position());
        if self.config.wave_path == WavePath::Cpu {
            self.ocean.update_waves(&self.config.waves, time.elapsed);
        }

        self.ticks += 1;
        let report = TickReport {
            tick: self.ticks,
            position: self.vehicle.position(),
            velocity: self.vehicle.velocity(),
            speed: self.vehicle.speed(),
            facing,
            patches_moved,
            center: self.ocean.center(),
        };
        tracing::trace!(
            x = report.position.x,
            z = report.position.y,
            speed = report.speed,
            "tick complete"
        );
        report
    }

    /// Read-only view for renderers.
    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView {
            tick: self.ticks,
            elapsed: self.elapsed,
            vehicle: &self.vehicle,
            vehicle_transform: &self.vehicle_transform,
            camera: &self.camera,
            ocean: &self.ocean,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn visual(&self) -> &VehicleVisual {
        &self.visual
    }

    pub fn vehicle(&self) -> &Vehicle2D {
        &self.vehicle
    }

    pub fn vehicle_transform(&self) -> &Transform {
        &self.vehicle_transform
    }

    pub fn camera(&self) -> &CameraPose {
        &self.camera
    }

    pub fn ocean(&self) -> &OceanTiler {
        &self.ocean
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Outcome of a headless [`run_session`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub elapsed: f32,
    pub final_position: Vec2,
    pub final_speed: f32,
    pub peak_speed: f32,
    /// Patch moves summed over every tick.
    pub patches_moved: usize,
    pub average_tick: Duration,
    pub slowest_tick: Duration,
}

/// Launch a session and tick it `max_ticks` times, calling `on_frame` after
/// each tick. Nothing ticks if startup fails.
pub async fn run_session<L, C, I, F>(
    loader: &L,
    config: SimConfig,
    clock: &mut C,
    input: &mut I,
    max_ticks: u64,
    mut on_frame: F,
) -> Result<SessionSummary, StartupError>
where
    L: VehicleLoader,
    C: Clock,
    I: InputSource,
    F: FnMut(&Simulation, &TickReport),
{
    let mut sim = launch(loader, config).await?;
    let mut timer = FrameTimer::new(120);
    let mut peak_speed: f32 = 0.0;
    let mut patches_moved = 0;

    for _ in 0..max_ticks {
        let state = input.poll(sim.ticks());
        let time = clock.advance();
        let start = Instant::now();
        let report = sim.tick(&state, time);
        timer.record(start.elapsed());

        peak_speed = peak_speed.max(report.speed);
        patches_moved += report.patches_moved;
        on_frame(&sim, &report);
    }

    let summary = SessionSummary {
        ticks: sim.ticks(),
        elapsed: sim.elapsed(),
        final_position: sim.vehicle().position(),
        final_speed: sim.vehicle().speed(),
        peak_speed,
        patches_moved,
        average_tick: timer.average(),
        slowest_tick: timer.max(),
    };
    tracing::info!(
        ticks = summary.ticks,
        avg_us = summary.average_tick.as_micros() as u64,
        max_us = summary.slowest_tick.as_micros() as u64,
        "session finished"
    );
    Ok(summary)
}
