use std::fmt::Write as _;

use oceanspace_common::Transform;
use oceanspace_kernel::Vehicle2D;
use oceanspace_stream::OceanTiler;

use crate::camera::CameraPose;

/// Everything a renderer may read for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub tick: u64,
    /// Seconds since the session started.
    pub elapsed: f32,
    pub vehicle: &'a Vehicle2D,
    /// Visual transform of the vehicle (smoothed facing plus sway).
    pub vehicle_transform: &'a Transform,
    pub camera: &'a CameraPose,
    pub ocean: &'a OceanTiler,
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads a [`FrameView`] and produces output. It never mutates the
/// simulation.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &FrameView<'_>) -> Self::Output;
}

/// Produces a human-readable summary of a frame.
///
/// Used by the headless runner, logging and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Also list every patch with its cell and origin.
    pub list_patches: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patches(mut self) -> Self {
        self.list_patches = true;
        self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &FrameView<'_>) -> String {
        let mut out = String::new();
        let v = frame.vehicle;
        let _ = writeln!(
            out,
            "=== Frame (tick={}, t={:.2}s) ===",
            frame.tick, frame.elapsed
        );
        let _ = writeln!(
            out,
            "Vehicle: pos=({:.2}, {:.2}) vel=({:.3}, {:.3}) speed={:.3} heading={:.3} facing={:.3}",
            v.position().x,
            v.position().y,
            v.velocity().x,
            v.velocity().y,
            v.speed(),
            v.heading(),
            frame.vehicle_transform.yaw()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1})",
            frame.camera.position.x,
            frame.camera.position.y,
            frame.camera.position.z,
            frame.camera.look_target.x,
            frame.camera.look_target.y,
            frame.camera.look_target.z
        );

        let ocean = frame.ocean;
        let stats = ocean.stats();
        let _ = writeln!(
            out,
            "Ocean: patches={} center=({}, {}) moved={} recenter={:?} waves={:?}",
            ocean.patches().len(),
            stats.center.x,
            stats.center.z,
            stats.patches_moved,
            stats.recenter_time,
            stats.wave_time
        );

        if self.list_patches {
            for patch in ocean.patches() {
                let o = patch.grid_origin();
                let _ = writeln!(
                    out,
                    "  [{:>3}, {:>3}] cell=({}, {}) origin=({:.1}, {:.1})",
                    patch.slot().x,
                    patch.slot().z,
                    patch.cell().x,
                    patch.cell().z,
                    o.x,
                    o.y
                );
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraRig;
    use glam::Vec2;
    use oceanspace_stream::{TilerConfig, WaveField};

    fn small_ocean() -> OceanTiler {
        OceanTiler::new(TilerConfig {
            tile_range: 1,
            segments: 2,
            ..TilerConfig::default()
        })
    }

    #[test]
    fn debug_renderer_summarises_frame() {
        let vehicle = Vehicle2D::at(Vec2::new(1.0, 2.0));
        let transform = Transform::default();
        let camera = CameraRig::default().derive(&vehicle);
        let ocean = small_ocean();
        let frame = FrameView {
            tick: 7,
            elapsed: 0.7,
            vehicle: &vehicle,
            vehicle_transform: &transform,
            camera: &camera,
            ocean: &ocean,
        };

        let output = DebugTextRenderer::new().render(&frame);
        assert!(output.contains("tick=7"));
        assert!(output.contains("pos=(1.00, 2.00)"));
        assert!(output.contains("patches=9"));
        assert!(output.contains("center=(0, 0)"));
        assert!(output.contains("recenter=0ns waves=0ns"));
        assert!(!output.contains("origin="));
    }

    #[test]
    fn debug_renderer_reports_window_centre_and_timings() {
        let vehicle = Vehicle2D::at(Vec2::new(1_450.0, -700.0));
        let transform = Transform::default();
        let camera = CameraRig::default().derive(&vehicle);
        let mut ocean = small_ocean();
        ocean.recenter(vehicle.position());
        ocean.update_waves(&WaveField::canonical(), 1.0);
        let frame = FrameView {
            tick: 3,
            elapsed: 0.3,
            vehicle: &vehicle,
            vehicle_transform: &transform,
            camera: &camera,
            ocean: &ocean,
        };

        let output = DebugTextRenderer::new().render(&frame);
        assert!(output.contains("center=(2, -1) moved=9"), "{output}");
        assert!(output.contains("recenter="));
        assert!(output.contains("waves="));
    }

    #[test]
    fn debug_renderer_lists_patches_on_request() {
        let vehicle = Vehicle2D::new();
        let transform = Transform::default();
        let camera = CameraRig::default().derive(&vehicle);
        let ocean = small_ocean();
        let frame = FrameView {
            tick: 0,
            elapsed: 0.0,
            vehicle: &vehicle,
            vehicle_transform: &transform,
            camera: &camera,
            ocean: &ocean,
        };

        let output = DebugTextRenderer::new().with_patches().render(&frame);
        assert_eq!(output.matches("origin=").count(), 9);
    }
}
