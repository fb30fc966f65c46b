use glam::{Mat4, Vec2, Vec3};
use oceanspace_common::ConfigError;
use oceanspace_kernel::Vehicle2D;
use serde::{Deserialize, Serialize};

/// Fixed chase offsets: the camera sits `height` above and `distance` behind
/// the vehicle along world +Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRig {
    pub height: f32,
    pub distance: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            height: 10.0,
            distance: 20.0,
        }
    }
}

/// Where the camera is and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_target: Vec3,
}

impl CameraRig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check("camera.height", self.height, |_| true, "finite")?;
        ConfigError::check("camera.distance", self.distance, |_| true, "finite")?;
        Ok(())
    }

    /// Camera pose for `vehicle`. No smoothing: the same vehicle position always
    /// yields the same pose.
    pub fn derive(&self, vehicle: &Vehicle2D) -> CameraPose {
        self.derive_at(vehicle.position())
    }

    /// Camera pose for a vehicle at planar `position` (`y` = world Z).
    pub fn derive_at(&self, position: Vec2) -> CameraPose {
        CameraPose {
            position: Vec3::new(position.x, self.height, position.y + self.distance),
            look_target: Vec3::new(position.x, 0.0, position.y),
        }
    }
}

impl CameraPose {
    /// Right-handed look-at with +Y up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_target, Vec3::Y)
    }

    pub fn forward(&self) -> Vec3 {
        (self.look_target - self.position).normalize_or_zero()
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self, pose: &CameraPose) -> Mat4 {
        self.matrix() * pose.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_at_origin() {
        let pose = CameraRig::default().derive(&Vehicle2D::new());
        assert_eq!(pose.position, Vec3::new(0.0, 10.0, 20.0));
        assert_eq!(pose.look_target, Vec3::ZERO);
    }

    #[test]
    fn pose_tracks_vehicle_exactly() {
        let rig = CameraRig::default();
        let vehicle = Vehicle2D::at(Vec2::new(123.0, -45.5)).with_heading(2.0);
        let pose = rig.derive(&vehicle);
        assert_eq!(pose.position, Vec3::new(123.0, 10.0, -25.5));
        assert_eq!(pose.look_target, Vec3::new(123.0, 0.0, -45.5));
        // Heading and velocity do not matter.
        let moving = vehicle.with_velocity(Vec2::new(3.0, 1.0));
        assert_eq!(rig.derive(&moving), pose);
    }

    #[test]
    fn camera_looks_down_toward_minus_z() {
        let pose = CameraRig::default().derive(&Vehicle2D::new());
        let f = pose.forward();
        assert!(f.y < 0.0);
        assert!(f.z < 0.0);
        assert!(f.x.abs() < 1e-6);
    }

    #[test]
    fn view_projection_is_finite() {
        let mut proj = Projection::default();
        proj.set_viewport(1280, 720);
        let vp = proj.view_projection(&CameraRig::default().derive(&Vehicle2D::new()));
        assert!(vp.is_finite());
        assert!((proj.aspect - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn vehicle_projects_to_screen_centre() {
        let proj = Projection::default();
        let vehicle = Vehicle2D::at(Vec2::new(40.0, 80.0));
        let pose = CameraRig::default().derive(&vehicle);
        let clip = proj.view_projection(&pose) * vehicle.world_position(0.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
    }
}
