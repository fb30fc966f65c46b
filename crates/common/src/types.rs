use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform of a visual object: position, rotation, scale.
///
/// The simulation writes these fields every tick; the scene surface only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Build a transform from a yaw about +Y followed by pitch (X) and roll (Z).
    pub fn from_yaw_pitch_roll(position: Vec3, yaw: f32, pitch: f32, roll: f32, scale: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll),
            scale: Vec3::splat(scale),
        }
    }

    /// Yaw component of the rotation, in radians.
    pub fn yaw(&self) -> f32 {
        self.rotation.to_euler(EulerRot::YXZ).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn yaw_round_trips_through_rotation() {
        let t = Transform::from_yaw_pitch_roll(Vec3::new(1.0, 2.0, 3.0), 1.2, 0.01, -0.02, 2.0);
        assert!((t.yaw() - 1.2).abs() < 1e-4);
        assert_eq!(t.scale, Vec3::splat(2.0));
    }
}
