use glam::{Vec2, Vec3};
use oceanspace_common::wrap_angle;
use serde::{Deserialize, Serialize};

/// Planar state of the controlled vehicle.
///
/// Positions and velocities are 2D vectors on the water plane: `x` is world X
/// and `y` is world Z. Heading is measured about +Y, with heading 0 facing +Z,
/// and is always kept in (−π, π].
///
/// Only locomotion models mutate a vehicle; everything else reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vehicle2D {
    position: Vec2,
    heading: f32,
    velocity: Vec2,
}

impl Vehicle2D {
    /// A vehicle at rest at the origin, heading 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// A vehicle at rest at `position`.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_heading(mut self, heading: f32) -> Self {
        self.heading = wrap_angle(heading);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Unit vector the vehicle faces: `(sin h, cos h)`.
    pub fn heading_direction(&self) -> Vec2 {
        let (sin, cos) = self.heading.sin_cos();
        Vec2::new(sin, cos)
    }

    /// Position lifted into world space at height `y`.
    pub fn world_position(&self, y: f32) -> Vec3 {
        Vec3::new(self.position.x, y, self.position.y)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.heading.is_finite()
    }

    pub(crate) fn rotate(&mut self, delta: f32) {
        self.heading = wrap_angle(self.heading + delta);
    }

    pub(crate) fn velocity_mut(&mut self) -> &mut Vec2 {
        &mut self.velocity
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn starts_at_rest_at_origin() {
        let v = Vehicle2D::new();
        assert_eq!(v.position(), Vec2::ZERO);
        assert_eq!(v.velocity(), Vec2::ZERO);
        assert_eq!(v.heading(), 0.0);
    }

    #[test]
    fn heading_zero_faces_plus_z() {
        let v = Vehicle2D::new();
        let d = v.heading_direction();
        assert!(d.x.abs() < 1e-6);
        assert!((d.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn heading_quarter_turn_faces_plus_x() {
        let v = Vehicle2D::new().with_heading(FRAC_PI_2);
        let d = v.heading_direction();
        assert!((d.x - 1.0).abs() < 1e-6);
        assert!(d.y.abs() < 1e-6);
    }

    #[test]
    fn rotate_wraps_heading() {
        let mut v = Vehicle2D::new().with_heading(3.0);
        v.rotate(0.5);
        assert!(v.heading() < 0.0);
        assert!(v.heading() > -std::f32::consts::PI);
    }

    #[test]
    fn world_position_maps_y_to_z() {
        let v = Vehicle2D::at(Vec2::new(3.0, -4.0));
        assert_eq!(v.world_position(1.0), Vec3::new(3.0, 1.0, -4.0));
    }
}
