//! Host-side reference of the water colour model in `fs_water`.
//!
//! Returns the unlit albedo; the shader additionally applies a mild diffuse
//! term from the surface normal.

use glam::{Vec2, Vec3};

const DEEP_BLUE: Vec3 = Vec3::new(0.0, 0.22, 0.4);
const SEA_GREEN: Vec3 = Vec3::new(0.0, 0.65, 0.6);
const TURQUOISE: Vec3 = Vec3::new(0.0, 0.8, 0.85);
const GLOW_TINT: Vec3 = Vec3::new(1.0, 0.9, 0.7);
const GLOW_ANCHOR: Vec2 = Vec2::new(0.5, 0.2);

fn random(p: Vec2) -> f32 {
    let v = (p.dot(Vec2::new(127.1, 311.7))).sin() * 43758.547;
    v - v.floor()
}

fn value_noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;
    let a = random(i);
    let b = random(i + Vec2::X);
    let c = random(i + Vec2::Y);
    let d = random(i + Vec2::ONE);
    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);
    lerp(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Colour of the water at `uv` for displacement `wave` at elapsed time `t`.
pub fn surface_color(uv: Vec2, wave: f32, t: f32) -> Vec3 {
    let n = value_noise(uv * 5.0 + Vec2::splat(t * 0.1));
    let wave_strength = (wave * 0.5 + 0.5).clamp(0.0, 1.0);
    let mut color = DEEP_BLUE.lerp(SEA_GREEN, wave_strength);
    color = color.lerp(TURQUOISE, n * 0.3);

    let glow = 1.0 - smoothstep(0.0, 0.5, uv.distance(GLOW_ANCHOR));
    color += glow * GLOW_TINT * 0.1;

    let foam = smoothstep(0.6, 0.95, wave_strength + n * 0.2);
    color.lerp(Vec3::ONE, foam * 0.3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_bounded() {
        for k in 0..200 {
            let p = Vec2::new(k as f32 * 0.37, k as f32 * -0.91);
            let n = value_noise(p);
            assert!((-1e-4..=1.0 + 1e-4).contains(&n), "noise {n} at {p}");
        }
    }

    #[test]
    fn noise_hits_lattice_values() {
        let p = Vec2::new(3.0, 7.0);
        assert!((value_noise(p) - random(p)).abs() < 1e-6);
    }

    #[test]
    fn color_is_a_pure_function() {
        let uv = Vec2::new(0.3, 0.8);
        assert_eq!(surface_color(uv, 0.1, 2.0), surface_color(uv, 0.1, 2.0));
    }

    #[test]
    fn crests_are_greener_than_troughs() {
        let uv = Vec2::new(0.9, 0.9);
        let crest = surface_color(uv, 0.6, 0.0);
        let trough = surface_color(uv, -0.6, 0.0);
        assert!(crest.y > trough.y);
    }

    #[test]
    fn glow_brightens_near_anchor() {
        // Same wave and noise cell phase; only the glow term differs much.
        let near = surface_color(GLOW_ANCHOR, -1.0, 0.0);
        let far = surface_color(Vec2::new(1.0, 1.0), -1.0, 0.0);
        let glow_only = GLOW_TINT * 0.1;
        assert!(near.x >= glow_only.x * 0.99);
        assert!(far.x < near.x);
    }

    #[test]
    fn channels_stay_in_gamut() {
        for i in 0..=10 {
            for j in 0..=10 {
                let uv = Vec2::new(i as f32 / 10.0, j as f32 / 10.0);
                for wave in [-0.6, 0.0, 0.6] {
                    let c = surface_color(uv, wave, 12.5);
                    assert!(c.min_element() >= 0.0);
                    assert!(c.max_element() <= 1.1, "c={c}");
                }
            }
        }
    }

    #[test]
    fn smoothstep_edges() {
        assert_eq!(smoothstep(0.6, 0.95, 0.5), 0.0);
        assert_eq!(smoothstep(0.6, 0.95, 1.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    }
}
