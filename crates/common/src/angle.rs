use std::f32::consts::{PI, TAU};

/// Wrap an angle in radians to the half-open interval (−π, π].
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Signed shortest rotation that takes `from` onto `to`.
///
/// Computed as `atan2(sin(to - from), cos(to - from))`, so the result lies in
/// [−π, π] and never takes the long way around the ±π seam.
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    let diff = to - from;
    diff.sin().atan2(diff.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn wrap_keeps_in_range_values() {
        assert!((wrap_angle(0.5) - 0.5).abs() < EPS);
        assert!((wrap_angle(-3.0) + 3.0).abs() < EPS);
    }

    #[test]
    fn wrap_maps_minus_pi_to_pi() {
        assert!((wrap_angle(-PI) - PI).abs() < EPS);
        assert!((wrap_angle(PI) - PI).abs() < EPS);
    }

    #[test]
    fn wrap_folds_full_turns() {
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < 1e-4);
        assert!((wrap_angle(-TAU - 0.25) + 0.25).abs() < 1e-4);
        assert!((wrap_angle(3.5) - (3.5 - TAU)).abs() < 1e-4);
    }

    #[test]
    fn shortest_arc_crosses_seam() {
        let arc = shortest_arc(3.0, -3.0);
        assert!((arc - (TAU - 6.0)).abs() < 1e-4, "arc={arc}");
        assert!(arc > 0.0);
    }

    #[test]
    fn shortest_arc_plain_difference() {
        assert!((shortest_arc(0.2, 0.7) - 0.5).abs() < EPS);
        assert!((shortest_arc(0.7, 0.2) + 0.5).abs() < EPS);
    }
}
