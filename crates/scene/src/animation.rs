use std::f64::consts::TAU;

use crate::components::Marker;
use crate::config::MarkerStyle;

/// Uniform scale of a marker at elapsed time `t_s`.
///
/// Visited markers pulse around `pulse_base` unless hovered; unvisited
/// markers are static.
pub fn marker_scale(marker: &Marker, hovered: bool, t_s: f64, style: &MarkerStyle) -> f64 {
    if marker.visited {
        let v = &style.visited;
        if hovered {
            v.hover_scale
        } else {
            v.pulse_base + (t_s * v.pulse_rate + marker.pulse_phase).sin() * v.pulse_amplitude
        }
    } else if hovered {
        style.unvisited.hover_scale
    } else {
        style.unvisited.scale
    }
}

/// Advances a spin angle by `rate * dt`, wrapped into `[0, TAU)`.
pub fn advance_spin(angle_rad: f64, dt_s: f64, rate_rad_per_s: f64) -> f64 {
    (angle_rad + rate_rad_per_s * dt_s.max(0.0)).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::{advance_spin, marker_scale};
    use crate::components::Marker;
    use crate::config::MarkerStyle;
    use approx::assert_relative_eq;
    use content::LocationId;

    fn marker(visited: bool, index: u32) -> Marker {
        Marker::new(LocationId(index), visited).with_pulse_phase(index as f64 * 0.1)
    }

    #[test]
    fn visited_pulse_follows_sine_with_stagger() {
        let style = MarkerStyle::default();
        let m = marker(true, 3);
        for t in [0.0, 0.25, 1.0, 7.5] {
            let expected = 1.5 + (3.0 * t + 0.3_f64).sin() * 0.3;
            assert_relative_eq!(marker_scale(&m, false, t, &style), expected, epsilon = 1e-12);
        }
        let s = marker_scale(&m, false, 2.0, &style);
        assert!((1.2..=1.8).contains(&s));
    }

    #[test]
    fn hover_overrides_pulse() {
        let style = MarkerStyle::default();
        assert_eq!(marker_scale(&marker(true, 0), true, 4.2, &style), 2.5);
        assert_eq!(marker_scale(&marker(false, 5), true, 4.2, &style), 1.2);
        assert_eq!(marker_scale(&marker(false, 5), false, 4.2, &style), 0.8);
    }

    #[test]
    fn spin_is_time_scaled_and_wraps() {
        let a = advance_spin(0.0, 1.0 / 60.0, 0.06);
        assert_relative_eq!(a, 0.001, epsilon = 1e-12);
        let wrapped = advance_spin(std::f64::consts::TAU - 0.01, 1.0, 0.06);
        assert_relative_eq!(wrapped, 0.05, epsilon = 1e-9);
        assert_eq!(advance_spin(1.0, -5.0, 0.06), 1.0);
    }
}
