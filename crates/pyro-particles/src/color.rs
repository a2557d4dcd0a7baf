//! Colour and brightness model: fade curves, zoom compensation, ember cooling
//!
//! Everything here is a pure function of its arguments, safe to call per
//! particle per frame from any thread.

use pyro_core::Color;

/// Fade curve family of the incremental effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeFamily {
    /// Sharp power-law fade
    Burst,
    /// Sustained power-law fade
    Fountain,
    Spiral,
    /// Two-piece curve with a visibility floor
    Willow,
}

/// Minimum alpha of a live willow ember
pub const WILLOW_ALPHA_FLOOR: f32 = 0.15;

impl FadeFamily {
    pub fn exponent(&self) -> Option<f32> {
        match self {
            FadeFamily::Burst => Some(0.6),
            FadeFamily::Fountain => Some(0.8),
            FadeFamily::Spiral => Some(0.7),
            FadeFamily::Willow => None,
        }
    }

    /// Whether particles of this family shift towards warm colours as they fade
    pub fn cools(&self) -> bool {
        matches!(self, FadeFamily::Burst | FadeFamily::Willow)
    }
}

/// Alpha for a particle with `life_fraction` of its life remaining
/// (1 at birth, 0 at death). Non-decreasing in `life_fraction`.
pub fn fade_curve(life_fraction: f32, family: FadeFamily) -> f32 {
    let f = life_fraction.clamp(0.0, 1.0);
    let alpha = match family.exponent() {
        Some(exp) => f.powf(exp),
        None => {
            if f > 0.3 {
                f.powf(0.5)
            } else {
                f.powf(1.2)
            }
        }
    };
    alpha.clamp(0.0, 1.0)
}

/// Like [`fade_curve`], but keeps live willow embers above the floor
pub fn particle_alpha(life_fraction: f32, family: FadeFamily) -> f32 {
    let alpha = fade_curve(life_fraction, family);
    if family == FadeFamily::Willow && life_fraction > 0.0 {
        alpha.max(WILLOW_ALPHA_FLOOR)
    } else {
        alpha
    }
}

/// Camera distance range over which brightness compensation ramps up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    pub near: f32,
    pub far: f32,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self {
            near: 10.0,
            far: 500.0,
        }
    }
}

/// Largest multiplier returned by [`zoom_brightness`]
pub const MAX_ZOOM_BRIGHTNESS: f32 = 20.0;

/// Brightness multiplier in [1, 20] compensating for distance dimming.
/// Monotonic non-decreasing in `viewer_distance`.
pub fn zoom_brightness(viewer_distance: f32, range: ZoomRange) -> f32 {
    let span = range.far - range.near;
    if span <= 0.0 || !viewer_distance.is_finite() {
        return 1.0;
    }
    let normalized = ((viewer_distance - range.near) / span).clamp(0.0, 1.0);
    1.0 + normalized.powf(0.3) * (MAX_ZOOM_BRIGHTNESS - 1.0)
}

/// Shift `base` towards a warm ember tone as `alpha` falls
pub fn cooling_shift(base: Color, alpha: f32) -> Color {
    let cooling = 1.0 - alpha.clamp(0.0, 1.0);
    Color::new(
        base.r + cooling * 0.3,
        base.g - cooling * 0.2,
        base.b - cooling * 0.4,
    )
    .clamped()
}

/// Final emitted colour: `base` scaled by alpha and brightness, capped so a
/// particle never exceeds its own hue at full intensity.
pub fn shade(base: Color, alpha: f32, brightness: f32) -> Color {
    let intensity = (alpha * brightness).clamp(0.0, 1.0);
    base.scaled(intensity).clamped()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILIES: [FadeFamily; 4] = [
        FadeFamily::Burst,
        FadeFamily::Fountain,
        FadeFamily::Spiral,
        FadeFamily::Willow,
    ];

    #[test]
    fn fade_curves_span_unit_interval() {
        for family in FAMILIES {
            assert!((fade_curve(1.0, family) - 1.0).abs() < 1e-6);
            assert_eq!(fade_curve(0.0, family), 0.0);
        }
    }

    #[test]
    fn fade_is_monotonic_in_remaining_life() {
        for family in FAMILIES {
            let mut previous = 0.0;
            for step in 0..=100 {
                let alpha = fade_curve(step as f32 / 100.0, family);
                assert!(alpha + 1e-6 >= previous, "{family:?} at {step}");
                previous = alpha;
            }
        }
    }

    #[test]
    fn willow_floor_applies_only_while_alive() {
        assert!((particle_alpha(0.01, FadeFamily::Willow) - WILLOW_ALPHA_FLOOR).abs() < 1e-6);
        assert_eq!(particle_alpha(0.0, FadeFamily::Willow), 0.0);
        assert!(particle_alpha(0.01, FadeFamily::Burst) < WILLOW_ALPHA_FLOOR);
    }

    #[test]
    fn zoom_brightness_bounds() {
        let range = ZoomRange::default();
        assert_eq!(zoom_brightness(0.0, range), 1.0);
        assert_eq!(zoom_brightness(10.0, range), 1.0);
        assert!((zoom_brightness(500.0, range) - 20.0).abs() < 1e-4);
        assert!((zoom_brightness(5000.0, range) - 20.0).abs() < 1e-4);
        let mut previous = 1.0;
        for d in (0..600).step_by(5) {
            let b = zoom_brightness(d as f32, range);
            assert!(b >= previous);
            previous = b;
        }
    }

    #[test]
    fn zoom_brightness_degenerate_range() {
        let range = ZoomRange {
            near: 50.0,
            far: 50.0,
        };
        assert_eq!(zoom_brightness(100.0, range), 1.0);
    }

    #[test]
    fn cooling_warms_fading_particles() {
        let blue = Color::new(0.2, 0.4, 0.9);
        assert_eq!(cooling_shift(blue, 1.0), blue);
        let cooled = cooling_shift(blue, 0.0);
        assert!(cooled.r > blue.r);
        assert!(cooled.b < blue.b);
    }

    #[test]
    fn shade_never_exceeds_base() {
        let c = Color::new(0.5, 0.25, 1.0);
        let bright = shade(c, 1.0, 20.0);
        assert_eq!(bright, c);
        let dim = shade(c, 0.5, 1.0);
        assert!((dim.r - 0.25).abs() < 1e-6);
    }
}
