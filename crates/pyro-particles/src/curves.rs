//! Interpolation helpers over scalars and colour palettes

use pyro_core::Color;

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two colours
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    a.lerp(b, t)
}

/// Sample a palette as a piecewise-linear gradient at `t` in [0, 1].
/// A single-entry palette yields that entry; an empty one yields white.
pub fn palette_gradient(palette: &[Color], t: f32) -> Color {
    match palette.len() {
        0 => Color::WHITE,
        1 => palette[0],
        n => {
            let scaled = t.clamp(0.0, 1.0) * (n - 1) as f32;
            let index = (scaled.floor() as usize).min(n - 2);
            lerp_color(palette[index], palette[index + 1], scaled - index as f32)
        }
    }
}

/// Pick a palette entry by a fraction in [0, 1]
pub fn palette_pick(palette: &[Color], t: f32) -> Color {
    match palette.len() {
        0 => Color::WHITE,
        n => {
            let index = (t.clamp(0.0, 1.0) * (n - 1) as f32).floor() as usize;
            palette[index.min(n - 1)]
        }
    }
}

/// Cycle through a palette by index
pub fn palette_cycle(palette: &[Color], index: usize) -> Color {
    if palette.is_empty() {
        Color::WHITE
    } else {
        palette[index % palette.len()]
    }
}

/// Index-derived multiplier that keeps a batch of stars from fading in
/// lockstep. Deterministic: the same index always gets the same value.
pub fn manufacturing_variation(index: usize, base: f32, step: f32, period: usize) -> f32 {
    base + (index % period.max(1)) as f32 * step
}

/// `t / span` clamped to [0, 1], treating a non-positive span as finished
pub fn fraction(t: f32, span: f32) -> f32 {
    if span <= 0.0 {
        1.0
    } else {
        (t / span).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_f32_endpoints() {
        assert!((lerp_f32(0.0, 10.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 1.0) - 10.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn gradient_hits_each_entry() {
        let palette = [
            Color::from_hex(0xff0000),
            Color::from_hex(0x00ff00),
            Color::from_hex(0x0000ff),
        ];
        assert_eq!(palette_gradient(&palette, 0.0), palette[0]);
        assert_eq!(palette_gradient(&palette, 0.5), palette[1]);
        assert_eq!(palette_gradient(&palette, 1.0), palette[2]);
        let quarter = palette_gradient(&palette, 0.25);
        assert!((quarter.r - 0.5).abs() < 1e-6);
        assert!((quarter.g - 0.5).abs() < 1e-6);
    }

    #[test]
    fn degenerate_palettes_do_not_divide_by_zero() {
        let single = [Color::from_hex(0x123456)];
        assert_eq!(palette_gradient(&single, 0.7), single[0]);
        assert_eq!(palette_pick(&single, 0.7), single[0]);
        assert_eq!(palette_gradient(&[], 0.7), Color::WHITE);
        assert_eq!(palette_cycle(&[], 4), Color::WHITE);
    }

    #[test]
    fn variation_repeats_with_period() {
        assert_eq!(
            manufacturing_variation(3, 0.85, 0.03, 10),
            manufacturing_variation(13, 0.85, 0.03, 10)
        );
        assert!((manufacturing_variation(0, 0.85, 0.03, 10) - 0.85).abs() < 1e-6);
    }

    #[test]
    fn fraction_clamps() {
        assert_eq!(fraction(-1.0, 2.0), 0.0);
        assert_eq!(fraction(3.0, 2.0), 1.0);
        assert_eq!(fraction(1.0, 0.0), 1.0);
    }
}
