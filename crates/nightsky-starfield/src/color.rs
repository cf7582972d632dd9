//! Color conversion helpers for terminal rendering.

use nightsky_core::Rgba;
use ratatui::style::Color;

/// Flatten an RGBA color onto a black terminal background.
pub fn rgba_to_color(rgba: Rgba) -> Color {
    let a = rgba.a.clamp(0.0, 1.0);
    let scale = |c: u8| (c as f64 * a).round() as u8;
    Color::Rgb(scale(rgba.r), scale(rgba.g), scale(rgba.b))
}

/// Convert HSL to RGB color.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return Color::Rgb(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_to_color_premultiplies() {
        assert_eq!(
            rgba_to_color(Rgba::new(200, 100, 50, 0.5)),
            Color::Rgb(100, 50, 25)
        );
        assert_eq!(rgba_to_color(Rgba::TRANSPARENT), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_hsl_gray_and_primary() {
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.5), Color::Rgb(127, 127, 127));
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
        assert_eq!(hsl_to_rgb(360.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
    }
}
