//! Glyph tables for rasterizing the sky onto terminal cells.

/// Star glyphs from faintest to brightest.
pub const STAR_RAMP: &[char] = &['.', '·', '+', '*', '✦'];

/// Cells dimmer than this are left blank.
pub const VISIBLE_INTENSITY: f64 = 0.03;

/// Glyphs for streaks, indexed by heading: horizontal, falling, vertical, rising.
pub const STROKE_CHARS: [char; 4] = ['─', '╲', '│', '╱'];

/// Pick a star glyph for a cell intensity in `0.0..=1.0`.
pub fn star_glyph(intensity: f64) -> char {
    let intensity = intensity.clamp(0.0, 1.0);
    let idx = ((intensity * STAR_RAMP.len() as f64) as usize).min(STAR_RAMP.len() - 1);
    STAR_RAMP[idx]
}

/// Pick a streak glyph for a direction given in cell units.
pub fn stroke_glyph(dx: f64, dy: f64) -> char {
    let mut degrees = dy.atan2(dx).to_degrees();
    if degrees < 0.0 {
        degrees += 180.0;
    }
    let idx = if !(22.5..157.5).contains(&degrees) {
        0
    } else if degrees < 67.5 {
        1
    } else if degrees < 112.5 {
        2
    } else {
        3
    };
    STROKE_CHARS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_glyph_ramp() {
        assert_eq!(star_glyph(0.0), '.');
        assert_eq!(star_glyph(0.5), '+');
        assert_eq!(star_glyph(1.0), '✦');
        assert_eq!(star_glyph(7.0), '✦');
    }

    #[test]
    fn test_stroke_glyph_directions() {
        assert_eq!(stroke_glyph(1.0, 0.0), '─');
        assert_eq!(stroke_glyph(1.0, 1.0), '╲');
        assert_eq!(stroke_glyph(-1.0, -1.0), '╲');
        assert_eq!(stroke_glyph(0.0, 1.0), '│');
        assert_eq!(stroke_glyph(-1.0, 1.0), '╱');
    }
}
