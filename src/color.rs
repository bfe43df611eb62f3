//! Color blending for opacity and scrim effects.

use ratatui::style::Color;

/// RGB components of a color, if it has a fixed value.
///
/// Named colors use the xterm defaults. `Reset` and indexed colors depend on
/// the terminal palette and have no known value.
#[must_use]
pub const fn to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    let rgb = match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::Red => (205, 0, 0),
        Color::Green => (0, 205, 0),
        Color::Yellow => (205, 205, 0),
        Color::Blue => (0, 0, 238),
        Color::Magenta => (205, 0, 205),
        Color::Cyan => (0, 205, 205),
        Color::Gray => (229, 229, 229),
        Color::DarkGray => (127, 127, 127),
        Color::LightRed => (255, 0, 0),
        Color::LightGreen => (0, 255, 0),
        Color::LightYellow => (255, 255, 0),
        Color::LightBlue => (92, 92, 255),
        Color::LightMagenta => (255, 0, 255),
        Color::LightCyan => (0, 255, 255),
        Color::White => (255, 255, 255),
        Color::Reset | Color::Indexed(_) => return None,
    };
    Some(rgb)
}

/// Composite `top` over `bottom` with the given alpha.
///
/// Alpha is clamped to `0.0..=1.0`. When either color has no known RGB value
/// the top color is returned unchanged.
#[must_use]
pub fn blend(top: Color, bottom: Color, alpha: f64) -> Color {
    let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    if alpha >= 1.0 {
        return top;
    }
    match (to_rgb(top), to_rgb(bottom)) {
        (Some((tr, tg, tb)), Some((br, bg, bb))) => Color::Rgb(
            mix(tr, br, alpha),
            mix(tg, bg, alpha),
            mix(tb, bb, alpha),
        ),
        _ => top,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mix(top: u8, bottom: u8, alpha: f64) -> u8 {
    let value = f64::from(top).mul_add(alpha, f64::from(bottom) * (1.0 - alpha));
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_keeps_top() {
        assert_eq!(blend(Color::White, Color::Black, 1.0), Color::White);
        assert_eq!(blend(Color::Reset, Color::Black, 1.0), Color::Reset);
    }

    #[test]
    fn test_scrim_blend() {
        // 25% black over white
        assert_eq!(
            blend(Color::Black, Color::White, 0.25),
            Color::Rgb(191, 191, 191)
        );
    }

    #[test]
    fn test_out_of_range_alpha_is_clamped() {
        assert_eq!(blend(Color::White, Color::Black, 3.0), Color::White);
        assert_eq!(blend(Color::White, Color::Black, -1.0), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_unknown_colors_pass_through() {
        assert_eq!(blend(Color::Reset, Color::Black, 0.5), Color::Reset);
        assert_eq!(blend(Color::White, Color::Indexed(4), 0.5), Color::White);
    }
}
