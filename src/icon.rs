use std::str::FromStr;

use raylib::prelude::*;

use crate::constants::REM_PX;
use crate::error::{Error, Result};

/// Icon edge length in pixels.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct IconSize(f32);

impl IconSize {
    /// Accepts `"4rem"`, `"64px"` or a bare pixel count.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let (number, scale) = if let Some(rem) = trimmed.strip_suffix("rem") {
            (rem, REM_PX)
        } else if let Some(px) = trimmed.strip_suffix("px") {
            (px, 1.0)
        } else {
            (trimmed, 1.0)
        };

        match number.trim().parse::<f32>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Ok(Self(n * scale)),
            _ => Err(Error::InvalidIconSize { value: value.to_string() }),
        }
    }

    pub fn px(&self) -> f32 {
        self.0
    }
}

impl FromStr for IconSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Draws named icons. Unknown names are the renderer's problem, not the caller's.
pub trait IconRenderer {
    fn draw_icon<D: RaylibDraw>(&self, d: &mut D, name: &str, area: Rectangle, color: Color);
}

/// Line-drawn icon set covering what the slider needs.
#[derive(Debug, Default, Clone, Copy)]
pub struct VectorIcons;

impl IconRenderer for VectorIcons {
    fn draw_icon<D: RaylibDraw>(&self, d: &mut D, name: &str, area: Rectangle, color: Color) {
        let Some([a, b, c]) = chevron_points(name, area) else {
            tracing::warn!(icon = name, "unknown icon name, nothing drawn");
            return;
        };
        let thickness = (area.width.min(area.height) * 0.1).max(1.0);
        d.draw_line_ex(a, b, thickness, color);
        d.draw_line_ex(b, c, thickness, color);
    }
}

/// Polyline for a chevron icon inside `area`, or `None` if `name` is not a chevron.
pub fn chevron_points(name: &str, area: Rectangle) -> Option<[Vector2; 3]> {
    let at = |fx: f32, fy: f32| Vector2::new(area.x + area.width * fx, area.y + area.height * fy);
    match name {
        "chevron-right" => Some([at(0.35, 0.2), at(0.65, 0.5), at(0.35, 0.8)]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rem_px_and_bare_sizes() {
        assert_eq!(IconSize::parse("4rem").expect("rem").px(), 64.0);
        assert_eq!(IconSize::parse("24px").expect("px").px(), 24.0);
        assert_eq!(IconSize::parse(" 32 ").expect("bare").px(), 32.0);
        assert_eq!("0.5rem".parse::<IconSize>().expect("fraction").px(), 8.0);
    }

    #[test]
    fn rejects_garbage_sizes() {
        for value in ["", "big", "-2rem", "4em", "NaNpx"] {
            assert!(
                matches!(IconSize::parse(value), Err(Error::InvalidIconSize { .. })),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn chevron_right_points_right() {
        let area = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        let [top, tip, bottom] = chevron_points("chevron-right", area).expect("known icon");
        assert!(tip.x > top.x && tip.x > bottom.x);
        assert_eq!(tip.y, 50.0);
    }

    #[test]
    fn unknown_icon_has_no_shape() {
        let area = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        assert!(chevron_points("not-an-icon", area).is_none());
        assert!(chevron_points("chevron-left", area).is_none());
    }
}
