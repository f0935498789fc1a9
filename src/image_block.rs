use raylib::prelude::*;

use crate::constants::*;
use crate::texture_loader::LoadState;

const DIVIDER_COLOR: Color = Color { r: 200, g: 200, b: 200, a: 255 };
const BROKEN_FILL: Color = Color { r: 235, g: 235, b: 235, a: 255 };

/// A linked image laid out at a fixed height across the full available width.
#[derive(Debug, Clone)]
pub struct ImageBlock {
    /// Link target, the image URL exactly as given
    pub href: String,
    pub alt: String,
    /// Clickable region; also the outer edge of the inset border
    pub frame: Rectangle,
    /// Where the image pixels are drawn, inside the padding
    pub content: Rectangle,
}

/// Lays out one image block. `bounds` supplies position and available width; its height is ignored.
///
/// Non-finite or negative heights collapse to zero.
pub fn image_block(url: &str, height: f32, bounds: Rectangle, alt: String) -> ImageBlock {
    let height = sanitize_height(height);
    let width = bounds.width.max(0.0);
    let frame = Rectangle::new(bounds.x, bounds.y, width, height);
    let content = Rectangle::new(
        frame.x + IMAGE_PADDING,
        frame.y + IMAGE_PADDING,
        (frame.width - 2.0 * IMAGE_PADDING).max(0.0),
        (frame.height - 2.0 * IMAGE_PADDING).max(0.0),
    );

    ImageBlock {
        href: url.to_string(),
        alt,
        frame,
        content,
    }
}

/// Accessible description for the image at `index` (0-based) of `total`.
pub fn alt_text(index: usize, total: usize) -> String {
    format!("Image {} of {}", index + 1, total)
}

/// Point-in-rectangle test; empty rectangles contain nothing.
pub fn contains(rect: &Rectangle, point: Vector2) -> bool {
    rect.width > 0.0
        && rect.height > 0.0
        && point.x >= rect.x
        && point.x < rect.x + rect.width
        && point.y >= rect.y
        && point.y < rect.y + rect.height
}

fn sanitize_height(height: f32) -> f32 {
    if height.is_finite() && height > 0.0 { height } else { 0.0 }
}

impl ImageBlock {
    pub fn contains(&self, point: Vector2) -> bool {
        contains(&self.frame, point)
    }

    pub fn draw<D: RaylibDraw>(&self, d: &mut D, image: &LoadState) {
        if self.frame.width <= 0.0 || self.frame.height <= 0.0 {
            return;
        }

        match image {
            LoadState::Ready(texture) => {
                // Stretched to the box, same as an <img> with both width and height fixed
                d.draw_texture_pro(
                    texture,
                    Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
                    self.content,
                    Vector2::new(0.0, 0.0),
                    0.0,
                    Color::WHITE,
                );
            }
            LoadState::Broken => {
                d.draw_rectangle_rec(self.content, BROKEN_FILL);
                d.draw_text(
                    &self.alt,
                    (self.content.x + IMAGE_PADDING) as i32,
                    (self.content.y + IMAGE_PADDING) as i32,
                    ALT_TEXT_SIZE,
                    Color::DARKGRAY,
                );
            }
            LoadState::Loading => {}
        }

        d.draw_rectangle_lines_ex(self.frame, BORDER_WIDTH, DIVIDER_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rectangle {
        Rectangle::new(10.0, 20.0, 800.0, 1000.0)
    }

    #[test]
    fn block_uses_height_and_full_width() {
        let block = image_block("a.png", 300.0, bounds(), alt_text(0, 3));
        assert_eq!(
            (block.frame.x, block.frame.y, block.frame.width, block.frame.height),
            (10.0, 20.0, 800.0, 300.0)
        );
        assert_eq!(
            (block.content.x, block.content.y, block.content.width, block.content.height),
            (14.0, 24.0, 792.0, 292.0)
        );
    }

    #[test]
    fn link_target_is_url_verbatim() {
        let url = "https://example.com/img%20one.png?w=300&h=200#frag";
        let block = image_block(url, 300.0, bounds(), alt_text(0, 1));
        assert_eq!(block.href, url);
    }

    #[test]
    fn invalid_heights_collapse_to_zero() {
        for height in [-5.0, f32::NAN, f32::INFINITY, 0.0] {
            let block = image_block("a.png", height, bounds(), alt_text(0, 1));
            assert_eq!(block.frame.height, 0.0);
            assert_eq!(block.content.height, 0.0);
            assert!(!block.contains(Vector2::new(20.0, 20.0)));
        }
    }

    #[test]
    fn alt_text_is_one_based() {
        assert_eq!(alt_text(0, 3), "Image 1 of 3");
        assert_eq!(alt_text(2, 3), "Image 3 of 3");
    }

    #[test]
    fn contains_frame_points_only() {
        let block = image_block("a.png", 300.0, bounds(), alt_text(0, 1));
        assert!(block.contains(Vector2::new(400.0, 150.0)));
        assert!(!block.contains(Vector2::new(400.0, 400.0)));
        assert!(!block.contains(Vector2::new(5.0, 150.0)));
    }
}
