use raylib::prelude::*;

use crate::constants::*;
use crate::error::{Error, Result};
use crate::icon::IconSize;
use crate::image_block::{ImageBlock, alt_text, contains, image_block};
use crate::state::Selection;

/// Carousel over a fixed list of image URLs, one shown at a time.
#[derive(Debug, Clone)]
pub struct ImageSlider {
    images: Vec<String>,
    height: f32,
    selection: Selection,
    next_icon: IconSize,
}

/// Where everything goes for one frame.
#[derive(Debug, Clone)]
pub struct SliderLayout {
    pub block: ImageBlock,
    pub next_control: Rectangle,
}

/// Outcome of a click on the slider.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SliderAction {
    /// The next control was hit; `index` is now displayed
    Advanced { index: usize },
    /// The image was hit; `url` should open in an external viewer
    OpenLink { url: String },
    Ignored,
}

impl ImageSlider {
    pub fn new(images: Vec<String>, height: f32) -> Result<Self> {
        let selection = Selection::new(images.len()).ok_or(Error::EmptyImageList)?;
        let next_icon = IconSize::parse(NEXT_ICON_SIZE)?;
        Ok(Self {
            images,
            height,
            selection,
            next_icon,
        })
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn selected_index(&self) -> usize {
        self.selection.index()
    }

    pub fn current_image(&self) -> &str {
        &self.images[self.selection.index()]
    }

    /// Advances to the next image, wrapping after the last, and returns the new index.
    pub fn next(&mut self) -> usize {
        let index = self.selection.advance();
        tracing::debug!(index, url = %self.current_image(), "advanced to next image");
        index
    }

    /// Lays out the current image inside `bounds` (position and available width).
    pub fn layout(&self, bounds: Rectangle) -> SliderLayout {
        let index = self.selection.index();
        let block = image_block(
            self.current_image(),
            self.height,
            bounds,
            alt_text(index, self.images.len()),
        );
        let container = block.frame;
        let size = self.next_icon.px();
        let next_control = Rectangle::new(
            container.x + container.width - size,
            container.y + container.height * NEXT_CONTROL_TOP,
            size,
            size,
        );

        SliderLayout { block, next_control }
    }

    /// Resolves a click at `point`. The next control sits on top of the image and wins.
    pub fn handle_click(&mut self, point: Vector2, bounds: Rectangle) -> SliderAction {
        let layout = self.layout(bounds);
        if contains(&layout.next_control, point) {
            SliderAction::Advanced { index: self.next() }
        } else if layout.block.contains(point) {
            SliderAction::OpenLink { url: layout.block.href }
        } else {
            SliderAction::Ignored
        }
    }
}
