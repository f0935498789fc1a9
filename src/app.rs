use raylib::prelude::*;

use crate::constants::*;
use crate::engine::Widget;
use crate::icon::{IconRenderer, VectorIcons};
use crate::launcher::LinkOpener;
use crate::slider::{ImageSlider, SliderAction};
use crate::texture_loader::{ImageLoader, LoadState, load_texture};

/// Window height that fits a slider of `height` with a margin on each side.
pub fn window_height(height: f32) -> i32 {
    let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
    (height + 2.0 * WINDOW_MARGIN).ceil() as i32
}

/// The slider wired to a window: mouse input, image loading and link opening.
pub struct SliderApp<O: LinkOpener, I: IconRenderer = VectorIcons> {
    slider: ImageSlider,
    loader: ImageLoader,
    image: LoadState,
    opener: O,
    icons: I,
    bounds: Rectangle,
}

impl<O: LinkOpener> SliderApp<O> {
    pub fn new(slider: ImageSlider, opener: O) -> Self {
        Self::with_icons(slider, opener, VectorIcons)
    }
}

impl<O: LinkOpener, I: IconRenderer> SliderApp<O, I> {
    pub fn with_icons(slider: ImageSlider, opener: O, icons: I) -> Self {
        let mut app = Self {
            slider,
            loader: ImageLoader::new(),
            image: LoadState::Loading,
            opener,
            icons,
            bounds: Rectangle::new(WINDOW_MARGIN, WINDOW_MARGIN, 0.0, 0.0),
        };
        app.request_current();
        app
    }

    pub fn slider(&self) -> &ImageSlider {
        &self.slider
    }

    fn request_current(&mut self) {
        // The previous texture is dropped here; nothing else is kept around
        self.image = LoadState::Loading;
        self.loader.request(self.slider.current_image());
    }

    fn on_click(&mut self, point: Vector2) {
        match self.slider.handle_click(point, self.bounds) {
            SliderAction::Advanced { index } => {
                tracing::info!(index, url = %self.slider.current_image(), "showing next image");
                self.request_current();
            }
            SliderAction::OpenLink { url } => {
                if let Err(e) = self.opener.open(&url) {
                    tracing::warn!("{e}");
                }
            }
            SliderAction::Ignored => {}
        }
    }

    fn receive_images(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let Some(loaded) = self.loader.poll() else {
            return;
        };

        self.image = match loaded
            .result
            .and_then(|fetched| load_texture(rl, thread, &loaded.url, &fetched))
        {
            Ok(texture) => {
                tracing::debug!(generation = self.loader.generation(), url = %loaded.url, width = texture.width(), height = texture.height(), "image ready");
                LoadState::Ready(texture)
            }
            Err(e) => {
                tracing::warn!("broken image: {e}");
                LoadState::Broken
            }
        };
    }
}

impl<O: LinkOpener, I: IconRenderer> Widget for SliderApp<O, I> {
    fn update(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        self.bounds = Rectangle::new(
            WINDOW_MARGIN,
            WINDOW_MARGIN,
            rl.get_screen_width() as f32 - 2.0 * WINDOW_MARGIN,
            rl.get_screen_height() as f32 - 2.0 * WINDOW_MARGIN,
        );

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let point = rl.get_mouse_position();
            self.on_click(point);
        }

        self.receive_images(rl, thread);
    }

    fn draw(&self, d: &mut RaylibDrawHandle) {
        let layout = self.slider.layout(self.bounds);
        layout.block.draw(d, &self.image);
        self.icons
            .draw_icon(d, NEXT_ICON_NAME, layout.next_control, Color::WHITE);
    }
}
