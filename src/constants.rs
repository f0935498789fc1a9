pub const FPS: u32 = 60;                          // Frames per second
pub const DEFAULT_WINDOW_WIDTH: i32 = 960;        // Initial window width (pixels)
pub const WINDOW_MARGIN: f32 = 16.0;              // Space around the slider inside the window

pub const REM_PX: f32 = 16.0;                     // Pixels per rem
pub const NEXT_CONTROL_TOP: f32 = 0.38;           // Next control top offset, fraction of container height
pub const NEXT_ICON_NAME: &str = "chevron-right";
pub const NEXT_ICON_SIZE: &str = "4rem";

pub const BORDER_WIDTH: f32 = 4.0;                // Inset border thickness (pixels)
pub const IMAGE_PADDING: f32 = 0.25 * REM_PX;     // Gap between border and image content

pub const ALT_TEXT_SIZE: i32 = 20;                // Font size for alt text on broken images
