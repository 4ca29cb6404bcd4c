//! Header hide/show and banner parallax driven by the scroll position.

pub const HEADER_HIDE_THRESHOLD: u32 = 100;
pub const HEADER_TRANSPARENT_THRESHOLD: u32 = 50;
const BANNER_IMAGE_SPEED: f32 = 0.3;
const BANNER_TEXT_SPEED: f32 = 0.5;
const BANNER_TEXT_FACTOR: f32 = -0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollEffects {
    y: u32,
    header_hidden: bool,
    header_transparent: bool,
}

impl ScrollEffects {
    pub fn apply(&mut self, y: u32) {
        self.header_hidden = y > self.y && y > HEADER_HIDE_THRESHOLD;
        self.header_transparent = y > HEADER_TRANSPARENT_THRESHOLD;
        self.y = y;
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn header_hidden(&self) -> bool {
        self.header_hidden
    }

    pub fn header_transparent(&self) -> bool {
        self.header_transparent
    }

    pub fn banner_image_offset(&self) -> f32 {
        self.y as f32 * BANNER_IMAGE_SPEED
    }

    pub fn banner_text_offset(&self) -> f32 {
        self.y as f32 * BANNER_TEXT_SPEED * BANNER_TEXT_FACTOR
    }
}
