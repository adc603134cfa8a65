//! The on-screen glitch animation.
//!
//! Frames are produced by the distortion passes in [`crate::distortion`],
//! cropped to the anomaly's rectangle, and uploaded as textures once per
//! placement. Drawing then just cycles through the uploaded frames.

use image::RgbaImage;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};

use crate::constants::{GLITCH_FRAME_COUNT, GLITCH_FRAME_DURATION, HUD_HEIGHT};
use crate::distortion::render_glitch_frames;
use crate::error::{GameResult, TextureError};
use crate::placement::AnomalyRect;
use crate::texture::texture_from_image;

pub struct GlitchAnimation {
    frames: Vec<Texture>,
    rect: AnomalyRect,
    elapsed: f32,
}

impl GlitchAnimation {
    /// Distorts `rect` within the sector background and uploads the frames.
    pub fn new(
        creator: &TextureCreator<WindowContext>,
        background: &RgbaImage,
        rect: &AnomalyRect,
    ) -> GameResult<GlitchAnimation> {
        let (width, height) = background.dimensions();
        let w = rect.w.min(width.saturating_sub(rect.x));
        let h = rect.h.min(height.saturating_sub(rect.y));
        if w == 0 || h == 0 {
            return Err(TextureError::RenderFailed(
                "glitch rectangle outside the background".to_string(),
            )
            .into());
        }

        let frames = render_glitch_frames(background, rect, GLITCH_FRAME_COUNT)
            .iter()
            .map(|frame| {
                let region = image::imageops::crop_imm(frame, rect.x, rect.y, w, h).to_image();
                texture_from_image(creator, &region)
            })
            .collect::<GameResult<Vec<Texture>>>()?;

        Ok(GlitchAnimation {
            frames,
            rect: *rect,
            elapsed: 0.0,
        })
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Draws the current frame at the rectangle's playfield position, offset
    /// below the HUD strip.
    pub fn draw(&self, canvas: &mut Canvas<Window>) -> GameResult<()> {
        if self.frames.is_empty() {
            return Ok(());
        }
        let index = (self.elapsed / GLITCH_FRAME_DURATION) as usize % self.frames.len();
        let dst = Rect::new(
            self.rect.x as i32,
            (self.rect.y + HUD_HEIGHT) as i32,
            self.rect.w,
            self.rect.h,
        );
        canvas
            .copy(&self.frames[index], None, dst)
            .map_err(|e| TextureError::RenderFailed(e.to_string()))?;
        Ok(())
    }
}
