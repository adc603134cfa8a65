//! Texture plumbing between [`image`] buffers and SDL.

pub mod glitch;
pub mod sector;

use image::RgbaImage;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{BlendMode, Texture, TextureCreator};
use sdl2::video::WindowContext;

use crate::error::{GameResult, TextureError};

/// Uploads an RGBA buffer into a texture. `ABGR8888` matches the byte order
/// of [`RgbaImage`] rows on little-endian targets.
pub fn texture_from_image(
    creator: &TextureCreator<WindowContext>,
    image: &RgbaImage,
) -> GameResult<Texture> {
    let (width, height) = image.dimensions();
    let mut texture = creator
        .create_texture_streaming(PixelFormatEnum::ABGR8888, width, height)
        .map_err(|e| TextureError::LoadFailed(e.to_string()))?;
    texture
        .update(None, image.as_raw(), (width * 4) as usize)
        .map_err(|e| TextureError::LoadFailed(e.to_string()))?;
    texture.set_blend_mode(BlendMode::Blend);
    Ok(texture)
}
