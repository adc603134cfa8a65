//! Pixel distortion passes that fake the "glitch" effect.
//!
//! Everything in this module operates on plain [`RgbaImage`] buffers so it can
//! run (and be tested) without a window. The game uploads the produced frames
//! to SDL textures; [`encode_gif`] packs the same frames into a shareable
//! animated GIF.

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::constants::{GLITCH_FRAME_COUNT, MOSAIC_BLOCK};
use crate::error::TextureError;
use crate::placement::AnomalyRect;

/// One distortion pass. Frames of the glitch animation cycle through these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display)]
pub enum DistortionKind {
    /// Per-channel inversion, alpha preserved.
    Invert,
    /// RGB rotated to GBR.
    ChannelShift,
    /// Contrast pushed hard around mid-grey.
    Contrast,
    /// Block-downsampled mosaic.
    Mosaic,
}

impl DistortionKind {
    /// The pass used for frame `index` of the animation.
    pub fn for_frame(index: usize) -> DistortionKind {
        let all: Vec<DistortionKind> = DistortionKind::iter().collect();
        all[index % all.len()]
    }

    /// Applies this pass to `region` in place.
    pub fn apply(&self, region: &mut RgbaImage) {
        match self {
            DistortionKind::Invert => invert(region),
            DistortionKind::ChannelShift => channel_shift(region),
            DistortionKind::Contrast => contrast(region, 1.8),
            DistortionKind::Mosaic => mosaic(region, MOSAIC_BLOCK),
        }
    }
}

fn invert(region: &mut RgbaImage) {
    for pixel in region.pixels_mut() {
        let Rgba([r, g, b, a]) = *pixel;
        *pixel = Rgba([255 - r, 255 - g, 255 - b, a]);
    }
}

fn channel_shift(region: &mut RgbaImage) {
    for pixel in region.pixels_mut() {
        let Rgba([r, g, b, a]) = *pixel;
        *pixel = Rgba([g, b, r, a]);
    }
}

fn contrast(region: &mut RgbaImage, factor: f32) {
    for pixel in region.pixels_mut() {
        let Rgba([r, g, b, a]) = *pixel;
        let push = |v: u8| ((v as f32 - 128.0) * factor + 128.0).clamp(0.0, 255.0) as u8;
        *pixel = Rgba([push(r), push(g), push(b), a]);
    }
}

/// Replaces each `block`x`block` cell with its average color.
fn mosaic(region: &mut RgbaImage, block: u32) {
    let (width, height) = region.dimensions();
    let block = block.max(1);

    for by in (0..height).step_by(block as usize) {
        for bx in (0..width).step_by(block as usize) {
            let bw = block.min(width - bx);
            let bh = block.min(height - by);
            let count = (bw * bh) as u32;

            let mut sum = [0u32; 4];
            for y in by..by + bh {
                for x in bx..bx + bw {
                    let Rgba(channels) = *region.get_pixel(x, y);
                    for (acc, value) in sum.iter_mut().zip(channels) {
                        *acc += value as u32;
                    }
                }
            }

            let average = Rgba([
                (sum[0] / count) as u8,
                (sum[1] / count) as u8,
                (sum[2] / count) as u8,
                (sum[3] / count) as u8,
            ]);
            for y in by..by + bh {
                for x in bx..bx + bw {
                    region.put_pixel(x, y, average);
                }
            }
        }
    }
}

/// Clamps `rect` to the bounds of `image`, returning `None` when there is no
/// overlap at all (e.g. a placeholder image smaller than the playfield).
fn clamp_rect(image: &RgbaImage, rect: &AnomalyRect) -> Option<AnomalyRect> {
    let (width, height) = image.dimensions();
    if rect.x >= width || rect.y >= height {
        return None;
    }
    let w = rect.w.min(width - rect.x);
    let h = rect.h.min(height - rect.y);
    if w == 0 || h == 0 {
        return None;
    }
    Some(AnomalyRect::new(rect.x, rect.y, w, h))
}

/// Crops `rect` out of `source`, applies one distortion pass per frame, and
/// pastes it back, yielding a loopable frame sequence.
///
/// Pixels outside `rect` are untouched in every frame.
pub fn render_glitch_frames(
    source: &RgbaImage,
    rect: &AnomalyRect,
    frame_count: usize,
) -> Vec<RgbaImage> {
    let frame_count = if frame_count == 0 { GLITCH_FRAME_COUNT } else { frame_count };
    let Some(rect) = clamp_rect(source, rect) else {
        return vec![source.clone(); frame_count];
    };

    (0..frame_count)
        .map(|index| {
            let mut region =
                image::imageops::crop_imm(source, rect.x, rect.y, rect.w, rect.h).to_image();
            DistortionKind::for_frame(index).apply(&mut region);

            let mut frame = source.clone();
            image::imageops::replace(&mut frame, &region, rect.x as i64, rect.y as i64);
            frame
        })
        .collect()
}

/// Encodes frames as an infinitely looping animated GIF.
pub fn encode_gif(frames: &[RgbaImage], delay_ms: u32) -> Result<Vec<u8>, TextureError> {
    if frames.is_empty() {
        return Err(TextureError::EncodeFailed("no frames to encode".to_string()));
    }

    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| TextureError::EncodeFailed(e.to_string()))?;

        for frame in frames {
            let frame = Frame::from_parts(frame.clone(), 0, 0, Delay::from_numer_denom_ms(delay_ms, 1));
            encoder
                .encode_frame(frame)
                .map_err(|e| TextureError::EncodeFailed(e.to_string()))?;
        }
    }

    Ok(bytes)
}
