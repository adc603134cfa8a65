//! Sector background imagery.
//!
//! Each sector has a PNG under the asset root; when a file is missing or does
//! not decode, a deterministic procedural placeholder stands in so a run is
//! always playable. All images are normalized to the playfield size up front,
//! which keeps placement and distortion coordinates valid everywhere.

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use crate::asset::Asset;
use crate::constants::{PLAYFIELD_SIZE, SECTOR_COUNT};

/// The decoded background for every sector, in play order.
pub struct SectorImages {
    images: Vec<RgbaImage>,
}

impl SectorImages {
    /// Loads all sector backgrounds, substituting placeholders as needed.
    pub fn load() -> SectorImages {
        let images = Asset::sectors()
            .enumerate()
            .map(|(index, asset)| match decode(&asset) {
                Some(image) => {
                    debug!(sector = index + 1, "Sector image loaded");
                    normalize(image)
                }
                None => {
                    warn!(sector = index + 1, "Sector image missing, using placeholder");
                    placeholder_sector(index)
                }
            })
            .collect();
        SectorImages { images }
    }

    /// The background for a zero-based sector index.
    pub fn get(&self, level: usize) -> &RgbaImage {
        &self.images[level.min(SECTOR_COUNT - 1)]
    }
}

fn decode(asset: &Asset) -> Option<RgbaImage> {
    let bytes = asset.get_bytes().ok()?;
    match image::load_from_memory(&bytes) {
        Ok(image) => Some(image.to_rgba8()),
        Err(e) => {
            warn!(path = %asset.path().display(), error = %e, "Sector image failed to decode");
            None
        }
    }
}

fn normalize(image: RgbaImage) -> RgbaImage {
    if image.dimensions() == (PLAYFIELD_SIZE.x, PLAYFIELD_SIZE.y) {
        image
    } else {
        image::imageops::resize(
            &image,
            PLAYFIELD_SIZE.x,
            PLAYFIELD_SIZE.y,
            FilterType::Triangle,
        )
    }
}

/// A deterministic stand-in background: a tinted gradient with a grid, varied
/// per sector so levels still look distinct without assets.
pub fn placeholder_sector(index: usize) -> RgbaImage {
    let tint = [
        (40u32, 60u32, 80u32),
        (60, 40, 80),
        (80, 60, 40),
        (40, 80, 60),
        (70, 70, 40),
        (40, 70, 70),
        (80, 40, 60),
        (60, 80, 40),
        (50, 50, 90),
    ][index % SECTOR_COUNT];

    RgbaImage::from_fn(PLAYFIELD_SIZE.x, PLAYFIELD_SIZE.y, |x, y| {
        let grid = x % 70 == 0 || y % 70 == 0;
        let fade = (x + y) * 255 / (PLAYFIELD_SIZE.x + PLAYFIELD_SIZE.y);
        let channel = |base: u32| {
            let v = base + fade / 3 + if grid { 40 } else { 0 };
            v.min(255) as u8
        };
        Rgba([channel(tint.0), channel(tint.1), channel(tint.2), 255])
    })
}

/// The menu background: the glitch noise asset when present, otherwise
/// procedural static from a small integer hash.
pub fn glitch_noise() -> RgbaImage {
    if let Ok(bytes) = Asset::GlitchTexture.get_bytes() {
        if let Ok(image) = image::load_from_memory(&bytes) {
            return normalize(image.to_rgba8());
        }
        warn!("Glitch texture failed to decode, using procedural noise");
    }

    RgbaImage::from_fn(PLAYFIELD_SIZE.x, PLAYFIELD_SIZE.y, |x, y| {
        let hash = (x.wrapping_mul(31) ^ y.wrapping_mul(17)).wrapping_mul(2654435761);
        let v = (hash >> 16) as u8 / 4;
        Rgba([v, v + 10, v, 255])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_fill_the_playfield() {
        for index in 0..SECTOR_COUNT {
            let image = placeholder_sector(index);
            assert_eq!(image.dimensions(), (PLAYFIELD_SIZE.x, PLAYFIELD_SIZE.y));
        }
    }

    #[test]
    fn placeholders_differ_between_sectors() {
        let a = placeholder_sector(0);
        let b = placeholder_sector(1);
        assert_ne!(a.get_pixel(5, 5), b.get_pixel(5, 5));
    }

    #[test]
    fn noise_is_deterministic() {
        // Without the optional asset, the menu background must be stable.
        std::env::set_var(crate::asset::ASSET_DIR_ENV, "/nonexistent-for-test");
        let a = glitch_noise();
        let b = glitch_noise();
        assert_eq!(a.get_pixel(123, 456), b.get_pixel(123, 456));
    }
}
