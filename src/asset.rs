//! On-disk asset loading.
//!
//! Every asset is optional at runtime: the game degrades (placeholder sector
//! imagery, silent audio, shape-only HUD) rather than failing when a file is
//! missing. The asset root defaults to `assets/` next to the working directory
//! and can be overridden with `DETROIT_ASSETS`.

use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use crate::constants::SECTOR_COUNT;
use crate::error::AssetError;

/// Environment variable overriding the asset root directory.
pub const ASSET_DIR_ENV: &str = "DETROIT_ASSETS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    /// Background image for a sector, zero-indexed.
    Sector(usize),
    /// Static noise texture used on the menu screen.
    GlitchTexture,
    Font,
    HitSound,
    MissSound,
    GameOverSound,
    Music,
}

impl Asset {
    /// All sector image assets, in play order.
    pub fn sectors() -> impl Iterator<Item = Asset> {
        (0..SECTOR_COUNT).map(Asset::Sector)
    }

    /// Path of this asset relative to the asset root.
    pub fn relative_path(&self) -> PathBuf {
        match self {
            Asset::Sector(index) => PathBuf::from(format!("sectors/sector_{}.png", index + 1)),
            Asset::GlitchTexture => PathBuf::from("glitch.png"),
            Asset::Font => PathBuf::from("font/hud.ttf"),
            Asset::HitSound => PathBuf::from("sfx/hit.ogg"),
            Asset::MissSound => PathBuf::from("sfx/miss.ogg"),
            Asset::GameOverSound => PathBuf::from("sfx/game_over.ogg"),
            Asset::Music => PathBuf::from("sfx/ambience.ogg"),
        }
    }

    /// Absolute path of this asset under the configured asset root.
    pub fn path(&self) -> PathBuf {
        asset_root().join(self.relative_path())
    }

    /// Reads the asset from disk.
    pub fn get_bytes(&self) -> Result<Cow<'static, [u8]>, AssetError> {
        let path = self.path();
        if !path.is_file() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }
        let bytes = fs::read(&path)?;
        Ok(Cow::Owned(bytes))
    }

    pub fn exists(&self) -> bool {
        self.path().is_file()
    }
}

/// The directory assets are loaded from.
pub fn asset_root() -> PathBuf {
    std::env::var_os(ASSET_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_paths_are_one_indexed() {
        assert_eq!(
            Asset::Sector(0).relative_path(),
            PathBuf::from("sectors/sector_1.png")
        );
        assert_eq!(
            Asset::Sector(8).relative_path(),
            PathBuf::from("sectors/sector_9.png")
        );
    }

    #[test]
    fn one_sector_asset_per_level() {
        assert_eq!(Asset::sectors().count(), SECTOR_COUNT);
    }
}
