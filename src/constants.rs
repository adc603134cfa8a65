//! This module contains all the constants used in the game.

use std::ops::RangeInclusive;
use std::time::Duration;

use glam::UVec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of the playfield where sector images and anomalies live, in pixels.
pub const PLAYFIELD_SIZE: UVec2 = UVec2::new(700, 700);
/// The height of the HUD strip above the playfield, in pixels.
pub const HUD_HEIGHT: u32 = 60;
/// The size of the whole canvas (HUD strip + playfield), in pixels.
pub const CANVAS_SIZE: UVec2 = UVec2::new(PLAYFIELD_SIZE.x, PLAYFIELD_SIZE.y + HUD_HEIGHT);

/// The scale factor for the window.
pub const SCALE: f32 = 1.0;

/// The number of sectors in a full run.
pub const SECTOR_COUNT: usize = 9;

/// How far beyond the anomaly's edges a click still counts as a hit, in pixels.
pub const HIT_TOLERANCE: u32 = 12;

/// Minimum clearance kept between the anomaly and any decoy, in pixels.
pub const PLACEMENT_BUFFER: u32 = 24;

/// How many candidate rectangles are tried before placement gives up.
pub const PLACEMENT_MAX_ATTEMPTS: u32 = 32;

/// How long hit/miss screen flashes linger, in seconds.
pub const FLASH_DURATION: f32 = 0.08;

/// Frames rendered for one loop of the glitch animation.
pub const GLITCH_FRAME_COUNT: usize = 6;
/// Seconds each glitch animation frame is shown.
pub const GLITCH_FRAME_DURATION: f32 = 0.09;
/// Per-frame delay used when the animation is encoded as a GIF, in milliseconds.
pub const GLITCH_GIF_DELAY_MS: u32 = 90;

/// Block edge length for the mosaic distortion pass, in pixels.
pub const MOSAIC_BLOCK: u32 = 8;

/// Maximum number of rows shown on the leaderboard.
pub const LEADERBOARD_LIMIT: usize = 10;

/// Length of an operative tag.
pub const TAG_LENGTH: usize = 3;

/// The anomaly's side-length range for a sector. Starts at an 80..=200
/// window and tightens by 8px per sector, floored at 32px.
pub fn anomaly_size_range(level: usize) -> RangeInclusive<u32> {
    let shrink = (level as u32) * 8;
    let min = 80u32.saturating_sub(shrink).max(32);
    let max = 200u32.saturating_sub(shrink).max(min + 16);
    min..=max
}

/// Seconds before the anomaly relocates on its own. Shrinks with the sector
/// index, floored so late sectors stay winnable.
pub fn relocation_delay(level: usize) -> f32 {
    (3.5 - 0.25 * level as f32).max(1.25)
}

/// Number of non-scoring decoy rectangles placed alongside the anomaly.
pub fn decoy_count(level: usize) -> usize {
    match level {
        0..=2 => 0,
        3..=5 => 1,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        // 60 FPS = 16.67ms per frame
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_canvas_size() {
        assert_eq!(CANVAS_SIZE.x, PLAYFIELD_SIZE.x);
        assert_eq!(CANVAS_SIZE.y, PLAYFIELD_SIZE.y + HUD_HEIGHT);
        assert_eq!(PLAYFIELD_SIZE, UVec2::new(700, 700));
    }

    #[test]
    fn test_size_range_first_sector() {
        assert_eq!(anomaly_size_range(0), 80..=200);
    }

    #[test]
    fn test_size_range_shrinks_monotonically() {
        for level in 1..SECTOR_COUNT {
            let prev = anomaly_size_range(level - 1);
            let cur = anomaly_size_range(level);
            assert!(cur.end() <= prev.end());
            assert!(cur.start() <= prev.start());
            assert!(cur.start() <= cur.end());
        }
    }

    #[test]
    fn test_size_range_never_collapses() {
        // Even absurd levels must keep a valid, clickable window.
        for level in 0..64 {
            let range = anomaly_size_range(level);
            assert!(*range.start() >= 32);
            assert!(range.start() < range.end());
            assert!(*range.end() < PLAYFIELD_SIZE.x.min(PLAYFIELD_SIZE.y));
        }
    }

    #[test]
    fn test_relocation_delay_shrinks_and_floors() {
        assert_eq!(relocation_delay(0), 3.5);
        for level in 1..SECTOR_COUNT {
            assert!(relocation_delay(level) <= relocation_delay(level - 1));
        }
        assert_eq!(relocation_delay(100), 1.25);
    }

    #[test]
    fn test_decoy_count_per_sector() {
        assert_eq!(decoy_count(0), 0);
        assert_eq!(decoy_count(2), 0);
        assert_eq!(decoy_count(3), 1);
        assert_eq!(decoy_count(5), 1);
        assert_eq!(decoy_count(6), 2);
        assert_eq!(decoy_count(8), 2);
    }
}
