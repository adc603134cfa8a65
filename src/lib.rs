//! DETROIT: ANOMALY, a find-the-glitch clicker.
//!
//! One visual anomaly hides somewhere in each sector's camera feed. Click it
//! before it relocates; clear all nine sectors and your time goes on the
//! spreadsheet leaderboard. Later sectors add non-scoring decoy glitches.
//!
//! The gameplay core (placement, hit testing, distortion, leaderboard
//! normalization) is free of SDL so it can be exercised headlessly; the
//! [`app`] and [`game`] modules wire it to a window.

pub mod app;
pub mod asset;
pub mod audio;
pub mod constants;
pub mod distortion;
pub mod error;
pub mod events;
pub mod game;
pub mod hud;
pub mod leaderboard;
pub mod placement;
pub mod texture;
