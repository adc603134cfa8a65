//! Centralized error types for the game.
//!
//! This module defines all error types used throughout the application,
//! providing a consistent error handling approach.

use std::io;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
/// It can represent any error that can occur during game operation.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Placement error: {0}")]
    Placement(#[from] PlacementError),

    #[error("Leaderboard error: {0}")]
    Leaderboard(#[from] LeaderboardError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Asset not found: {0}")]
    NotFound(String),
}

/// Errors related to image decode, distortion, and texture upload.
#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadFailed(String),

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Failed to encode animation: {0}")]
    EncodeFailed(String),

    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

/// Errors related to anomaly/decoy placement.
#[derive(thiserror::Error, Debug)]
pub enum PlacementError {
    #[error("No non-overlapping rectangle found after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("Requested size range does not fit the playfield: {0}")]
    DoesNotFit(String),
}

/// Errors related to the spreadsheet leaderboard.
#[derive(thiserror::Error, Debug)]
pub enum LeaderboardError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Malformed leaderboard payload: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for LeaderboardError {
    fn from(e: reqwest::Error) -> Self {
        LeaderboardError::Http(e.to_string())
    }
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
