//! High-level stage of the game.

/// A resource-style enum tracking the overall stage of the game, advanced
/// explicitly by the 60 FPS loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GameStage {
    /// Title screen, waiting for the player to start.
    #[default]
    Menu,
    /// A run is in progress.
    Playing,
    /// The run ended; final time, tag entry, and the leaderboard are shown.
    GameOver,
}

impl GameStage {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameStage::Playing)
    }
}
