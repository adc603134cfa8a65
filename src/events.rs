//! Input commands produced by the event loop and consumed by the game.

use glam::IVec2;

/// A high-level command decoded from raw SDL input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Begin a new run from the menu or the game-over screen.
    StartRun,
    /// A left click at the given playfield coordinate.
    Click(IVec2),
    TogglePause,
    ToggleMute,
    /// A typed character for the operative tag on the game-over screen.
    TagChar(char),
    TagBackspace,
    /// Upload the finished run to the leaderboard.
    SubmitScore,
    Exit,
}
