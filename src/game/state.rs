//! Pure gameplay state, independent of SDL.
//!
//! The `GameState` struct holds all the essential per-run data: the stage,
//! sector index, active placement, timers, and counters. Rendering and audio
//! react to the outcomes these methods return, which keeps the whole
//! progression testable without a window.

use glam::IVec2;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::constants::{self, FLASH_DURATION, HIT_TOLERANCE, SECTOR_COUNT, TAG_LENGTH};
use crate::game::stage::GameStage;
use crate::leaderboard::{sanitize_tag, ScoreRow};
use crate::placement::Placement;

/// Screen-flash feedback kinds: white on a hit, red on a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Hit,
    Miss,
}

/// What a click did to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click happened outside the Playing stage.
    Ignored,
    /// The anomaly was hit. `finished` is set on the final sector.
    Hit { finished: bool },
    /// A miss (background or decoy); the anomaly relocated as a penalty.
    Miss,
}

/// What a frame tick did to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    /// The relocation timer expired and the placement moved.
    Relocated,
}

pub struct GameState {
    pub stage: GameStage,
    /// Zero-based sector index.
    pub level: usize,
    /// The active target and decoys; `None` outside of a run.
    pub placement: Option<Placement>,

    /// Total run time, in seconds.
    pub run_time: f32,
    /// Seconds since the placement last moved.
    pub since_move: f32,

    pub hits: u32,
    pub misses: u32,
    pub combo: u32,
    pub best_combo: u32,
    /// Relocations caused by the timer rather than a miss.
    pub timeout_moves: u32,

    /// Active screen flash and its remaining lifetime in seconds.
    pub flash: Option<(Flash, f32)>,

    /// Final run time, set when the last sector is cleared.
    pub final_time: Option<f64>,
    /// Operative tag being typed on the game-over screen.
    pub tag_input: String,
    pub score_submitted: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            stage: GameStage::Menu,
            level: 0,
            placement: None,
            run_time: 0.0,
            since_move: 0.0,
            hits: 0,
            misses: 0,
            combo: 0,
            best_combo: 0,
            timeout_moves: 0,
            flash: None,
            final_time: None,
            tag_input: String::new(),
            score_submitted: false,
        }
    }

    /// Resets counters and enters the first sector.
    pub fn start_run(&mut self, rng: &mut impl Rng) {
        *self = GameState::new();
        self.stage = GameStage::Playing;
        self.relocate(rng);
        info!("Run started");
    }

    /// Seconds before the current sector's placement relocates on its own.
    pub fn relocation_delay(&self) -> f32 {
        constants::relocation_delay(self.level)
    }

    /// Handles a left click at playfield coordinates.
    pub fn handle_click(&mut self, point: IVec2, rng: &mut impl Rng) -> ClickOutcome {
        if !self.stage.is_playing() {
            return ClickOutcome::Ignored;
        }
        let Some(placement) = &self.placement else {
            return ClickOutcome::Ignored;
        };

        if placement.target.hit(point, HIT_TOLERANCE) {
            self.hits += 1;
            self.combo += 1;
            self.best_combo = self.best_combo.max(self.combo);
            self.flash = Some((Flash::Hit, FLASH_DURATION));

            if self.level + 1 >= SECTOR_COUNT {
                self.finish();
                return ClickOutcome::Hit { finished: true };
            }

            self.level += 1;
            debug!(sector = self.level + 1, combo = self.combo, "Sector cleared");
            self.relocate(rng);
            ClickOutcome::Hit { finished: false }
        } else {
            // Decoy clicks land here too; they never score.
            self.misses += 1;
            self.combo = 0;
            self.flash = Some((Flash::Miss, FLASH_DURATION));
            self.relocate(rng);
            ClickOutcome::Miss
        }
    }

    /// Advances timers by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        if let Some((kind, ttl)) = self.flash {
            let ttl = ttl - dt;
            self.flash = if ttl > 0.0 { Some((kind, ttl)) } else { None };
        }

        if !self.stage.is_playing() {
            return TickOutcome::Idle;
        }

        self.run_time += dt;
        self.since_move += dt;
        TickOutcome::Idle
    }

    /// Checks the relocation timer, moving the placement when it expired.
    /// Split from [`tick`](Self::tick) so callers control the RNG.
    pub fn tick_relocation(&mut self, rng: &mut impl Rng) -> TickOutcome {
        if !self.stage.is_playing() {
            return TickOutcome::Idle;
        }
        if self.since_move <= self.relocation_delay() {
            return TickOutcome::Idle;
        }

        self.timeout_moves += 1;
        debug!(sector = self.level + 1, "Relocation timer expired");
        self.relocate(rng);
        TickOutcome::Relocated
    }

    fn relocate(&mut self, rng: &mut impl Rng) {
        match Placement::generate(self.level, rng) {
            Ok(placement) => {
                self.placement = Some(placement);
                self.since_move = 0.0;
            }
            // Keep the previous placement rather than stalling the run.
            Err(e) => warn!(level = self.level, error = %e, "Placement failed, keeping previous"),
        }
    }

    fn finish(&mut self) {
        self.stage = GameStage::GameOver;
        self.placement = None;
        self.final_time = Some(self.run_time as f64);
        info!(
            time = self.run_time,
            misses = self.misses,
            best_combo = self.best_combo,
            "Run complete"
        );
    }

    /// Fraction of the relocation window remaining, 0..=1, for the HUD bar.
    pub fn timer_fraction(&self) -> f32 {
        crate::hud::timer_fraction(self.since_move, self.relocation_delay())
    }

    pub fn push_tag_char(&mut self, c: char) {
        if self.stage != GameStage::GameOver || self.score_submitted {
            return;
        }
        let sanitized = sanitize_tag(&format!("{}{}", self.tag_input, c));
        self.tag_input = sanitized;
    }

    pub fn pop_tag_char(&mut self) {
        if self.stage == GameStage::GameOver && !self.score_submitted {
            self.tag_input.pop();
        }
    }

    pub fn tag_complete(&self) -> bool {
        self.tag_input.len() == TAG_LENGTH
    }

    /// Builds the leaderboard row for this run, once finished and tagged.
    pub fn score_row(&self, name: &str, usn: &str) -> Option<ScoreRow> {
        let time = self.final_time?;
        if !self.tag_complete() {
            return None;
        }
        Some(ScoreRow {
            tag: self.tag_input.clone(),
            name: name.to_string(),
            usn: usn.to_string(),
            time,
        })
    }
}
