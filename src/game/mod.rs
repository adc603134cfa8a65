//! The game proper: owns the pure state, the SDL-side resources, and the
//! leaderboard, and reacts to decoded input commands.

pub mod stage;
pub mod state;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::ttf::{Font, Sdl2TtfContext};
use sdl2::video::{Window, WindowContext};
use tracing::{debug, warn};

use crate::asset::Asset;
use crate::audio::Audio;
use crate::constants::{CANVAS_SIZE, HUD_HEIGHT, PLAYFIELD_SIZE};
use crate::error::GameResult;
use crate::events::GameCommand;
use crate::game::stage::GameStage;
use crate::game::state::{ClickOutcome, Flash, GameState, TickOutcome};
use crate::hud;
use crate::leaderboard::Leaderboard;
use crate::texture::glitch::GlitchAnimation;
use crate::texture::sector::{self, SectorImages};
use crate::texture::texture_from_image;

/// Environment variable for the operative's display name on the leaderboard.
pub const OPERATIVE_NAME_ENV: &str = "DETROIT_OPERATIVE_NAME";
/// Environment variable for the operative's USN on the leaderboard.
pub const OPERATIVE_USN_ENV: &str = "DETROIT_OPERATIVE_USN";

const FONT_POINT_SIZE: u16 = 22;

pub struct Game {
    pub state: GameState,
    pub exit: bool,
    paused: bool,

    audio: Audio,
    leaderboard: Leaderboard,
    rng: StdRng,

    images: SectorImages,
    sector_textures: Vec<Texture>,
    menu_noise: Texture,
    glitches: Vec<GlitchAnimation>,
    font: Option<Font<'static, 'static>>,
    texture_creator: TextureCreator<WindowContext>,
}

impl Game {
    pub fn new(
        texture_creator: TextureCreator<WindowContext>,
        ttf: &'static Sdl2TtfContext,
    ) -> GameResult<Game> {
        let images = SectorImages::load();
        let sector_textures = (0..crate::constants::SECTOR_COUNT)
            .map(|level| texture_from_image(&texture_creator, images.get(level)))
            .collect::<GameResult<Vec<Texture>>>()?;
        let menu_noise = texture_from_image(&texture_creator, &sector::glitch_noise())?;

        let font = match Asset::Font.exists() {
            true => match ttf.load_font(Asset::Font.path(), FONT_POINT_SIZE) {
                Ok(font) => Some(font),
                Err(e) => {
                    warn!(error = %e, "Font failed to load, HUD text disabled");
                    None
                }
            },
            false => {
                warn!(path = %Asset::Font.path().display(), "Font asset missing, HUD text disabled");
                None
            }
        };

        Ok(Game {
            state: GameState::new(),
            exit: false,
            paused: false,
            audio: Audio::new(),
            leaderboard: Leaderboard::connect(),
            rng: StdRng::from_os_rng(),
            images,
            sector_textures,
            menu_noise,
            glitches: Vec::new(),
            font,
            texture_creator,
        })
    }

    pub fn handle_command(&mut self, command: GameCommand) {
        match command {
            GameCommand::StartRun => {
                if self.state.stage.is_playing() {
                    return;
                }
                self.paused = false;
                self.state.start_run(&mut self.rng);
                self.rebuild_glitches();
                // Safe on every run start, the track keeps playing across runs.
                self.audio.ensure_music();
            }
            GameCommand::Click(point) => {
                if self.paused {
                    return;
                }
                match self.state.handle_click(point, &mut self.rng) {
                    ClickOutcome::Hit { finished: true } => {
                        self.glitches.clear();
                        self.audio.game_over();
                        self.leaderboard.refresh();
                    }
                    ClickOutcome::Hit { finished: false } => {
                        self.audio.hit();
                        self.rebuild_glitches();
                    }
                    ClickOutcome::Miss => {
                        self.audio.miss();
                        self.rebuild_glitches();
                    }
                    ClickOutcome::Ignored => {}
                }
            }
            GameCommand::TogglePause => {
                if self.state.stage.is_playing() {
                    self.paused = !self.paused;
                    debug!(paused = self.paused, "Pause toggled");
                }
            }
            GameCommand::ToggleMute => {
                let muted = !self.audio.is_muted();
                self.audio.set_mute(muted);
            }
            GameCommand::TagChar(c) => self.state.push_tag_char(c),
            GameCommand::TagBackspace => self.state.pop_tag_char(),
            GameCommand::SubmitScore => self.submit_score(),
            GameCommand::Exit => self.exit = true,
        }
    }

    fn submit_score(&mut self) {
        if self.state.score_submitted {
            return;
        }
        let name =
            std::env::var(OPERATIVE_NAME_ENV).unwrap_or_else(|_| "Unknown Operative".to_string());
        let usn = std::env::var(OPERATIVE_USN_ENV).unwrap_or_else(|_| "UNKNOWN".to_string());
        let Some(row) = self.state.score_row(&name, &usn) else {
            debug!("Score not ready for upload, tag incomplete");
            return;
        };
        self.leaderboard.submit(row);
        self.state.score_submitted = true;
    }

    /// Advances timers and animations. Returns `true` when the game wants
    /// to exit.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.paused {
            self.state.tick(dt);
            if self.state.tick_relocation(&mut self.rng) == TickOutcome::Relocated {
                self.rebuild_glitches();
            }
            for glitch in &mut self.glitches {
                glitch.tick(dt);
            }
        }
        self.exit
    }

    /// Re-renders the glitch animations for the current placement. The target
    /// and every decoy get identical treatment so decoys are not visually
    /// distinguishable.
    fn rebuild_glitches(&mut self) {
        self.glitches.clear();
        let Some(placement) = self.state.placement.clone() else {
            return;
        };

        let background = self.images.get(self.state.level);
        for rect in placement.rects() {
            match GlitchAnimation::new(&self.texture_creator, background, rect) {
                Ok(glitch) => self.glitches.push(glitch),
                Err(e) => warn!(error = %e, "Glitch render failed"),
            }
        }
    }

    pub fn draw(&mut self, canvas: &mut Canvas<Window>) -> GameResult<()> {
        canvas.set_draw_color(Color::RGB(8, 8, 10));
        canvas.clear();

        match self.state.stage {
            GameStage::Menu => {
                canvas
                    .copy(
                        &self.menu_noise,
                        None,
                        Rect::new(0, 0, CANVAS_SIZE.x, CANVAS_SIZE.y),
                    )
                    .map_err(crate::error::GameError::Sdl)?;
                hud::draw_menu(canvas, &self.texture_creator, self.font.as_ref())?;
            }
            GameStage::Playing => {
                canvas
                    .copy(
                        &self.sector_textures[self.state.level],
                        None,
                        Rect::new(0, HUD_HEIGHT as i32, PLAYFIELD_SIZE.x, PLAYFIELD_SIZE.y),
                    )
                    .map_err(crate::error::GameError::Sdl)?;
                for glitch in &self.glitches {
                    glitch.draw(canvas)?;
                }
                hud::draw_playing(canvas, &self.texture_creator, self.font.as_ref(), &self.state)?;
                self.draw_flash(canvas)?;
            }
            GameStage::GameOver => {
                hud::draw_game_over(
                    canvas,
                    &self.texture_creator,
                    self.font.as_ref(),
                    &self.state,
                    self.leaderboard.board(),
                    self.leaderboard.is_offline(),
                )?;
                self.draw_flash(canvas)?;
            }
        }

        canvas.present();
        Ok(())
    }

    /// White flash on a hit, red on a miss, fading out over a few frames.
    fn draw_flash(&self, canvas: &mut Canvas<Window>) -> GameResult<()> {
        let Some((kind, _)) = self.state.flash else {
            return Ok(());
        };
        let color = match kind {
            Flash::Hit => Color::RGBA(255, 255, 255, 90),
            Flash::Miss => Color::RGBA(255, 0, 0, 90),
        };
        canvas.set_blend_mode(BlendMode::Blend);
        canvas.set_draw_color(color);
        canvas
            .fill_rect(Rect::new(
                0,
                HUD_HEIGHT as i32,
                PLAYFIELD_SIZE.x,
                PLAYFIELD_SIZE.y,
            ))
            .map_err(crate::error::GameError::Sdl)?;
        Ok(())
    }
}
