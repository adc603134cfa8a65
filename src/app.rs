//! SDL shell: window, event decoding, and the fixed-rate loop.

use std::time::{Duration, Instant};

use glam::IVec2;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::render::Canvas;
use sdl2::ttf::Sdl2TtfContext;
use sdl2::video::Window;
use sdl2::{AudioSubsystem, EventPump, Sdl};
use tracing::{error, event};

use crate::constants::{CANVAS_SIZE, HUD_HEIGHT, LOOP_TIME, SCALE};
use crate::error::{GameError, GameResult};
use crate::events::GameCommand;
use crate::game::stage::GameStage;
use crate::game::Game;

pub struct App {
    game: Game,
    canvas: Canvas<Window>,
    event_pump: EventPump,
    last_tick: Instant,
    // Dropping these tears the subsystems down mid-game.
    _sdl_context: Sdl,
    _audio_subsystem: AudioSubsystem,
}

impl App {
    pub fn new() -> GameResult<Self> {
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let audio_subsystem = sdl_context.audio().map_err(GameError::Sdl)?;
        let ttf_context: &'static Sdl2TtfContext = Box::leak(Box::new(
            sdl2::ttf::init().map_err(|e| GameError::Sdl(e.to_string()))?,
        ));

        let window = video_subsystem
            .window(
                "DETROIT: ANOMALY",
                (CANVAS_SIZE.x as f32 * SCALE).round() as u32,
                (CANVAS_SIZE.y as f32 * SCALE).round() as u32,
            )
            .resizable()
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let mut canvas = window
            .into_canvas()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        // Logical coordinates keep clicks valid when the window is resized.
        canvas
            .set_logical_size(CANVAS_SIZE.x, CANVAS_SIZE.y)
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        // Tag entry on the game-over screen uses SDL text input events.
        video_subsystem.text_input().start();

        let game = Game::new(canvas.texture_creator(), ttf_context)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

        Ok(Self {
            game,
            canvas,
            event_pump,
            last_tick: Instant::now(),
            _sdl_context: sdl_context,
            _audio_subsystem: audio_subsystem,
        })
    }

    /// Runs one frame. Returns `false` when the application should exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        let mut commands: Vec<GameCommand> = Vec::new();
        let stage = self.game.state.stage;

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape) | Some(Keycode::Q),
                    ..
                } => {
                    event!(tracing::Level::INFO, "Exit requested. Exiting...");
                    commands.push(GameCommand::Exit);
                }
                Event::KeyDown {
                    keycode: Some(Keycode::P),
                    ..
                } => commands.push(GameCommand::TogglePause),
                Event::KeyDown {
                    keycode: Some(Keycode::M),
                    ..
                } => commands.push(GameCommand::ToggleMute),
                Event::KeyDown {
                    keycode: Some(Keycode::Backspace),
                    ..
                } => commands.push(GameCommand::TagBackspace),
                Event::KeyDown {
                    keycode: Some(Keycode::Return),
                    ..
                } => match stage {
                    GameStage::Menu => commands.push(GameCommand::StartRun),
                    GameStage::GameOver => commands.push(GameCommand::SubmitScore),
                    GameStage::Playing => {}
                },
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    ..
                } => {
                    if stage != GameStage::Playing {
                        commands.push(GameCommand::StartRun);
                    }
                }
                Event::TextInput { text, .. } => {
                    if stage == GameStage::GameOver {
                        commands.extend(text.chars().map(GameCommand::TagChar));
                    }
                }
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => match stage {
                    GameStage::Menu => commands.push(GameCommand::StartRun),
                    GameStage::Playing => {
                        // Clicks on the HUD strip are not part of the playfield.
                        if y >= HUD_HEIGHT as i32 {
                            commands.push(GameCommand::Click(IVec2::new(x, y - HUD_HEIGHT as i32)));
                        }
                    }
                    GameStage::GameOver => {}
                },
                _ => {}
            }
        }

        for command in commands {
            self.game.handle_command(command);
        }

        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = Instant::now();

        if self.game.tick(dt) {
            return false;
        }
        if let Err(e) = self.game.draw(&mut self.canvas) {
            error!("Failed to draw game: {e}");
        }

        if start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                spin_sleep::sleep(time);
            }
        } else {
            event!(
                tracing::Level::WARN,
                "Game loop behind schedule by: {:?}",
                start.elapsed() - LOOP_TIME
            );
        }

        true
    }
}
