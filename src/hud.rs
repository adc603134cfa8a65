//! HUD math and rendering: timer bar, sector label, run clock, and the
//! menu / game-over screens.
//!
//! The layout math is pure and unit-tested; the drawing functions take an
//! optional font so a missing font asset degrades to a shape-only HUD.

use glam::IVec2;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::ttf::Font;
use sdl2::video::{Window, WindowContext};

use crate::constants::{CANVAS_SIZE, HUD_HEIGHT, LEADERBOARD_LIMIT, TAG_LENGTH};
use crate::error::{GameResult, TextureError};
use crate::game::state::GameState;
use crate::leaderboard::{format_time, ScoreRow};

/// Fraction of the relocation window remaining, clamped to 0..=1.
pub fn timer_fraction(since_move: f32, delay: f32) -> f32 {
    if delay <= 0.0 {
        return 0.0;
    }
    (1.0 - since_move / delay).clamp(0.0, 1.0)
}

/// Urgency color for the timer bar: green while safe, yellow under half,
/// red under a quarter.
pub fn timer_color(fraction: f32) -> Color {
    if fraction < 0.25 {
        Color::RGB(255, 0, 0)
    } else if fraction < 0.5 {
        Color::RGB(255, 255, 0)
    } else {
        Color::RGB(0, 255, 0)
    }
}

/// HUD label for a zero-based sector index, e.g. `SECTOR 03`.
pub fn sector_label(level: usize) -> String {
    format!("SECTOR {:02}", level + 1)
}

/// Run clock text, two decimals.
pub fn format_clock(seconds: f32) -> String {
    format!("{seconds:.2}")
}

/// Tag entry display with underscores for the characters still missing.
pub fn tag_display(input: &str) -> String {
    let mut shown = String::with_capacity(TAG_LENGTH);
    shown.push_str(input);
    while shown.len() < TAG_LENGTH {
        shown.push('_');
    }
    shown
}

fn draw_text(
    canvas: &mut Canvas<Window>,
    creator: &TextureCreator<WindowContext>,
    font: &Font,
    text: &str,
    position: IVec2,
    color: Color,
    centered: bool,
) -> GameResult<()> {
    let surface = font
        .render(text)
        .blended(color)
        .map_err(|e| TextureError::RenderFailed(e.to_string()))?;
    let (w, h) = (surface.width(), surface.height());
    let texture = creator
        .create_texture_from_surface(&surface)
        .map_err(|e| TextureError::RenderFailed(e.to_string()))?;

    let x = if centered {
        position.x - (w / 2) as i32
    } else {
        position.x
    };
    canvas
        .copy(&texture, None, Rect::new(x, position.y, w, h))
        .map_err(|e| TextureError::RenderFailed(e.to_string()))?;
    Ok(())
}

/// Renders the title screen.
pub fn draw_menu(
    canvas: &mut Canvas<Window>,
    creator: &TextureCreator<WindowContext>,
    font: Option<&Font>,
) -> GameResult<()> {
    let Some(font) = font else { return Ok(()) };
    let center_x = (CANVAS_SIZE.x / 2) as i32;

    draw_text(
        canvas,
        creator,
        font,
        "DETROIT: ANOMALY",
        IVec2::new(center_x, 260),
        Color::RGB(0, 255, 170),
        true,
    )?;
    draw_text(
        canvas,
        creator,
        font,
        "A VISUAL FAULT IS HIDING IN EACH SECTOR FEED",
        IVec2::new(center_x, 330),
        Color::RGB(200, 200, 200),
        true,
    )?;
    draw_text(
        canvas,
        creator,
        font,
        "CLICK IT BEFORE IT RELOCATES",
        IVec2::new(center_x, 360),
        Color::RGB(200, 200, 200),
        true,
    )?;
    draw_text(
        canvas,
        creator,
        font,
        "CLICK OR PRESS ENTER TO INITIATE",
        IVec2::new(center_x, 440),
        Color::RGB(255, 255, 255),
        true,
    )?;
    Ok(())
}

/// Renders the in-run HUD strip: timer bar, sector label, clock, combo.
pub fn draw_playing(
    canvas: &mut Canvas<Window>,
    creator: &TextureCreator<WindowContext>,
    font: Option<&Font>,
    state: &GameState,
) -> GameResult<()> {
    // Timer bar across the HUD strip.
    let fraction = state.timer_fraction();
    let margin = 16u32;
    let full_width = CANVAS_SIZE.x - margin * 2;
    let bar_width = (full_width as f32 * fraction).round() as u32;

    canvas.set_draw_color(Color::RGB(40, 40, 40));
    canvas
        .fill_rect(Rect::new(margin as i32, 36, full_width, 12))
        .map_err(|e| TextureError::RenderFailed(e.to_string()))?;

    if bar_width > 0 {
        canvas.set_draw_color(timer_color(fraction));
        canvas
            .fill_rect(Rect::new(margin as i32, 36, bar_width, 12))
            .map_err(|e| TextureError::RenderFailed(e.to_string()))?;
    }

    let Some(font) = font else { return Ok(()) };

    draw_text(
        canvas,
        creator,
        font,
        &sector_label(state.level),
        IVec2::new(margin as i32, 6),
        Color::RGB(0, 255, 170),
        false,
    )?;
    draw_text(
        canvas,
        creator,
        font,
        &format_clock(state.run_time),
        IVec2::new((CANVAS_SIZE.x - margin - 110) as i32, 6),
        Color::RGB(255, 255, 255),
        false,
    )?;
    if state.combo > 1 {
        draw_text(
            canvas,
            creator,
            font,
            &format!("COMBO x{}", state.combo),
            IVec2::new((CANVAS_SIZE.x / 2) as i32, 6),
            Color::RGB(255, 255, 0),
            true,
        )?;
    }
    Ok(())
}

/// Renders the game-over screen: final time, tag entry, and the board.
pub fn draw_game_over(
    canvas: &mut Canvas<Window>,
    creator: &TextureCreator<WindowContext>,
    font: Option<&Font>,
    state: &GameState,
    board: &[ScoreRow],
    offline: bool,
) -> GameResult<()> {
    let Some(font) = font else { return Ok(()) };
    let center_x = (CANVAS_SIZE.x / 2) as i32;

    draw_text(
        canvas,
        creator,
        font,
        "ALL SECTORS PURGED",
        IVec2::new(center_x, 110),
        Color::RGB(0, 255, 170),
        true,
    )?;

    if let Some(time) = state.final_time {
        draw_text(
            canvas,
            creator,
            font,
            &format!("TIME {}", format_time(time)),
            IVec2::new(center_x, 150),
            Color::RGB(255, 255, 255),
            true,
        )?;
    }
    draw_text(
        canvas,
        creator,
        font,
        &format!(
            "MISSES {}   BEST COMBO x{}",
            state.misses, state.best_combo
        ),
        IVec2::new(center_x, 180),
        Color::RGB(200, 200, 200),
        true,
    )?;

    let tag_line = if state.score_submitted {
        format!("TAG {}  UPLOADED", state.tag_input)
    } else {
        format!("TAG {}  (TYPE 3 CHARS, ENTER TO UPLOAD)", tag_display(&state.tag_input))
    };
    draw_text(
        canvas,
        creator,
        font,
        &tag_line,
        IVec2::new(center_x, 230),
        Color::RGB(255, 255, 0),
        true,
    )?;

    let board_title = if offline { "LEADERBOARD [OFFLINE]" } else { "LEADERBOARD" };
    draw_text(
        canvas,
        creator,
        font,
        board_title,
        IVec2::new(center_x, 290),
        Color::RGB(0, 255, 170),
        true,
    )?;

    for (rank, row) in board.iter().take(LEADERBOARD_LIMIT).enumerate() {
        let line = format!("{:>2}. {:<3}  {}", rank + 1, row.tag, format_time(row.time));
        draw_text(
            canvas,
            creator,
            font,
            &line,
            IVec2::new(center_x, 320 + (rank as i32) * 28),
            Color::RGB(220, 220, 220),
            true,
        )?;
    }
    if board.is_empty() {
        draw_text(
            canvas,
            creator,
            font,
            "NO SCORES YET",
            IVec2::new(center_x, 320),
            Color::RGB(120, 120, 120),
            true,
        )?;
    }

    draw_text(
        canvas,
        creator,
        font,
        "SPACE: NEW RUN   ESC: QUIT",
        IVec2::new(center_x, (CANVAS_SIZE.y - HUD_HEIGHT) as i32),
        Color::RGB(160, 160, 160),
        true,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fraction_clamps() {
        assert_eq!(timer_fraction(0.0, 4.0), 1.0);
        assert_eq!(timer_fraction(2.0, 4.0), 0.5);
        assert_eq!(timer_fraction(8.0, 4.0), 0.0);
        assert_eq!(timer_fraction(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_timer_color_thresholds() {
        assert_eq!(timer_color(1.0), Color::RGB(0, 255, 0));
        assert_eq!(timer_color(0.5), Color::RGB(0, 255, 0));
        assert_eq!(timer_color(0.49), Color::RGB(255, 255, 0));
        assert_eq!(timer_color(0.25), Color::RGB(255, 255, 0));
        assert_eq!(timer_color(0.24), Color::RGB(255, 0, 0));
    }

    #[test]
    fn test_sector_label_is_one_indexed_and_padded() {
        assert_eq!(sector_label(0), "SECTOR 01");
        assert_eq!(sector_label(8), "SECTOR 09");
    }

    #[test]
    fn test_tag_display_pads_with_underscores() {
        assert_eq!(tag_display(""), "___");
        assert_eq!(tag_display("A"), "A__");
        assert_eq!(tag_display("ABC"), "ABC");
    }
}
