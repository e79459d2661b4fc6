//! Game view - draws the session and overlays onto the terminal.
//!
//! Board cells render two columns wide so they come out roughly square. The
//! side panel shows the zero-padded score tinted with the active piece color,
//! the next-piece preview in its own color, and the music meter. Overlay
//! alphas from the stage become color blends toward the backdrop.

use anyhow::Result;

use crate::core::{Phase, Session};
use crate::term::renderer::TerminalRenderer;
use crate::term::stage::TermStage;
use crate::types::{Rgb, MATRIX_SIZE};

const ORIGIN_X: u16 = 2;
const ORIGIN_Y: u16 = 1;
const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
const PANEL_TEXT: Rgb = Rgb::new(220, 220, 220);
const VOLUME_STEPS: usize = 8;

pub struct GameView;

impl GameView {
    pub fn render(
        renderer: &mut TerminalRenderer,
        session: &Session,
        stage: &TermStage,
    ) -> Result<()> {
        renderer.clear()?;

        // Dim the playfield while the game-over backdrop fades in.
        let dim = 1.0 - stage.backdrop_alpha * 0.7;

        Self::draw_board(renderer, session, dim)?;
        Self::draw_borders(renderer, session, dim)?;
        Self::draw_panel(renderer, session, stage)?;

        match session.phase() {
            Phase::Paused => Self::draw_paused(renderer, session)?,
            Phase::GameOver => Self::draw_game_over(renderer, session, stage)?,
            Phase::Playing => {}
        }

        renderer.flush()
    }

    fn draw_board(renderer: &mut TerminalRenderer, session: &Session, dim: f32) -> Result<()> {
        for (row, cells) in session.board().rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let x = ORIGIN_X + (col as u16) * 2;
                let y = ORIGIN_Y + row as u16;
                match cell {
                    Some(color) => {
                        renderer.put(x, y, "  ", BACKGROUND, color.scaled(dim), false)?
                    }
                    None => renderer.put(x, y, "  ", BACKGROUND, BACKGROUND, false)?,
                }
            }
        }
        Ok(())
    }

    /// Side borders tinted with the active piece color, washing toward white
    /// near the top the way the original tinted its border sprites.
    fn draw_borders(renderer: &mut TerminalRenderer, session: &Session, dim: f32) -> Result<()> {
        let width = session.board().width() as u16;
        let height = session.board().height();
        let color = session.active().color();
        let white = Rgb::new(255, 255, 255);

        for row in 0..height {
            let t = (row + 1) as f32 / height as f32;
            let tint = white.blend(color, t).scaled(dim);
            let y = ORIGIN_Y + row as u16;
            renderer.put(ORIGIN_X - 1, y, "\u{2502}", tint, BACKGROUND, false)?;
            renderer.put(ORIGIN_X + width * 2, y, "\u{2502}", tint, BACKGROUND, false)?;
        }
        Ok(())
    }

    fn draw_panel(
        renderer: &mut TerminalRenderer,
        session: &Session,
        stage: &TermStage,
    ) -> Result<()> {
        let panel_x = ORIGIN_X + session.board().width() as u16 * 2 + 4;
        let score_color = session.active().color();
        let next_color = session.next().color();

        renderer.put(panel_x, ORIGIN_Y, "score", score_color, BACKGROUND, false)?;
        renderer.put(
            panel_x,
            ORIGIN_Y + 1,
            &session.formatted_score(),
            score_color,
            BACKGROUND,
            true,
        )?;

        renderer.put(panel_x, ORIGIN_Y + 3, "next", next_color, BACKGROUND, false)?;
        let preview = session.next().matrix();
        for i in 0..MATRIX_SIZE {
            for j in 0..MATRIX_SIZE {
                let x = panel_x + (j as u16) * 2;
                let y = ORIGIN_Y + 4 + i as u16;
                let bg = if preview[i][j] { next_color } else { BACKGROUND };
                renderer.put(x, y, "  ", BACKGROUND, bg, false)?;
            }
        }

        renderer.put(
            panel_x,
            ORIGIN_Y + 9,
            session.mode().as_str(),
            PANEL_TEXT,
            BACKGROUND,
            false,
        )?;

        let meter = volume_meter(stage.music_volume);
        renderer.put(panel_x, ORIGIN_Y + 11, &meter, PANEL_TEXT, BACKGROUND, false)?;
        Ok(())
    }

    fn draw_paused(renderer: &mut TerminalRenderer, session: &Session) -> Result<()> {
        let (x, y) = board_center(session, "PAUSED".len() as u16);
        renderer.put(x, y, "PAUSED", PANEL_TEXT, BACKGROUND, true)
    }

    fn draw_game_over(
        renderer: &mut TerminalRenderer,
        session: &Session,
        stage: &TermStage,
    ) -> Result<()> {
        if stage.title_visible && stage.title_alpha > 0.0 {
            let color = BACKGROUND.blend(PANEL_TEXT, stage.title_alpha);
            // No glyph scaling in a terminal; near-full scale renders bold.
            let bold = stage.title_scale > 0.9;
            let (x, y) = board_center(session, stage.title_text.len() as u16);
            renderer.put(x, y, &stage.title_text, color, BACKGROUND, bold)?;
        }

        if stage.prompt_alpha > 0.0 {
            let color = BACKGROUND.blend(PANEL_TEXT, stage.prompt_alpha);
            let (x, y) = board_center(session, 11);
            renderer.put(x, y + 2, "r - restart", color, BACKGROUND, false)?;
            renderer.put(x, y + 3, "q - menu", color, BACKGROUND, false)?;
        }
        Ok(())
    }
}

fn board_center(session: &Session, text_width: u16) -> (u16, u16) {
    let board_cols = session.board().width() as u16 * 2;
    let x = ORIGIN_X + board_cols.saturating_sub(text_width) / 2;
    let y = ORIGIN_Y + session.board().height() as u16 / 2;
    (x, y)
}

fn volume_meter(volume: f32) -> String {
    let filled = (volume.clamp(0.0, 1.0) * VOLUME_STEPS as f32).round() as usize;
    let mut meter = String::from("vol ");
    for i in 0..VOLUME_STEPS {
        meter.push(if i < filled { '\u{25ae}' } else { '\u{25af}' });
    }
    meter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_meter_fills_proportionally() {
        assert_eq!(volume_meter(0.0), "vol \u{25af}\u{25af}\u{25af}\u{25af}\u{25af}\u{25af}\u{25af}\u{25af}");
        assert_eq!(volume_meter(1.0), "vol \u{25ae}\u{25ae}\u{25ae}\u{25ae}\u{25ae}\u{25ae}\u{25ae}\u{25ae}");
        assert_eq!(volume_meter(0.5), "vol \u{25ae}\u{25ae}\u{25ae}\u{25ae}\u{25af}\u{25af}\u{25af}\u{25af}");
    }
}
