//! Raw-mode terminal backend.
//!
//! Full redraw per frame through queued crossterm commands. A 12x20 board
//! repainted at 60Hz is far below the point where diffing would pay off, so
//! the drawing API stays minimal: position, text, colors, flush.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::types::Rgb;

pub struct TerminalRenderer {
    stdout: io::Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.queue(cursor::MoveTo(0, 0))?;
        Ok(())
    }

    /// Queue styled text at a terminal position.
    pub fn put(&mut self, x: u16, y: u16, text: &str, fg: Rgb, bg: Rgb, bold: bool) -> Result<()> {
        self.stdout.queue(cursor::MoveTo(x, y))?;
        self.stdout.queue(SetForegroundColor(to_color(fg)))?;
        self.stdout.queue(SetBackgroundColor(to_color(bg)))?;
        self.stdout.queue(SetAttribute(if bold {
            Attribute::Bold
        } else {
            Attribute::Reset
        }))?;
        self.stdout.queue(Print(text))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_conversion_is_lossless() {
        let rgb = Rgb::new(12, 200, 3);
        assert_eq!(
            to_color(rgb),
            Color::Rgb {
                r: 12,
                g: 200,
                b: 3
            }
        );
    }
}
