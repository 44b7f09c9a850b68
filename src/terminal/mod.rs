/// Terminal front end: screen control and keyboard input
pub mod input;

pub use input::{intent_for_key, InputState, CONTROLS};

use crate::rendering::CharBuffer;
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};

/// Raw-mode alternate screen; restored when dropped
pub struct Screen {
    out: Stdout,
    highlight: char,
}

impl Screen {
    pub fn new(highlight: char) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        log::debug!("[Screen] Entered raw mode");
        Ok(Self { out, highlight })
    }

    /// Draw from the top-left corner, cropped to the terminal size.
    /// Runs of the highlight glyph are drawn in green.
    pub fn draw(&mut self, buffer: &CharBuffer) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let visible_cols = buffer.width.min(cols as usize);

        for (y, row) in buffer.rows().take(rows as usize).enumerate() {
            queue!(self.out, cursor::MoveTo(0, y as u16))?;
            for (highlighted, run) in runs(&row[..visible_cols], self.highlight) {
                if highlighted {
                    queue!(
                        self.out,
                        SetForegroundColor(Color::Green),
                        Print(run),
                        ResetColor
                    )?;
                } else {
                    queue!(self.out, Print(run))?;
                }
            }
        }
        self.out.flush()
    }
}

/// Split a row into (is_highlight, text) runs
fn runs(row: &[char], highlight: char) -> Vec<(bool, String)> {
    let mut out: Vec<(bool, String)> = Vec::new();
    for &glyph in row {
        let highlighted = glyph == highlight;
        if let Some((flag, text)) = out.last_mut() {
            if *flag == highlighted {
                text.push(glyph);
                continue;
            }
        }
        out.push((highlighted, glyph.to_string()));
    }
    out
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        log::debug!("[Screen] Terminal restored");
    }
}
