//! Half-block terminal presenter.
//!
//! Each terminal cell shows two pixel rows: `▀` with the top pixel as
//! foreground and the bottom pixel as background.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use wavefill_core::{Pixmap, Rgba8};

const UPPER_HALF: char = '▀';

fn term_color(px: Rgba8) -> TermColor {
    TermColor::Rgb {
        r: px.r,
        g: px.g,
        b: px.b,
    }
}

/// Writes frames to a terminal-like sink.
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    /// Wraps `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Clears the screen and hides the cursor.
    pub fn begin(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), cursor::Hide)?;
        self.out.flush()
    }

    /// Draws `pixmap` from the top-left corner. Pixels are written as opaque.
    pub fn present(&mut self, pixmap: &Pixmap) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(0, 0))?;
        for top in (0..pixmap.height()).step_by(2) {
            let mut last: Option<(Rgba8, Rgba8)> = None;
            for x in 0..pixmap.width() {
                let upper = pixmap.pixel(x, top);
                let lower = if top + 1 < pixmap.height() {
                    pixmap.pixel(x, top + 1)
                } else {
                    upper
                };
                if last != Some((upper, lower)) {
                    queue!(
                        self.out,
                        SetForegroundColor(term_color(upper)),
                        SetBackgroundColor(term_color(lower))
                    )?;
                    last = Some((upper, lower));
                }
                queue!(self.out, Print(UPPER_HALF))?;
            }
            queue!(self.out, ResetColor, Print("\r\n"))?;
        }
        self.out.flush()
    }

    /// Restores colours and the cursor.
    pub fn finish(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, cursor::Show)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavefill_core::Color;

    #[test]
    fn test_two_rows_per_line() {
        let mut pixmap = Pixmap::new(3, 5);
        pixmap.fill(Color::rgb(1.0, 0.0, 0.0));

        let mut sink = Vec::new();
        TerminalPresenter::new(&mut sink).present(&pixmap).unwrap();
        let text = String::from_utf8(sink).unwrap();

        assert_eq!(text.matches(UPPER_HALF).count(), 9);
        assert_eq!(text.matches("\r\n").count(), 3);
        // One colour change per line for a flat image.
        assert_eq!(text.matches("38;2;255;0;0").count(), 3);
    }
}
