use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style};

/// Terminal coordinates: (column, row), as crossterm expects them.
pub type ScreenPos = (u16, u16);

/// Owns the terminal: alternate screen, raw mode, positioned printing and
/// the message-box overlay. Keeps a shadow buffer of what is on screen so a
/// message box can restore the cells it covered.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<MessageArea>,
}

struct MessageArea {
    top_left: ScreenPos,
    width: u16,
    height: u16,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("could not read the terminal size")?;
        let screen = vec![' '; width as usize * height as usize];

        Ok(TermManager { width, height, stdout: stdout(), screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide)
            .context("could not enter the alternate screen")?;
        terminal::enable_raw_mode().context("could not enable raw mode")
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("could not disable raw mode")?;
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen)
            .context("could not leave the alternate screen")
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read().context("could not read a terminal event")? {
                return Ok(ev);
            }
        }
    }

    /// All key events that are already queued up, without blocking.
    pub fn drain_key_events(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1)).context("could not poll for terminal events")? {
            if let Event::Key(ev) = read().context("could not read a terminal event")? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
            .context("could not clear the screen")?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn draw_box(&mut self, top_left: ScreenPos, width: u16, height: u16) -> Result<()> {
        let (x0, y0) = top_left;
        let (x1, y1) = (x0 + width - 1, y0 + height - 1);

        for x in x0..=x1 {
            let ch = if x == x0 || x == x1 { '+' } else { '-' };
            self.print_at((x, y0), ch)?;
            self.print_at((x, y1), ch)?;
        }

        for y in y0 + 1..y1 {
            self.print_at((x0, y), '|')?;
            self.print_at((x1, y), '|')?;
        }

        Ok(())
    }

    pub fn print_at(&mut self, pos: ScreenPos, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
            .context("could not queue terminal output")?;
        self.screen[self.width as usize * pos.1 as usize + pos.0 as usize] = ch;
        Ok(())
    }

    /// Prints a line of text, clipped at the right edge of the viewport.
    pub fn print_text(&mut self, pos: ScreenPos, text: &str) -> Result<()> {
        let available = self.width.saturating_sub(pos.0) as usize;

        for (i, ch) in text.chars().take(available).enumerate() {
            self.print_at((pos.0 + i as u16, pos.1), ch)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("could not flush the terminal")
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Draws a centered, padded message box over whatever is on screen.
    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.current_msg.is_some() {
            self.hide_message()?;
        }

        // Clamped to the viewport so the box (and the buffer restore when it
        // is hidden again) can never index past the screen edges
        let msg_height = ((lines.len() + 2) as u16).min(self.height);
        let msg_width = ((lines.iter().map(|line| line.len()).max().unwrap_or(0) + 2) as u16)
            .min(self.width);
        let top_left = (
            (self.width / 2).saturating_sub(msg_width / 2),
            (self.height / 2).saturating_sub(msg_height / 2),
        );

        // Top and bottom padding rows
        for &y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_overlay((top_left.0 + x_diff, y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate().take(msg_height.saturating_sub(2) as usize) {
            let padded = format!("{: ^width$}", line, width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            for (x_diff, ch) in padded.chars().take(msg_width as usize).enumerate() {
                self.print_overlay((top_left.0 + x_diff as u16, y), ch)?;
            }
        }

        self.current_msg = Some(MessageArea { top_left, width: msg_width, height: msg_height });
        self.flush()
    }

    /// Removes the current message box, restoring the covered cells from
    /// the shadow buffer.
    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let (x, y) = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                let ch = self.screen[self.width as usize * y as usize + x as usize];
                self.print_overlay((x, y), ch)?;
            }
        }

        self.flush()
    }

    // Prints without touching the shadow buffer, so hiding the message can
    // put back what was underneath.
    fn print_overlay(&mut self, pos: ScreenPos, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
            .context("could not queue terminal output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(width: u16, height: u16) -> TermManager {
        TermManager {
            width,
            height,
            stdout: stdout(),
            screen: vec![' '; width as usize * height as usize],
            current_msg: None,
        }
    }

    #[test]
    fn text_wider_than_the_viewport_is_clipped() {
        // A 30-column terminal on its last row: the status line is padded
        // well past the right edge and must not run off the buffer
        let mut term = manager(30, 24);
        let line = format!("{:<56}", "Score: 0");

        term.print_text((1, 23), &line).unwrap();

        assert_eq!(term.screen[30 * 23 + 1], 'S');
        assert_eq!(term.screen[30 * 23 + 29], ' '); // padding, but in bounds
    }

    #[test]
    fn text_starting_past_the_right_edge_prints_nothing() {
        let mut term = manager(10, 5);

        term.print_text((10, 2), "overflow").unwrap();

        assert!(term.screen.iter().all(|&ch| ch == ' '));
    }

    #[test]
    fn an_oversized_message_box_is_clamped_to_the_viewport() {
        let mut term = manager(18, 6);

        term.show_message(&[
            "Game over!",
            "Press any key to play again,",
            "or Q to quit.",
        ])
        .unwrap();

        let msg = term.current_msg.as_ref().unwrap();
        assert!(msg.top_left.0 + msg.width <= 18);
        assert!(msg.top_left.1 + msg.height <= 6);

        // Hiding it restores from the shadow buffer without overflowing
        term.hide_message().unwrap();
        assert!(term.current_msg.is_none());
    }
}
