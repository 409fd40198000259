// TermRaster
// copyright zipxing@hotmail.com 2022～2025

use crate::{error::Result, render::adapter::Adapter};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::DisableMouseCapture,
    queue,
    style::{Print, ResetColor},
    terminal::{
        BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, Stdout, Write};

/// Crossterm backed adapter writing to any `Write`, stdout by default.
pub struct CrosstermAdapter<W: Write = Stdout> {
    writer: W,
    active: bool,
}

impl CrosstermAdapter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CrosstermAdapter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Adapter for CrosstermAdapter<W> {
    fn init(&mut self) -> Result<()> {
        queue!(self.writer, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        self.writer.flush()?;
        self.active = true;
        Ok(())
    }

    fn present(&mut self, frame: &str) -> Result<()> {
        queue!(
            self.writer,
            BeginSynchronizedUpdate,
            MoveTo(0, 0),
            Print(frame),
            EndSynchronizedUpdate
        )?;
        self.writer.flush()?;
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        queue!(
            self.writer,
            DisableMouseCapture,
            Show,
            ResetColor,
            LeaveAlternateScreen
        )?;
        self.writer.flush()?;
        self.active = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_wraps_frame_in_sync_bracket() {
        let mut a = CrosstermAdapter::new(Vec::new());
        a.present("ab\n").unwrap();
        let out = String::from_utf8(a.into_inner()).unwrap();
        assert_eq!(out, "\x1b[?2026h\x1b[1;1Hab\n\x1b[?2026l");
    }

    #[test]
    fn init_and_reset_toggle_screen_and_cursor() {
        let mut a = CrosstermAdapter::new(Vec::new());
        a.init().unwrap();
        assert!(a.is_active());
        let out = String::from_utf8(a.writer().clone()).unwrap();
        assert!(out.starts_with("\x1b[?1049h"));
        assert!(out.contains("\x1b[?25l"));

        a.reset().unwrap();
        assert!(!a.is_active());
        let out = String::from_utf8(a.into_inner()).unwrap();
        assert!(out.contains("\x1b[?1000l"));
        assert!(out.contains("\x1b[?25h"));
        assert!(out.contains("\x1b[0m"));
        assert!(out.ends_with("\x1b[?1049l"));
    }
}
