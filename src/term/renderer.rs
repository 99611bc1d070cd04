//! TerminalRenderer: flushes composed glyph rows to a real terminal.
//!
//! Full redraw per frame. The frame is small (22 rows) and redraws happen
//! at input/tick cadence, so diffing is not worth the bookkeeping here.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::term::view::Frame;

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
        self.stdout
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?
            .flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?
            .flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;

        let mut current: Option<(Color, bool)> = None;
        for (y, row) in frame.iter().enumerate() {
            self.stdout.queue(cursor::MoveTo(0, y as u16))?;
            for glyph in row {
                let style = (glyph.color, glyph.bold);
                if current != Some(style) {
                    self.stdout.queue(SetAttribute(Attribute::Reset))?;
                    self.stdout.queue(SetForegroundColor(glyph.color))?;
                    if glyph.bold {
                        self.stdout.queue(SetAttribute(Attribute::Bold))?;
                    }
                    current = Some(style);
                }
                self.stdout.queue(Print(glyph.ch))?;
            }
        }

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
