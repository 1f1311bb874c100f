//! Frame presentation
//!
//! The engine produces a finished frame and a status readout; a
//! `FrameSink` prints them. This module is READ-ONLY - it never modifies
//! simulation state.

use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use crate::core::error::Result;
use crate::entity::Stats;

/// Advisory status shown above the frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReadout {
    pub player_name: String,
    pub player_stats: Stats,
    /// Name and health of the last enemy the player damaged, while it lives
    pub last_enemy: Option<(String, i32)>,
    /// Free-form line written by AI and combat code
    pub debug: String,
}

impl StatusReadout {
    pub fn lines(&self) -> Vec<String> {
        let stats = &self.player_stats;
        let mut lines = vec![
            String::new(),
            format!("{}'s  Status", self.player_name),
            format!("    Health  : {}", stats.health),
            format!("    Attack  : {}", stats.attack),
            format!("    Defense : {}", stats.defense),
        ];
        if let Some((name, health)) = &self.last_enemy {
            lines.push(format!("    Last hit: {name} ({health} health)"));
        }
        if !self.debug.is_empty() {
            lines.push(format!("    {}", self.debug));
        }
        lines
    }
}

/// Receiver of finished frames
pub trait FrameSink {
    fn present<I>(&mut self, status: &StatusReadout, rows: I) -> Result<()>
    where
        I: Iterator<Item = String>;
}

/// Prints frames to a terminal, clearing the screen first
pub struct TerminalSink<W: Write> {
    out: W,
    clear_screen: bool,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            clear_screen: true,
        }
    }

    /// Skip the clear-and-home sequence (plain logs, pipes)
    pub fn without_clear(out: W) -> Self {
        Self {
            out,
            clear_screen: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for TerminalSink<W> {
    fn present<I>(&mut self, status: &StatusReadout, rows: I) -> Result<()>
    where
        I: Iterator<Item = String>,
    {
        if self.clear_screen {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        for line in status.lines() {
            writeln!(self.out, "{line}")?;
        }
        for row in rows {
            writeln!(self.out, "{row}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}
