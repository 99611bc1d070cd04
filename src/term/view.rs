//! Maps a `GameSnapshot` into styled glyph rows.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crossterm::style::Color;

use crate::core::GameSnapshot;
use crate::highscore::Highscore;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// One styled terminal character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Color,
    pub bold: bool,
}

impl Glyph {
    fn plain(ch: char) -> Self {
        Self {
            ch,
            color: Color::Grey,
            bold: false,
        }
    }
}

/// A composed frame: rows of glyphs, top to bottom
pub type Frame = Vec<Vec<Glyph>>;

/// Board cell width in terminal columns (compensates glyph aspect ratio)
const CELL_W: usize = 2;

fn cell_color(value: u8) -> Color {
    match value {
        1 => Color::Cyan,    // I
        2 => Color::Yellow,  // O
        3 => Color::Magenta, // T
        4 => Color::Green,   // S
        5 => Color::Red,     // Z
        6 => Color::Blue,    // J
        7 => Color::Rgb {
            r: 255,
            g: 165,
            b: 0,
        }, // L
        _ => Color::DarkGrey,
    }
}

/// Compose the full frame: framed board, sidebar, status banner
pub fn compose(snapshot: &GameSnapshot, best: &Highscore) -> Frame {
    let board_w = BOARD_WIDTH * CELL_W;
    let mut rows = Vec::with_capacity(BOARD_HEIGHT + 2);

    rows.push(border_row('┌', '─', '┐', board_w));
    for y in 0..BOARD_HEIGHT {
        let mut row = Vec::with_capacity(board_w + 2);
        row.push(Glyph::plain('│'));
        for x in 0..BOARD_WIDTH {
            let value = snapshot.board[y][x];
            let (ch, bold) = if value == 0 { ('·', false) } else { ('█', true) };
            for _ in 0..CELL_W {
                row.push(Glyph {
                    ch,
                    color: cell_color(value),
                    bold,
                });
            }
        }
        row.push(Glyph::plain('│'));
        push_sidebar(&mut row, y, snapshot, best);
        rows.push(row);
    }
    rows.push(border_row('└', '─', '┘', board_w));

    if let Some(text) = banner(snapshot) {
        overlay_banner(&mut rows, text, board_w);
    }

    rows
}

fn border_row(left: char, fill: char, right: char, inner: usize) -> Vec<Glyph> {
    let mut row = Vec::with_capacity(inner + 2);
    row.push(Glyph::plain(left));
    for _ in 0..inner {
        row.push(Glyph::plain(fill));
    }
    row.push(Glyph::plain(right));
    row
}

fn push_sidebar(row: &mut Vec<Glyph>, y: usize, snapshot: &GameSnapshot, best: &Highscore) {
    let text = match y {
        1 => format!("  PLAYER {}", snapshot.player_name),
        3 => format!("  SCORE  {}", snapshot.score),
        4 => format!("  LEVEL  {}", snapshot.level),
        5 => format!("  LINES  {}", snapshot.lines),
        7 => format!("  BEST   {} {}", best.score, best.name),
        10 => "  arrows move, up rotates".to_string(),
        11 => "  space drops, p pauses".to_string(),
        12 => "  enter starts, q quits".to_string(),
        _ => return,
    };
    let bold = matches!(y, 1 | 3 | 4 | 5 | 7);
    for ch in text.chars() {
        row.push(Glyph {
            ch,
            color: if bold { Color::White } else { Color::DarkGrey },
            bold,
        });
    }
}

fn banner(snapshot: &GameSnapshot) -> Option<&'static str> {
    if snapshot.game_over {
        Some(" GAME OVER ")
    } else if snapshot.paused {
        Some(" PAUSED ")
    } else if !snapshot.running {
        Some(" PRESS ENTER ")
    } else {
        None
    }
}

fn overlay_banner(rows: &mut Frame, text: &str, board_w: usize) {
    let y = 1 + BOARD_HEIGHT / 2;
    let x = 1 + (board_w.saturating_sub(text.chars().count())) / 2;
    if let Some(row) = rows.get_mut(y) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(glyph) = row.get_mut(x + i) {
                *glyph = Glyph {
                    ch,
                    color: Color::White,
                    bold: true,
                };
            }
        }
    }
}
