//! In-process editor buffer.
//!
//! Text rendering, highlighting, and input handling belong to the host's
//! editor widget; this buffer carries the text and cursor state the shell
//! needs for saving, status display, and fit-to-content measurement.

use crate::layout::DocumentBuffer;

/// Nominal monospace advance per character cell, in abstract width units.
/// The shell has no font metrics; the host maps units to pixels.
const CELL_WIDTH: u32 = 9;

/// Left/right padding of the line-number gutter.
const GUTTER_PADDING: u32 = 6;

const TAB_STOP: u32 = 4;

/// Plain text buffer with a cursor position.
#[derive(Debug, Default)]
pub struct EditorBuffer {
    text: String,
    line: u32,
    column: u32,
}

impl EditorBuffer {
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::default();
        buffer.set_text(text);
        buffer
    }

    pub fn set_cursor(&mut self, line: u32, column: u32) {
        self.line = line.max(1);
        self.column = column.max(1);
    }

    fn line_count(&self) -> u32 {
        self.text.lines().count().max(1) as u32
    }
}

fn expanded_width(line: &str) -> u32 {
    let mut width = 0;
    for ch in line.chars() {
        if ch == '\t' {
            width = (width / TAB_STOP + 1) * TAB_STOP;
        } else {
            width += 1;
        }
    }
    width
}

impl DocumentBuffer for EditorBuffer {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
        self.line = 1;
        self.column = 1;
    }

    fn cursor(&self) -> (u32, u32) {
        (self.line.max(1), self.column.max(1))
    }

    fn max_line_width(&self) -> u32 {
        self.text
            .lines()
            .map(expanded_width)
            .max()
            .unwrap_or(0)
            * CELL_WIDTH
    }

    fn gutter_width(&self) -> u32 {
        let digits = self.line_count().to_string().len() as u32;
        GUTTER_PADDING + CELL_WIDTH * digits
    }
}
