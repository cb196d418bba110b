//! Terminal player: the interactive sink.
//!
//! Draws each frame as a block of shaded characters with the population as
//! `o` markers, redrawing in place and pausing a fixed interval between
//! frames.

use std::io::{self, IsTerminal, Stdout, Write};
use std::thread;
use std::time::Duration;

use super::{FrameSink, RenderedFrame, SinkError};
use crate::schema::RenderConfig;

/// Characters from darkest to brightest.
const SHADES: &[u8] = b" .:-=+*#%@";

const CURSOR_HOME: &str = "\x1b[H";
const CLEAR_SCREEN: &str = "\x1b[2J";

/// Plays frames back as text.
pub struct TerminalPlayer<W: Write> {
    out: W,
    columns: usize,
    rows: usize,
    interval: Duration,
    frames_shown: u64,
    /// Reused line buffer.
    buffer: Vec<u8>,
}

impl TerminalPlayer<Stdout> {
    /// Player on standard output, or `None` when stdout is not a terminal.
    pub fn stdout(config: &RenderConfig) -> Option<Self> {
        let stdout = io::stdout();
        if !stdout.is_terminal() {
            return None;
        }
        let mut player = Self::new(stdout, 64, 32, Duration::from_millis(config.interval_ms));
        player.clear_first();
        Some(player)
    }
}

impl<W: Write> TerminalPlayer<W> {
    pub fn new(out: W, columns: usize, rows: usize, interval: Duration) -> Self {
        Self {
            out,
            columns: columns.max(1),
            rows: rows.max(1),
            interval,
            frames_shown: 0,
            buffer: Vec::new(),
        }
    }

    fn clear_first(&mut self) {
        self.buffer.extend_from_slice(CLEAR_SCREEN.as_bytes());
    }

    fn draw(&mut self, frame: &RenderedFrame) {
        let (width, height) = frame.image.dimensions();
        let cell_w = width as f64 / self.columns as f64;
        let cell_h = height as f64 / self.rows as f64;

        let mut grid = vec![b' '; self.columns * self.rows];
        for (r, row) in grid.chunks_mut(self.columns).enumerate() {
            let py = (((r as f64 + 0.5) * cell_h) as u32).min(height.saturating_sub(1));
            for (c, cell) in row.iter_mut().enumerate() {
                let px = (((c as f64 + 0.5) * cell_w) as u32).min(width.saturating_sub(1));
                let [red, green, blue] = frame.image.get_pixel(px, py).0;
                let luma =
                    (0.299 * red as f64 + 0.587 * green as f64 + 0.114 * blue as f64) / 255.0;
                let shade = ((luma * (SHADES.len() - 1) as f64).round() as usize)
                    .min(SHADES.len() - 1);
                *cell = SHADES[shade];
            }
        }

        for &(px, py) in &frame.pixels {
            if px < 0.0 || py < 0.0 || px >= width as f64 || py >= height as f64 {
                continue;
            }
            let c = ((px / cell_w) as usize).min(self.columns - 1);
            let r = ((py / cell_h) as usize).min(self.rows - 1);
            grid[r * self.columns + c] = b'o';
        }

        self.buffer.extend_from_slice(CURSOR_HOME.as_bytes());
        for row in grid.chunks(self.columns) {
            self.buffer.extend_from_slice(row);
            self.buffer.push(b'\n');
        }
        self.buffer.extend_from_slice(
            format!("frame {:>4}  individuals {:>4}\n", frame.index, frame.points.len()).as_bytes(),
        );
    }
}

impl<W: Write> FrameSink for TerminalPlayer<W> {
    /// Number of frames shown.
    type Summary = u64;

    fn accept(&mut self, frame: &RenderedFrame) -> Result<(), SinkError> {
        self.draw(frame);
        self.out.write_all(&self.buffer)?;
        self.out.flush()?;
        self.buffer.clear();
        self.frames_shown += 1;

        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
        Ok(())
    }

    fn finalize(mut self) -> Result<u64, SinkError> {
        self.out.flush()?;
        Ok(self.frames_shown)
    }
}
