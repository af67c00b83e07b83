use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::config::BackgroundSettings;
use crate::theme;

/// Cells per trail, head included.
pub const TRAIL_LEN: usize = 20;

const GLYPHS: [char; 2] = ['0', '1'];
const RESTART_MIN_ROW: f32 = -50.0;
const MIN_SPEED: f32 = 0.5;
const MAX_SPEED: f32 = 1.5;
/// Rows a column keeps falling below the bottom edge before it restarts.
const OVERSHOOT_ROWS: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct RainColumn {
    /// Row of the trail head; negative while still above the top edge.
    pub y: f32,
    /// Rows advanced per tick.
    pub speed: f32,
    /// Brightness of the head in `0.1..0.6`.
    pub opacity: f32,
    /// One bit per trail cell: set = `'1'`.
    glyph_bits: u32,
}

impl RainColumn {
    pub fn glyph(&self, trail_index: usize) -> char {
        GLYPHS[((self.glyph_bits >> trail_index) & 1) as usize]
    }
}

pub struct MatrixRain {
    columns: Vec<RainColumn>,
    max_columns: usize,
    width: u16,
    height: u16,
    rng: StdRng,
}

impl MatrixRain {
    pub fn new(settings: &BackgroundSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Deterministic rain for tests.
    #[cfg(test)]
    pub fn seeded(settings: &BackgroundSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: &BackgroundSettings, rng: StdRng) -> Self {
        Self {
            columns: Vec::new(),
            max_columns: settings.columns.max(1),
            width: 0,
            height: 0,
            rng,
        }
    }

    #[cfg(test)]
    pub fn columns(&self) -> &[RainColumn] {
        &self.columns
    }

    /// Match the terminal size. Columns are rebuilt only when the count changes.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let wanted = self.max_columns.min(width as usize);
        if wanted == self.columns.len() {
            return;
        }
        self.columns = (0..wanted).map(|_| self.spawn_column()).collect();
    }

    /// Advance every column one step.
    pub fn tick(&mut self) {
        let limit = self.height as f32 + OVERSHOOT_ROWS + TRAIL_LEN as f32;
        for i in 0..self.columns.len() {
            let bits = self.rng.r#gen::<u32>();
            let col = &mut self.columns[i];
            col.y += col.speed;
            col.glyph_bits = bits;
            if col.y > limit {
                col.y = self.rng.gen_range(RESTART_MIN_ROW..=0.0);
                col.speed = self.rng.gen_range(MIN_SPEED..=MAX_SPEED);
            }
        }
    }

    fn spawn_column(&mut self) -> RainColumn {
        RainColumn {
            y: self.rng.gen_range(RESTART_MIN_ROW..=0.0),
            speed: self.rng.gen_range(MIN_SPEED..=MAX_SPEED),
            opacity: self.rng.gen_range(0.1..0.6),
            glyph_bits: self.rng.r#gen(),
        }
    }

    /// Terminal column of rain column `i` inside an area of `width` cells.
    fn column_x(&self, i: usize, width: u16) -> u16 {
        let n = self.columns.len().max(1) as u16;
        let spacing = (width / n).max(1);
        (i as u16).saturating_mul(spacing)
    }
}

/// Opacity of trail cell `j`, fading linearly from the head.
pub fn trail_opacity(head: f32, j: usize) -> f32 {
    head * (1.0 - j as f32 / TRAIL_LEN as f32)
}

impl Widget for &MatrixRain {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for x in area.left()..area.right() {
            for y in area.top()..area.bottom() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(' ').set_bg(theme::C_BG);
                }
            }
        }

        for (i, col) in self.columns.iter().enumerate() {
            let x = area.x + self.column_x(i, area.width);
            if x >= area.right() {
                continue;
            }
            let head = col.y.floor() as i32;
            // Head is the lowest cell; the trail fades upward.
            for j in 0..TRAIL_LEN {
                let row = head - j as i32;
                if row < 0 || row >= area.height as i32 {
                    continue;
                }
                let y = area.y + row as u16;
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(col.glyph(j))
                        .set_fg(theme::green_with_opacity(trail_opacity(col.opacity, j)));
                }
            }
        }
    }
}
