//! Character-grid renderer

use super::{Renderer, Snapshot};

const HEAD: char = '@';
const BODY: char = 'o';
const FOOD: char = '*';
const EMPTY: char = '.';

/// Draws snapshots as text and keeps the latest frame
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    size: usize,
    frame: String,
    frames: u64,
}

impl TextRenderer {
    pub fn new(grid_size: i32) -> Self {
        Self {
            size: grid_size.max(0) as usize,
            frame: String::new(),
            frames: 0,
        }
    }

    /// Most recent frame
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// Number of frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw a snapshot: one line per row plus a status line
    pub fn draw(&self, snapshot: &Snapshot) -> String {
        let size = self.size;
        let mut cells = vec![EMPTY; size * size];
        let mut put = |x: i32, y: i32, ch: char| {
            if x >= 0 && y >= 0 && (x as usize) < size && (y as usize) < size {
                cells[y as usize * size + x as usize] = ch;
            }
        };

        if let Some(food) = snapshot.food {
            put(food.x, food.y, FOOD);
        }
        for (i, cell) in snapshot.body.iter().enumerate().rev() {
            put(cell.x, cell.y, if i == 0 { HEAD } else { BODY });
        }

        let mut out = String::with_capacity((size + 1) * size + 32);
        for row in cells.chunks(size.max(1)) {
            out.extend(row.iter());
            out.push('\n');
        }
        out.push_str(&format!("score {}  level {}", snapshot.score, snapshot.level));
        out
    }
}

impl Renderer for TextRenderer {
    fn present(&mut self, snapshot: &Snapshot) {
        self.frame = self.draw(snapshot);
        self.frames += 1;
    }
}
