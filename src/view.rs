//! Renderer-facing snapshot of a board.

use alloc::vec::Vec;
use core::fmt;

/// What a renderer may show in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewCell {
    Blank,
    Ship,
    Hit,
    Miss,
}

impl ViewCell {
    fn glyph(self) -> char {
        match self {
            ViewCell::Blank => '.',
            ViewCell::Ship => 'S',
            ViewCell::Hit => 'X',
            ViewCell::Miss => 'o',
        }
    }
}

/// Row-major grid of [`ViewCell`]s, detached from the board it was taken from.
/// `x` is the column and `y` the row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardView {
    size: usize,
    cells: Vec<ViewCell>,
}

impl BoardView {
    pub(crate) fn new(size: usize, cells: Vec<ViewCell>) -> Self {
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<ViewCell> {
        if x < self.size && y < self.size {
            Some(self.cells[y * self.size + x])
        } else {
            None
        }
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[ViewCell]> {
        self.cells.chunks(self.size)
    }

    /// Number of cells showing `cell`.
    pub fn count(&self, cell: ViewCell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

/// Columns are labelled with letters, rows with 1-based numbers.
impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    ")?;
        for c in 0..self.size {
            write!(f, " {}", column_label(c))?;
        }
        writeln!(f)?;
        for (r, row) in self.rows().enumerate() {
            write!(f, "  {:2}", r + 1)?;
            for cell in row {
                write!(f, " {}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Letter used for column `c`, or `?` past `Z`. Configured boards are at
/// most [`MAX_BOARD_SIZE`](crate::config::MAX_BOARD_SIZE) wide.
pub fn column_label(c: usize) -> char {
    match u8::try_from(c) {
        Ok(c) if c < 26 => (b'A' + c) as char,
        _ => '?',
    }
}
