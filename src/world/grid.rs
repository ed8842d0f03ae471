use crate::{WorldError, WorldResult};

/// Rectangular field of cells stored row by row.
///
/// The size is fixed at creation; `(row, col)` must satisfy
/// `row < height` and `col < width`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a field of dead cells.
    ///
    /// # Panics
    ///
    /// If either side is zero or `width * height` overflows `usize`.
    pub fn blank(width: usize, height: usize) -> Self {
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0)
            .unwrap_or_else(|| panic!("invalid field size {width}x{height}"));
        Self {
            cells: vec![false; len],
            width,
            height,
        }
    }

    /// Parse a field drawn with one text line per row.
    ///
    /// `#`, `O`, `o` and `*` are alive, `.`, `_` and space are dead.
    /// Empty lines are ignored.
    pub fn parse(text: &str) -> WorldResult<Self> {
        let rows = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| match c {
                        '#' | 'O' | 'o' | '*' => Ok(true),
                        '.' | '_' | ' ' => Ok(false),
                        _ => Err(WorldError::InvalidPattern(format!(
                            "unexpected character {c:?}"
                        ))),
                    })
                    .collect::<WorldResult<Vec<bool>>>()
            })
            .collect::<WorldResult<Vec<_>>>()?;

        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(WorldError::InvalidPattern("pattern is empty".to_owned()));
        }
        if let Some(i) = rows.iter().position(|r| r.len() != width) {
            return Err(WorldError::InvalidPattern(format!(
                "row {i} has {} cells, expected {width}",
                rows[i].len()
            )));
        }

        Ok(Self {
            height: rows.len(),
            cells: rows.concat(),
            width,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, state: bool) {
        let i = self.index(row, col);
        self.cells[i] = state;
    }

    /// Rows of the field from top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[bool]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub(super) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    /// Total number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) is outside of {}x{} grid",
            self.width,
            self.height
        );
        row * self.width + col
    }
}
