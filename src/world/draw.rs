use std::fmt;

use super::Grid;

pub const ALIVE: char = '#';
pub const DEAD: char = '.';

/// One line per row, [`ALIVE`] and [`DEAD`] per cell.
pub fn render(grid: &Grid) -> Vec<String> {
    grid.rows().map(render_row).collect()
}

fn render_row(row: &[bool]) -> String {
    row.iter().map(|&c| if c { ALIVE } else { DEAD }).collect()
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", render_row(row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let mut grid = Grid::blank(4, 2);
        grid.set(0, 0, true);
        grid.set(1, 2, true);
        assert_eq!(render(&grid), ["#...", "..#."]);
        assert_eq!(grid.to_string(), "#...\n..#.\n");
    }

    #[test]
    fn test_render_is_idempotent_and_parsable() {
        let grid = crate::world::init::random(13, 9, Some(7), 0.5);
        let first = render(&grid);
        assert_eq!(first, render(&grid));
        assert_eq!(Grid::parse(&first.join("\n")).unwrap(), grid);
    }
}
