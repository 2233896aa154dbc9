use rand::Rng;

use super::tile::Tile;
use crate::error::{Error, Result};

pub(crate) const WIDTH: usize = 4;
pub(crate) const HEIGHT: usize = 4;

/// Board is an immutable snapshot of the 4x4 grid. Transforms never mutate a
/// board in place; they always produce a fresh one.
#[derive(Clone, Debug)]
pub(crate) struct Board {
    rows: [[Tile; WIDTH]; HEIGHT],
}

impl Board {
    pub(crate) fn empty() -> Self {
        Self {
            rows: [[Tile::Empty; WIDTH]; HEIGHT],
        }
    }

    pub(crate) fn new(rows: [[Tile; WIDTH]; HEIGHT]) -> Self {
        Self { rows }
    }

    /// Generates a board where each cell is independently blank with
    /// probability 0.5, otherwise a uniformly random power. Handy for ad-hoc
    /// testing; normal startup is one spawn onto an empty board.
    pub(crate) fn random<T: Rng>(rng: &mut T) -> Result<Self> {
        let mut rows = [[Tile::Empty; WIDTH]; HEIGHT];
        for row in rows.iter_mut() {
            for cell in row.iter_mut() {
                if rng.gen_bool(0.5) {
                    *cell = Tile::new(rng.gen_range(Tile::MIN_POWER..=Tile::MAX_POWER))?;
                }
            }
        }
        Ok(Self { rows })
    }

    pub(crate) fn rows(&self) -> &[[Tile; WIDTH]; HEIGHT] {
        &self.rows
    }

    /// Iterates over all cells in row-major order.
    pub(crate) fn cells(&self) -> impl Iterator<Item = Tile> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// Reverses each row.
    pub(crate) fn reflect_horizontal(&self) -> Board {
        let mut rows = self.rows;
        for row in rows.iter_mut() {
            row.reverse();
        }
        Board { rows }
    }

    /// Swaps rows and columns.
    pub(crate) fn transpose(&self) -> Board {
        let mut rows = [[Tile::Empty; WIDTH]; HEIGHT];
        for (y, row) in self.rows.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                rows[x][y] = *tile;
            }
        }
        Board { rows }
    }

    #[cfg(test)]
    pub(crate) fn from_powers(powers: [[u8; WIDTH]; HEIGHT]) -> Board {
        let mut rows = [[Tile::Empty; WIDTH]; HEIGHT];
        for (y, row) in powers.iter().enumerate() {
            for (x, &power) in row.iter().enumerate() {
                if power > 0 {
                    rows[y][x] = Tile::new(power).expect("test powers must be in range");
                }
            }
        }
        Board { rows }
    }
}

impl TryFrom<Vec<Vec<Tile>>> for Board {
    type Error = Error;

    fn try_from(grid: Vec<Vec<Tile>>) -> Result<Board> {
        if grid.len() != HEIGHT {
            return Err(Error::BadHeight {
                expected: HEIGHT,
                actual: grid.len(),
            });
        }
        let mut rows = [[Tile::Empty; WIDTH]; HEIGHT];
        for (y, row) in grid.iter().enumerate() {
            if row.len() != WIDTH {
                return Err(Error::BadWidth {
                    expected: WIDTH,
                    actual: row.len(),
                });
            }
            for (x, tile) in row.iter().enumerate() {
                rows[y][x] = *tile;
            }
        }
        Ok(Board { rows })
    }
}

impl PartialEq for Board {
    /// True if the value of each corresponding cell pair matches.
    fn eq(&self, other: &Self) -> bool {
        self.cells().zip(other.cells()).all(|(a, b)| a == b)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rows = self.rows.iter().peekable();
        while let Some(row) = rows.next() {
            let cells = row
                .iter()
                .map(|tile| tile.to_string())
                .collect::<Vec<String>>()
                .join(" | ");
            write!(f, "{}", cells)?;
            if rows.peek().is_some() {
                write!(f, "\n")?;
            }
        }
        Ok(())
    }
}
