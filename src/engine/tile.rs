use crate::error::{Error, Result};

/// Tile is a single board cell: either blank or a numbered tile carrying the
/// exponent of its displayed power-of-two value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Tile {
    Empty,
    Power(u8),
}

impl Tile {
    pub(crate) const MIN_POWER: u8 = 1;
    pub(crate) const MAX_POWER: u8 = 11;

    /// Constructs a numbered tile, rejecting powers outside [MIN_POWER, MAX_POWER].
    pub(crate) fn new(power: u8) -> Result<Tile> {
        if !(Self::MIN_POWER..=Self::MAX_POWER).contains(&power) {
            return Err(Error::PowerOutOfRange(power));
        }
        Ok(Tile::Power(power))
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Power(power) => write!(f, "{}", 1u16 << power),
        }
    }
}
