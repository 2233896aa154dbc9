use rand::RngCore;

use super::board::Board;
use super::tile::Tile;
use super::transform::{
    DownTransform, LeftTransform, RightTransform, SpawnTransform, Transformation, UpTransform,
};
use crate::error::{Error, Result};

/// Direction represents the direction indicated by the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        };
        write!(f, "{}", s)
    }
}

/// Game holds the current board and maps swipes onto the five transforms.
/// A swipe that moves nothing is a no-op: no spawn, no state change.
pub(crate) struct Game {
    board: Board,
    spawn: Box<dyn Transformation>,
    left: Box<dyn Transformation>,
    right: Box<dyn Transformation>,
    up: Box<dyn Transformation>,
    down: Box<dyn Transformation>,
}

impl Game {
    /// Starts a game from the given board using the given random number
    /// generator for spawns.
    pub(crate) fn new(initial: Board, rng: impl RngCore + 'static) -> Self {
        Self::with_transforms(
            initial,
            Box::new(SpawnTransform::new(rng)),
            Box::new(LeftTransform),
            Box::new(RightTransform),
            Box::new(UpTransform),
            Box::new(DownTransform),
        )
    }

    /// Starts a standard game: one spawned tile on an otherwise empty board.
    pub(crate) fn standard(rng: impl RngCore + 'static) -> Result<Self> {
        let mut spawn = SpawnTransform::new(rng);
        let initial = spawn.transform(&Board::empty())?;
        Ok(Self::with_transforms(
            initial,
            Box::new(spawn),
            Box::new(LeftTransform),
            Box::new(RightTransform),
            Box::new(UpTransform),
            Box::new(DownTransform),
        ))
    }

    pub(crate) fn with_transforms(
        initial: Board,
        spawn: Box<dyn Transformation>,
        left: Box<dyn Transformation>,
        right: Box<dyn Transformation>,
        up: Box<dyn Transformation>,
        down: Box<dyn Transformation>,
    ) -> Self {
        Self {
            board: initial,
            spawn,
            left,
            right,
            up,
            down,
        }
    }

    pub(crate) fn current(&self) -> &Board {
        &self.board
    }

    pub(crate) fn has_succeeded(&self) -> bool {
        self.board.cells().any(|t| t == Tile::Power(Tile::MAX_POWER))
    }

    /// True when the board is full. Deliberately ignores the won state: a
    /// board that fills up on the winning move reports both.
    pub(crate) fn has_failed(&self) -> bool {
        !self.board.cells().any(|t| t == Tile::Empty)
    }

    pub(crate) fn has_ended(&self) -> bool {
        self.has_succeeded() || self.has_failed()
    }

    /// Applies the directional transform and, if anything moved, spawns a new
    /// tile into the result and adopts it as the current board.
    pub(crate) fn swipe(&mut self, direction: Direction) -> Result<()> {
        if self.has_ended() {
            return Err(Error::GameAlreadyEnded);
        }
        let transform = match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        };
        let next = transform.transform(&self.board)?;
        if next != self.board {
            self.board = self.spawn.transform(&next)?;
        }
        Ok(())
    }
}
