use thiserror;

/// The Result type for cli48.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("tile power must be between 1 and 11 but is {0}")]
    PowerOutOfRange(u8),

    #[error("height must be {expected} but is {actual}")]
    BadHeight { expected: usize, actual: usize },

    #[error("width must be {expected} but is {actual}")]
    BadWidth { expected: usize, actual: usize },

    #[error("game has already ended")]
    GameAlreadyEnded,

    #[error("no empty cell to spawn into")]
    NoEmptyCells,

    #[error("io error")]
    StdIOError(#[from] std::io::Error),
}
