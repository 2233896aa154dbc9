pub(crate) mod board;
pub(crate) mod game;
pub(crate) mod tile;
pub(crate) mod transform;
