use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Path orders do not form a dense 1..N sequence")]
    BrokenPath,
    #[error("Game already finished, no new rolls are accepted")]
    AlreadyFinished,
}

pub type Result<T> = core::result::Result<T, GameError>;
