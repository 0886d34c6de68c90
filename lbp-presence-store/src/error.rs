use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("player name cannot be empty")]
    PlayerNameEmpty,

    #[error("player name exceeds 16 characters (got {0})")]
    PlayerNameTooLong(usize),
}

pub type Result<T> = std::result::Result<T, StoreError>;
