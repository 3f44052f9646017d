use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoError {
    #[error("cache capacity must be at least 1")]
    ZeroCapacity,
}

pub type Result<T> = std::result::Result<T, MemoError>;
