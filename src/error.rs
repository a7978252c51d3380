use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// Every map needs at least one slot to reduce hashes into.
    #[error("map capacity must be at least 1")]
    ZeroCapacity,
}
