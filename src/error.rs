
/// Errors produced by engine construction and shape mutation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The grid resolution must be positive, and small enough that every
    /// cell coordinate fits a `u16` closest-point target.
    #[error("invalid field resolution {0}, must be in 1..65535")]
    Resolution(usize),

    /// A shape needs at least one vertex.
    #[error("shape must have at least one vertex")]
    EmptyShape,
}

pub type Result<T> = std::result::Result<T, Error>;
