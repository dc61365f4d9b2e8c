use thiserror::Error;

/// Top-level error type for the Blockout authoring kernel.
#[derive(Debug, Error)]
pub enum BlockoutError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Meshing(#[from] MeshingError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to mesh derivation.
#[derive(Debug, Error)]
pub enum MeshingError {
    #[error("polygon must have at least {min} points, got {actual}")]
    TooFewPoints { min: usize, actual: usize },
}

/// Convenience type alias for results using [`BlockoutError`].
pub type Result<T> = std::result::Result<T, BlockoutError>;
