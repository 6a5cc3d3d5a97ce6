use thiserror::Error;

/// Errors surfaced by engine construction and by the driver-side validation
/// of hyperparameters and training data.
#[derive(Debug, Error)]
pub enum RbmError {
    /// Weight or accumulator storage could not be reserved.
    #[error("cannot allocate a {rows}x{cols} matrix")]
    Allocation { rows: usize, cols: usize },

    /// A layer was configured with zero units.
    #[error("{layer} layer must have at least one unit")]
    EmptyLayer { layer: &'static str },

    /// A training vector does not match the visible layer width.
    #[error("training vector {index} has length {found}, expected {expected}")]
    VectorLength {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// A training set was handed to a machine with a different visible width.
    #[error("training vectors are {found} wide, but the visible layer has {expected} units")]
    WidthMismatch { expected: usize, found: usize },

    /// A training vector holds something other than 0 or 1.
    #[error("training vector {index} holds {value} at position {position}; expected 0 or 1")]
    NonBinary {
        index: usize,
        position: usize,
        value: u8,
    },

    #[error("learning rate must be finite, got {0}")]
    InvalidLearningRate(f64),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RbmError>;
