use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldError {
    /// A multicolor subtraction whose subtrahend is not contained in the minuend.
    /// Filtering guarantees containment before every subtraction, so this is a logic error.
    #[error("Multicolor {subtrahend} is not a subset of {minuend}")]
    NotSubset {
        minuend: String,
        subtrahend: String,
    },

    #[error("No irregular edge is incident to vertex {0}")]
    MissingIrregularEdge(String),

    #[error("Invalid k-break: {0}")]
    InvalidKBreak(String),

    #[error("Genome {0} is not a leaf of the tree")]
    UnknownGenome(String),

    #[error("Tree has no root or no named leaves")]
    EmptyTree,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
