//! Error types for the hookdoc core library.

/// Top-level error enum for the hookdoc core library.
#[derive(Debug, thiserror::Error)]
pub enum HookdocError {
    /// The declared project root is not a directory.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A subdirectory could not be descended into during enumeration.
    #[error("Traversal error: {0}")]
    Traversal(String),

    /// Source text could not be parsed, or a recognized hook call was
    /// missing its required name argument.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type HookdocResult<T> = Result<T, HookdocError>;
