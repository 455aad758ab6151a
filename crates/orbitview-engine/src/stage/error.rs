use std::fmt;

use thiserror::Error;

/// Host element a stage operation depends on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Element {
    Container,
    Surface,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => f.write_str("container"),
            Self::Surface => f.write_str("drawing surface"),
        }
    }
}

/// Result type for stage operations.
pub type StageResult<T> = Result<T, StageError>;

/// Errors raised by [`Stage`](super::Stage) operations.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum StageError {
    /// A required host element is absent. The operation is aborted.
    #[error("{0} not found")]
    MissingElement(Element),

    /// The container measured a zero dimension. Nothing was changed.
    #[error("viewport {width}x{height} has a zero dimension")]
    DegenerateViewport { width: u32, height: u32 },
}

impl StageError {
    /// Recoverable errors leave the stage usable; retry on the next resize.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DegenerateViewport { .. })
    }
}
