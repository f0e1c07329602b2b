use thiserror::Error;

/// Rejected pagination input. Callers validate before a service is built,
/// the query layer never clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("page number must be at least 1, got {0}")]
    NumberOutOfRange(i64),

    #[error("page size must be between 1 and {max}, got {got}")]
    SizeOutOfRange { got: i64, max: u32 },
}
