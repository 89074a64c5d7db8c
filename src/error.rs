use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the detector-response core.
///
/// Every fallible operation returns this via the `Result` alias; no
/// `.unwrap()`/`.expect()` outside tests. Each variant carries enough
/// context to be actionable.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter (malformed geometry value, sampling
    /// domain violation such as `low >= high` or `radius <= 0`).
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A step reported a sensor copy number outside the valid channel
    /// range. Indicates a mismatch between the placed geometry and the
    /// accumulator sizing; never absorbed.
    #[error("channel index {got} outside valid sensor range [0, {max}]")]
    ChannelOutOfRange { got: i64, max: usize },

    /// Event hooks invoked out of order (e.g. a step callback with no
    /// event open, or two event-starts without an event-end).
    #[error("event lifecycle violation: {0}")]
    Lifecycle(String),

    /// Propagated I/O errors from writing per-event reports.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
