mod dispatch;
mod veritas;

pub use dispatch::DispatchError;
pub use veritas::VeritasError;

/// Whether a failed model call should move on to the next model candidate.
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

/// Coarse failure classes the fallback loop and the CLI act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The model identifier is unknown or retired upstream.
    NotFound,
    /// Quota or throughput exhausted.
    RateLimited,
    Other,
}
