use thiserror::Error;

/// Authentication failures surfaced by the login flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("An error occurred during login")]
    Unreachable,
}

/// Failures surfaced by a record submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The backend rejected the record; the reason is shown verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("Error submitting message")]
    Unreachable,
}

/// Why a list fetch failed. The visible message is generic either way; the
/// variant is kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("Unexpected data format")]
    Malformed,
    #[error("Failed to fetch messages")]
    Transport,
}

/// Failures surfaced by a single-record lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Unexpected data format")]
    Malformed,
    #[error("Failed to fetch wire message")]
    Transport,
}
