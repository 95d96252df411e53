//! Error types for the combat engine.

/// Errors that can occur at the engine's input boundary.
///
/// Dice outcomes are never errors: an impossible wound roll or an empty
/// attack pool resolves to zero successes.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A stat, attack count, trial count or die face is out of range.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A profile provider has no unit with the requested name.
    #[error("unknown unit profile: {0}")]
    UnknownProfile(String),

    /// A unit profile document could not be parsed.
    #[error("invalid unit profile: {0}")]
    InvalidProfile(String),

    /// Reading profile files failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
