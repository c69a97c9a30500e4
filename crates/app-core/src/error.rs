use thiserror::Error;

/// Errors raised by the engine. Runtime paths (stepping, injection, sampling)
/// never fail; only construction and lifecycle misuse do.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("frame loop already running")]
    AlreadyRunning,
    #[error("engine has been disposed")]
    Disposed,
}

pub type EngineResult<T> = Result<T, EngineError>;
