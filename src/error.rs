//! Crate-level error types.
//!
//! Only configuration problems surface as errors. Runtime conditions such
//! as a missing element, a double dispose, or an interrupted animation are
//! absorbed by the engine and logged at `debug` level.

use std::fmt;

/// Errors produced by the scroll-reveal crate.
#[derive(Debug)]
pub enum RevealError {
    /// A reveal configuration value is out of range.
    InvalidConfig(String),
    /// A CSS root-margin string could not be parsed.
    InvalidRootMargin(String),
    /// TOML options or scenario parsing/serialization failure.
    OptionsParse(String),
    /// A browser DOM call failed or the DOM is unavailable.
    Dom(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for RevealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => {
                write!(f, "invalid reveal config: {msg}")
            }
            Self::InvalidRootMargin(margin) => {
                write!(f, "invalid root margin: '{margin}'")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Dom(msg) => write!(f, "DOM error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for RevealError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RevealError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
