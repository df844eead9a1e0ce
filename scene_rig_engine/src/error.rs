//! Error types for the Scene Rig engine
//!
//! Setup-time failures (bad curves, duplicate rig names, cycles, missing motion
//! state) and frame-time controller faults share one error type.

use std::fmt;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Spline path built from degenerate control points
    InvalidCurve(String),

    /// Attaching a node under itself or under one of its descendants
    Cycle(String),

    /// Node or material key that does not belong to the scene
    InvalidNode(String),

    /// Camera rig name already registered
    DuplicateName(String),

    /// Controller targets an entity that has no motion state of its kind
    MissingState(String),

    /// A motion controller failed during a frame update
    ControllerFault(String),

    /// Configuration value out of range
    InvalidConfig(String),

    /// External collaborator failure (renderer, surface)
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCurve(msg) => write!(f, "Invalid curve: {}", msg),
            Error::Cycle(msg) => write!(f, "Cycle in node hierarchy: {}", msg),
            Error::InvalidNode(msg) => write!(f, "Invalid node: {}", msg),
            Error::DuplicateName(msg) => write!(f, "Duplicate name: {}", msg),
            Error::MissingState(msg) => write!(f, "Missing motion state: {}", msg),
            Error::ControllerFault(msg) => write!(f, "Controller fault: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Whether this error can only be produced while building a scene
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidCurve(_)
                | Error::Cycle(_)
                | Error::DuplicateName(_)
                | Error::MissingState(_)
                | Error::InvalidConfig(_)
        )
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
