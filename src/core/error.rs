use std::fmt;

/// Errors of the configuration and construction surface.
///
/// Numerical degeneracies inside a random walk are never reported here; they
/// resolve to fallback values.
#[derive(Debug, Clone, PartialEq)]
pub enum MicrosurfaceError {
    InvalidParameter { name: String, message: String },
    UnknownName { kind: String, name: String },
    Io(String),
    Parse(String),
    Error(String),
}

impl MicrosurfaceError {
    pub fn error(msg: &str) -> Self {
        MicrosurfaceError::Error(msg.to_string())
    }

    pub fn invalid_parameter(name: &str, message: &str) -> Self {
        MicrosurfaceError::InvalidParameter {
            name: name.to_string(),
            message: message.to_string(),
        }
    }

    pub fn unknown_name(kind: &str, name: &str) -> Self {
        MicrosurfaceError::UnknownName {
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for MicrosurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MicrosurfaceError::InvalidParameter { name, message } => {
                write!(f, "Invalid parameter \"{}\": {}", name, message)
            }
            MicrosurfaceError::UnknownName { kind, name } => {
                write!(f, "{} \"{}\" unknown.", kind, name)
            }
            MicrosurfaceError::Io(msg) => write!(f, "I/O error: {}", msg),
            MicrosurfaceError::Parse(msg) => write!(f, "Parse error: {}", msg),
            MicrosurfaceError::Error(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for MicrosurfaceError {}

impl From<std::io::Error> for MicrosurfaceError {
    fn from(e: std::io::Error) -> Self {
        MicrosurfaceError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for MicrosurfaceError {
    fn from(e: serde_json::Error) -> Self {
        MicrosurfaceError::Parse(e.to_string())
    }
}
