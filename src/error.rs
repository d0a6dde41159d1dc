//! Unified error type for all nodelog operations.

/// Error type for nodelog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from an output backend.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// Invalid severity string.
    InvalidLevel(String),
    /// Node id outside `0..=255`.
    InvalidNode(String),
    /// The calling thread observed a cancellation request at a checkpoint.
    Cancelled,
    /// Installing, masking, or sending the cancellation signal failed.
    Signal(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::InvalidLevel(level) => write!(f, "invalid severity: {level}"),
            Self::InvalidNode(node) => write!(f, "invalid node id: '{node}'"),
            Self::Cancelled => write!(f, "thread cancelled"),
            Self::Signal(e) => write!(f, "signal error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::Signal(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            Self::ConfigDirNotFound
            | Self::InvalidLevel(_)
            | Self::InvalidNode(_)
            | Self::Cancelled => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl Error {
    /// Workers unwinding after a checkpoint match on this instead of destructuring.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
