use std::fmt;
use std::path::PathBuf;

/// Failure classes the game distinguishes.
///
/// `Init` is fatal, `Tick` abandons one frame, `Persistence` degrades to an
/// in-memory score table, and `InvalidInput` ends the name prompt.
#[derive(Clone, Debug, PartialEq)]
pub enum GameError {
    Init(String),
    Tick { frame: u64, reason: String },
    Persistence { path: PathBuf, reason: String },
    InvalidInput(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(reason) => write!(f, "initialization failed: {reason}"),
            Self::Tick { frame, reason } => {
                write!(f, "tick {frame} abandoned: {reason}")
            }
            Self::Persistence { path, reason } => {
                write!(f, "score store {}: {reason}", path.display())
            }
            Self::InvalidInput(reason) => write!(f, "invalid input: {reason}"),
        }
    }
}

impl std::error::Error for GameError {}
