use std::fmt;

/// Errors reported by platform collaborators (window, renderer, textures).
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// Window creation failed.
    Window(String),
    /// Renderer creation failed.
    Renderer(String),
    /// A platform subsystem (video, image decoding) could not start.
    Subsystem(String),
    /// A texture could not be decoded or uploaded.
    TextureLoad { path: String, reason: String },
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Window(e) => write!(f, "failed to create window: {e}"),
            PlatformError::Renderer(e) => write!(f, "failed to create renderer: {e}"),
            PlatformError::Subsystem(e) => write!(f, "unable to initialize subsystem: {e}"),
            PlatformError::TextureLoad { path, reason } => {
                write!(f, "failed to load texture {path}: {reason}")
            }
        }
    }
}

impl std::error::Error for PlatformError {}

/// Errors surfaced by the game lifecycle.
#[derive(Debug)]
pub enum GameError {
    /// Window, renderer or subsystem setup failed; the game cannot run.
    Initialization(PlatformError),
    /// The level failed to populate its initial actors.
    Load(String),
    /// `run_loop` was called before a successful `initialize`.
    NotInitialized,
    /// `initialize` was called on a game that has already shut down.
    ShutDown,
    /// The configuration could not be parsed.
    Config(serde_json::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Initialization(e) => write!(f, "initialization failed: {e}"),
            GameError::Load(e) => write!(f, "failed to load game data: {e}"),
            GameError::NotInitialized => write!(f, "game loop started before initialize"),
            GameError::ShutDown => write!(f, "game has already shut down"),
            GameError::Config(e) => write!(f, "invalid game config: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Initialization(e) => Some(e),
            GameError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlatformError> for GameError {
    fn from(e: PlatformError) -> Self {
        GameError::Initialization(e)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Config(e)
    }
}
