//! Error types for the developer console.

use std::io;

/// Errors produced by the developer console.
///
/// The first group (compile, custom matcher, unresolved handler, duplicate
/// command) can only happen while the command registry is being built and
/// aborts startup. Everything else is recoverable and gets reported through
/// the output sink.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("failed to parse command signature '{signature}': problematic token '{token}'")]
    Compile { signature: String, token: String },

    #[error("invalid custom matcher for '{display}': {reason}")]
    CustomMatcher { display: String, reason: String },

    #[error("no handler bound for signature '{signature}' of command '{command}'")]
    UnresolvedHandler { command: String, signature: String },

    #[error("command '{0}' is declared more than once")]
    DuplicateCommand(String),

    #[error("Bad command syntax")]
    DispatchRejected,

    #[error("unknown alias '{0}'")]
    UnknownAlias(String),

    #[error("unknown event type '{0}'")]
    InvalidHook(String),

    #[error("cannot register alias '{0}': it is a keyword representing all registered aliases")]
    ReservedName(String),

    #[error("alias '{alias}' expanded more than {limit} levels deep")]
    RecursionLimit { alias: String, limit: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConsoleError {
    /// Whether this error indicates a broken command definition.
    pub fn is_startup_error(&self) -> bool {
        matches!(
            self,
            Self::Compile { .. }
                | Self::CustomMatcher { .. }
                | Self::UnresolvedHandler { .. }
                | Self::DuplicateCommand(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ConsoleError>;
