//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and session bookkeeping so clients
//! can bubble them up with consistent context.
use aerial_core::{ConfigurationError, ErrorSeverity, GameError, PlayerId};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires game content to be configured before building")]
    MissingContent,

    #[error("player {0} has no session")]
    UnknownPlayer(PlayerId),

    #[error("player {0} already joined")]
    AlreadyJoined(PlayerId),

    #[error("unknown bundle '{0}'")]
    UnknownBundle(String),

    #[error("failed to build equipment")]
    Equipment(#[from] ConfigurationError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownPlayer(_) | Self::AlreadyJoined(_) | Self::UnknownBundle(_) => {
                ErrorSeverity::Validation
            }
            Self::Equipment(error) => error.severity(),
            Self::CommandChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::WorkerJoin(_)
            | Self::MissingContent => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::MissingContent => "RUNTIME_MISSING_CONTENT",
            Self::UnknownPlayer(_) => "RUNTIME_UNKNOWN_PLAYER",
            Self::AlreadyJoined(_) => "RUNTIME_ALREADY_JOINED",
            Self::UnknownBundle(_) => "RUNTIME_UNKNOWN_BUNDLE",
            Self::Equipment(error) => error.error_code(),
        }
    }
}
