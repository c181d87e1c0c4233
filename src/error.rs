use std::result;

use thiserror::Error as ThisError;

pub type Result<T> = result::Result<T, GiveawayError>;

/// Errors produced by giveaway transitions. Validation and state errors are
/// returned before anything is written; platform errors are only surfaced
/// once the transition has already reached a safe persisted state.
#[derive(Debug, ThisError)]
pub enum GiveawayError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("giveaway {0} could not be found")]
    NotFound(String),
    #[error("{0}")]
    IllegalState(#[from] IllegalState),
    #[error("there are no eligible entrants")]
    NoEligibleEntrants,
    #[error("{0}")]
    Platform(#[from] PlatformError),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ThisError)]
pub enum ValidationError {
    #[error("the start time must be a positive duration")]
    InvalidStartTime,
    #[error("the duration must be a positive duration")]
    InvalidDuration,
    #[error("a giveaway needs at least one winner")]
    InvalidWinnersCount,
    #[error("the extension must be a positive duration")]
    InvalidExtension,
    #[error("the extended end time is already in the past")]
    ExtensionExpired,
    #[error("the embed colour is not a valid hex colour")]
    InvalidColor,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ThisError)]
pub enum IllegalState {
    #[error("the giveaway has already ended")]
    AlreadyEnded,
    #[error("the giveaway is scheduled and has not started yet")]
    Scheduled,
    #[error("the giveaway has not ended yet")]
    NotEnded,
}

/// Failures talking to the chat platform.
#[derive(Debug, ThisError)]
pub enum PlatformError {
    #[error("{0}")]
    Serenity(#[from] serenity::Error),
    #[error("{0} could not be found")]
    Missing(&'static str),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("record {0} does not exist")]
    UnknownRecord(String),
}

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("the {0} environment variable is not set")]
    Missing(&'static str),
}
