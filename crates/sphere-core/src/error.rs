use thiserror::Error;

/// Why a track acquisition failed. Each variant maps onto a `Failed` transition.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TrackError {
    /// The platform refused to start playback without a user gesture.
    #[error("playback blocked by autoplay policy")]
    PlaybackBlocked,
    /// Source unreachable, bad status, or audio the platform could not decode.
    #[error("track fetch failed: {0}")]
    FetchFailed(String),
    #[error("track did not start before the load timeout")]
    TimedOut,
}

impl TrackError {
    /// Whether the session may schedule an automatic retry for this failure.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, TrackError::PlaybackBlocked)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("spectrum analyser unavailable: {0}")]
    AnalyserUnavailable(String),
    #[error("could not derive a display name: {0}")]
    NameResolutionFailed(String),
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidConfig {
        key: String,
        value: String,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
