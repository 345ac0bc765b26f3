//! Track acquisition and playback state machine.
//!
//! The session never talks to the platform directly. Callers feed it
//! [`TrackEvent`]s (user actions, audio element callbacks, timers) and carry
//! out the [`Effect`]s it returns. Every acquisition gets a fresh [`Ticket`];
//! callbacks tagged with an older ticket are stale and dropped, which is how
//! a manual "next" cancels interest in whatever the previous track was doing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::constants::*;
use crate::error::TrackError;
use crate::label::display_name_or_placeholder;

pub type Ticket = u64;

const TRANSITION_HISTORY: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackState {
    Idle,
    Loading,
    Playing,
    Ended,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TrackEvent {
    /// User pressed start (or retry).
    StartRequested,
    /// User asked for the next track.
    NextRequested,
    /// The display-name lookup finished; `final_url` is the address after
    /// redirects, `None` when the lookup failed.
    Resolved {
        ticket: Ticket,
        final_url: Option<String>,
    },
    PlaybackStarted {
        ticket: Ticket,
    },
    PlaybackEnded {
        ticket: Ticket,
    },
    PlaybackFailed {
        ticket: Ticket,
        error: TrackError,
    },
    RetryElapsed {
        ticket: Ticket,
    },
    LoadTimedOut {
        ticket: Ticket,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Look up where `url` redirects to and report back with `Resolved`.
    /// Only the label depends on it.
    Resolve { ticket: Ticket, url: String },
    /// Point the audio element at `source` and start playback.
    Play { ticket: Ticket, source: String },
    /// Silence whatever the audio element is doing.
    Stop,
    ShowLabel(String),
    ShowRetry(TrackError),
    HideRetry,
    /// Deliver `RetryElapsed { ticket }` after `delay_ms`.
    ScheduleRetry { ticket: Ticket, delay_ms: u32 },
    /// Deliver `LoadTimedOut { ticket }` after `after_ms`.
    ArmTimeout { ticket: Ticket, after_ms: u32 },
}

pub type Effects = SmallVec<[Effect; 4]>;

/// Bounded exponential backoff for retryable failures.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Consecutive automatic retries allowed before asking the user.
    pub max_auto_retries: u32,
    pub base_delay_ms: u32,
    pub max_delay_ms: u32,
    pub jitter_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_auto_retries: DEFAULT_MAX_AUTO_RETRIES,
            base_delay_ms: RETRY_BASE_DELAY_MS,
            max_delay_ms: RETRY_MAX_DELAY_MS,
            jitter_ms: RETRY_JITTER_MS,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based).
    pub fn delay_ms(&self, attempt: u32, rng: &mut impl Rng) -> u32 {
        let exp = self
            .base_delay_ms
            .saturating_mul(1u32.checked_shl(attempt).unwrap_or(u32::MAX));
        let jitter = if self.jitter_ms > 0 {
            rng.gen_range(0..self.jitter_ms)
        } else {
            0
        };
        exp.min(self.max_delay_ms).saturating_add(jitter)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrackConfig {
    pub source_url: String,
    pub cache_param: String,
    pub retry: RetryPolicy,
    pub load_timeout_ms: u32,
    /// Seed for backoff jitter.
    pub seed: u64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_TRACK_SOURCE.to_string(),
            cache_param: CACHE_BUST_PARAM.to_string(),
            retry: RetryPolicy::default(),
            load_timeout_ms: LOAD_TIMEOUT_MS,
            seed: 42,
        }
    }
}

/// Append `param=stamp` to `base`, keeping any fragment last.
pub fn with_cache_buster(base: &str, param: &str, stamp: u64) -> String {
    let (head, fragment) = match base.find('#') {
        Some(i) => base.split_at(i),
        None => (base, ""),
    };
    let sep = if head.contains('?') {
        if head.ends_with('?') || head.ends_with('&') {
            ""
        } else {
            "&"
        }
    } else {
        "?"
    };
    format!("{head}{sep}{param}={stamp}{fragment}")
}

pub struct TrackSession {
    config: TrackConfig,
    state: TrackState,
    ticket: Ticket,
    requested_url: Option<String>,
    resolved: bool,
    last_stamp: u64,
    failures: u32,
    retry_pending: bool,
    last_error: Option<TrackError>,
    label: Option<String>,
    transitions: Vec<(TrackState, TrackState)>,
    rng: StdRng,
}

impl TrackSession {
    pub fn new(config: TrackConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            state: TrackState::Idle,
            ticket: 0,
            requested_url: None,
            resolved: false,
            last_stamp: 0,
            failures: 0,
            retry_pending: false,
            last_error: None,
            label: None,
            transitions: Vec::new(),
            rng,
        }
    }

    #[inline]
    pub fn state(&self) -> TrackState {
        self.state
    }

    /// Ticket of the current (or most recent) acquisition; 0 before the first.
    #[inline]
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// True while an acquisition is outstanding.
    #[inline]
    pub fn in_flight(&self) -> bool {
        self.state == TrackState::Loading
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn requested_url(&self) -> Option<&str> {
        self.requested_url.as_deref()
    }

    pub fn last_error(&self) -> Option<&TrackError> {
        self.last_error.as_ref()
    }

    /// Consecutive failures since the last successful start.
    pub fn consecutive_failures(&self) -> u32 {
        self.failures
    }

    pub fn retry_pending(&self) -> bool {
        self.retry_pending
    }

    /// Recent `(from, to)` transitions, oldest first.
    pub fn transitions(&self) -> &[(TrackState, TrackState)] {
        &self.transitions
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Process one event. `now_ms` is wall-clock milliseconds, used for the
    /// cache-busting stamp.
    pub fn handle(&mut self, event: TrackEvent, now_ms: f64) -> Effects {
        let mut fx = Effects::new();
        match event {
            TrackEvent::StartRequested => match self.state {
                TrackState::Idle | TrackState::Failed => {
                    // A user gesture earns a fresh retry budget.
                    self.failures = 0;
                    self.begin_acquisition(now_ms, &mut fx);
                }
                TrackState::Loading => log::debug!("[track] start ignored, fetch in flight"),
                TrackState::Playing | TrackState::Ended => {
                    log::debug!("[track] start ignored, already playing")
                }
            },
            TrackEvent::NextRequested => match self.state {
                TrackState::Idle | TrackState::Failed => {
                    self.failures = 0;
                    self.begin_acquisition(now_ms, &mut fx);
                }
                TrackState::Playing => self.begin_acquisition(now_ms, &mut fx),
                TrackState::Loading | TrackState::Ended => {
                    log::debug!("[track] next coalesced into in-flight fetch")
                }
            },
            TrackEvent::Resolved { ticket, final_url } => {
                if !self.is_live(ticket, "resolved") {
                    return fx;
                }
                // The label may land before or after playback starts.
                if !matches!(self.state, TrackState::Loading | TrackState::Playing) || self.resolved
                {
                    log::debug!("[track] late or duplicate resolution for ticket {ticket}");
                    return fx;
                }
                self.resolved = true;
                let label =
                    display_name_or_placeholder(final_url.as_deref(), &self.config.source_url);
                log::info!("[track] ticket {ticket} -> {label}");
                self.label = Some(label.clone());
                fx.push(Effect::ShowLabel(label));
            }
            TrackEvent::PlaybackStarted { ticket } => {
                if !self.is_live(ticket, "started") {
                    return fx;
                }
                match self.state {
                    TrackState::Loading => {
                        self.failures = 0;
                        self.last_error = None;
                        self.transition(TrackState::Playing);
                        fx.push(Effect::HideRetry);
                    }
                    // "playing" fires again after a buffering stall.
                    TrackState::Playing => {}
                    s => log::debug!("[track] started while {s:?}, ignored"),
                }
            }
            TrackEvent::PlaybackEnded { ticket } => {
                if !self.is_live(ticket, "ended") {
                    return fx;
                }
                if self.state == TrackState::Playing {
                    self.transition(TrackState::Ended);
                    self.begin_acquisition(now_ms, &mut fx);
                } else {
                    log::debug!("[track] ended while {:?}, ignored", self.state);
                }
            }
            TrackEvent::PlaybackFailed { ticket, error } => {
                if !self.is_live(ticket, "failed") {
                    return fx;
                }
                match self.state {
                    TrackState::Loading | TrackState::Playing => self.fail(error, &mut fx),
                    s => log::debug!("[track] failure while {s:?} ignored: {error}"),
                }
            }
            TrackEvent::RetryElapsed { ticket } => {
                if !self.is_live(ticket, "retry") {
                    return fx;
                }
                if self.state == TrackState::Failed && self.retry_pending {
                    self.begin_acquisition(now_ms, &mut fx);
                }
            }
            TrackEvent::LoadTimedOut { ticket } => {
                if !self.is_live(ticket, "timeout") {
                    return fx;
                }
                if self.state == TrackState::Loading {
                    self.fail(TrackError::TimedOut, &mut fx);
                }
            }
        }
        fx
    }

    fn is_live(&self, ticket: Ticket, what: &str) -> bool {
        if ticket == self.ticket {
            true
        } else {
            log::debug!(
                "[track] stale {what} for ticket {ticket} (current {})",
                self.ticket
            );
            false
        }
    }

    fn begin_acquisition(&mut self, now_ms: f64, fx: &mut Effects) {
        let was_failed = self.state == TrackState::Failed;
        let stamp = (now_ms.max(0.0) as u64).max(self.last_stamp + 1);
        self.last_stamp = stamp;
        self.ticket += 1;
        self.resolved = false;
        self.retry_pending = false;
        let url = with_cache_buster(&self.config.source_url, &self.config.cache_param, stamp);
        self.requested_url = Some(url.clone());
        self.transition(TrackState::Loading);
        if was_failed {
            fx.push(Effect::HideRetry);
        }
        // Playback starts right away; the name lookup only feeds the label.
        fx.push(Effect::Resolve {
            ticket: self.ticket,
            url: url.clone(),
        });
        fx.push(Effect::Play {
            ticket: self.ticket,
            source: url,
        });
        fx.push(Effect::ArmTimeout {
            ticket: self.ticket,
            after_ms: self.config.load_timeout_ms,
        });
    }

    fn fail(&mut self, error: TrackError, fx: &mut Effects) {
        log::warn!("[track] ticket {} failed: {error}", self.ticket);
        self.transition(TrackState::Failed);
        fx.push(Effect::Stop);
        let retryable = error.is_retryable();
        if retryable {
            self.failures += 1;
        }
        let policy = &self.config.retry;
        if retryable && self.failures <= policy.max_auto_retries {
            let delay_ms = policy.delay_ms(self.failures - 1, &mut self.rng);
            log::info!(
                "[track] retry {}/{} in {delay_ms} ms",
                self.failures,
                policy.max_auto_retries
            );
            self.retry_pending = true;
            fx.push(Effect::ScheduleRetry {
                ticket: self.ticket,
                delay_ms,
            });
        } else {
            self.retry_pending = false;
            fx.push(Effect::ShowRetry(error.clone()));
        }
        self.last_error = Some(error);
    }

    fn transition(&mut self, to: TrackState) {
        let from = self.state;
        log::info!("[track] {from:?} -> {to:?} (ticket {})", self.ticket);
        self.state = to;
        if self.transitions.len() == TRANSITION_HISTORY {
            self.transitions.remove(0);
        }
        self.transitions.push((from, to));
    }
}
