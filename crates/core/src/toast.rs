//! Self-clearing notifications.
//!
//! Each channel is a small state machine, `Idle -> Visible { expires_at } -> Idle`,
//! advanced by [`Toasts::tick`]. Triggering a visible channel again moves its
//! expiry forward, so an older trigger can never hide a newer one.
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastChannel {
    Success,
    Pending,
    Error,
    Copy,
}

impl ToastChannel {
    pub const ALL: [ToastChannel; 4] = [
        ToastChannel::Success,
        ToastChannel::Pending,
        ToastChannel::Error,
        ToastChannel::Copy,
    ];

    pub fn message(self) -> &'static str {
        match self {
            ToastChannel::Success => "Transaction has been confirmed!",
            ToastChannel::Pending => "Your transaction is on its way!",
            ToastChannel::Error => "Transaction has been failed!",
            ToastChannel::Copy => "Copied!",
        }
    }

    fn index(self) -> usize {
        match self {
            ToastChannel::Success => 0,
            ToastChannel::Pending => 1,
            ToastChannel::Error => 2,
            ToastChannel::Copy => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastState {
    Idle,
    Visible { expires_at: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastDurations {
    /// Lifetime of the success, pending and error toasts
    pub transaction_ms: u64,
    /// Lifetime of the copy confirmation
    pub copy_ms: u64,
}

impl Default for ToastDurations {
    fn default() -> Self {
        Self {
            transaction_ms: 10_000,
            copy_ms: 5_000,
        }
    }
}

impl ToastDurations {
    pub fn for_channel(&self, channel: ToastChannel) -> Duration {
        match channel {
            ToastChannel::Copy => Duration::from_millis(self.copy_ms),
            _ => Duration::from_millis(self.transaction_ms),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toasts {
    durations: ToastDurations,
    states: [ToastState; 4],
}

impl Toasts {
    pub fn new(durations: ToastDurations) -> Self {
        Self {
            durations,
            states: [ToastState::Idle; 4],
        }
    }

    /// Shows `channel` until `now + duration`, returning the new expiry.
    pub fn trigger(&mut self, channel: ToastChannel, now: Instant) -> Instant {
        let expires_at = now + self.durations.for_channel(channel);
        self.states[channel.index()] = ToastState::Visible { expires_at };
        expires_at
    }

    /// Hides every channel whose expiry is at or before `now` and returns them.
    pub fn tick(&mut self, now: Instant) -> Vec<ToastChannel> {
        let mut expired = Vec::new();
        for channel in ToastChannel::ALL {
            let state = &mut self.states[channel.index()];
            if let ToastState::Visible { expires_at } = *state {
                if expires_at <= now {
                    *state = ToastState::Idle;
                    expired.push(channel);
                }
            }
        }
        expired
    }

    pub fn state(&self, channel: ToastChannel) -> ToastState {
        self.states[channel.index()]
    }

    pub fn is_visible(&self, channel: ToastChannel) -> bool {
        matches!(self.state(channel), ToastState::Visible { .. })
    }

    pub fn visible(&self) -> impl Iterator<Item = ToastChannel> + '_ {
        ToastChannel::ALL
            .into_iter()
            .filter(|channel| self.is_visible(*channel))
    }

    /// Earliest pending expiry, for scheduling the next tick.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.states
            .iter()
            .filter_map(|state| match state {
                ToastState::Visible { expires_at } => Some(*expires_at),
                ToastState::Idle => None,
            })
            .min()
    }
}
