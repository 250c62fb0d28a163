//! Maximum track duration policy

use crate::types::PlayableTrack;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound on accepted track length
///
/// `max_seconds == 0` means no limit. Durations are rounded to the nearest
/// whole second before comparing, and only tracks strictly longer than the
/// limit are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationLimit {
    max_seconds: u64,
}

impl DurationLimit {
    /// No limit
    pub const fn unlimited() -> Self {
        Self { max_seconds: 0 }
    }

    /// Reject tracks longer than `max_seconds`
    pub const fn from_secs(max_seconds: u64) -> Self {
        Self { max_seconds }
    }

    pub const fn max_seconds(&self) -> u64 {
        self.max_seconds
    }

    pub const fn is_unlimited(&self) -> bool {
        self.max_seconds == 0
    }

    pub fn is_too_long(&self, duration: Duration) -> bool {
        if self.is_unlimited() {
            return false;
        }

        let rounded_secs = (duration.as_millis() + 500) / 1000;
        rounded_secs > u128::from(self.max_seconds)
    }

    pub fn exceeds<T: PlayableTrack>(&self, track: &T) -> bool {
        self.is_too_long(track.duration())
    }
}
