use std::time::{Duration, SystemTime};

use serde_with::serde_as;
use serde_with::TimestampSeconds;

/// Start and stop instants of a puzzle clock. Every reading takes `now`
/// from the caller so the session never reads the wall clock itself.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimerState {
    #[serde_as(as = "TimestampSeconds")]
    pub started_timestamp: SystemTime,
    #[serde_as(as = "Option<TimestampSeconds>")]
    pub ended_timestamp: Option<SystemTime>,
}

impl TimerState {
    pub fn started(now: SystemTime) -> TimerState {
        Self {
            started_timestamp: now,
            ended_timestamp: None,
        }
    }

    /// Elapsed time as seen at `now`; once ended, `now` is ignored.
    pub fn elapsed_at(&self, now: SystemTime) -> Duration {
        self.ended_timestamp
            .unwrap_or(now)
            .duration_since(self.started_timestamp)
            .unwrap_or_default()
    }

    /// The frozen reading, available only after [`TimerState::ended`].
    pub fn final_elapsed(&self) -> Option<Duration> {
        self.ended_timestamp
            .map(|end| end.duration_since(self.started_timestamp).unwrap_or_default())
    }

    /// Stops the clock. A clock that already stopped keeps its first stop time.
    pub fn ended(&self, now: SystemTime) -> TimerState {
        let mut new_state = self.clone();
        new_state.ended_timestamp.get_or_insert(now);
        new_state
    }
}
