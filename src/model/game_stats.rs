use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Facts about one playthrough, handed to the result screen.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct GameStats {
    pub elapsed: Duration,
    pub move_count: u32,
    pub gave_up: bool,
    /// `None` until the quiz has been answered.
    pub answered_correctly: Option<bool>,
    pub service_name: String,
    /// Unix seconds at the instant the clock stopped.
    pub timestamp: i64,
    pub playthrough_id: Uuid,
}

impl GameStats {
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }
}
