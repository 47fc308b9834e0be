use serde::{Deserialize, Serialize};

/// Which screen the game is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Idle,
    Puzzling,
    Quizzing,
    Result,
}

impl GamePhase {
    pub fn can_start(&self) -> bool {
        matches!(self, GamePhase::Idle | GamePhase::Result)
    }
}
