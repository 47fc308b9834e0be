use super::{GamePhase, GameStats, ServiceRecord, TileGrid};

/// Notifications from the game session to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameSessionEvent {
    StateChanged(GamePhase),
    ServiceSelected(ServiceRecord),
    /// `changed_positions` lists only the cells that need repainting.
    GridChanged {
        grid: TileGrid,
        changed_positions: Vec<usize>,
    },
    MoveCountChanged(u32),
    PuzzleCompleted(GameStats),
    GaveUp(GameStats),
    AnswerResult {
        is_correct: bool,
        correct_name: String,
    },
    ResultReady(GameStats),
}
