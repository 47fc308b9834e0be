/// Requests from the frontend to the game controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    /// Also serves as "play again" from the result screen.
    StartGame,
    MoveTile(usize),
    Shuffle,
    /// Sent only after the player confirmed.
    GiveUp,
    SubmitAnswer(String),
    ResetToStart,
}
