use crate::events::EventEmitter;
use crate::model::{GameCommand, GamePhase, TILE_COUNT};

/// What the input loop should do after a line has been translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// A command was sent to the game.
    Sent,
    /// The player asked to give up; ask before sending it.
    ConfirmGiveUp,
    ShowHelp,
    Quit,
    Unrecognized,
}

/// Maps typed lines onto [`GameCommand`]s, depending on the screen shown.
pub struct InputTranslator {
    game_command_emitter: EventEmitter<GameCommand>,
}

impl InputTranslator {
    pub fn new(game_command_emitter: EventEmitter<GameCommand>) -> Self {
        Self {
            game_command_emitter,
        }
    }

    /// `quiz_options` are the answers in the order they were shown.
    pub fn handle_line(&self, phase: GamePhase, line: &str, quiz_options: &[String]) -> InputOutcome {
        let input = line.trim().to_lowercase();
        match input.as_str() {
            "q" | "quit" => return InputOutcome::Quit,
            "h" | "help" | "?" => return InputOutcome::ShowHelp,
            "m" | "menu" => return self.send(GameCommand::ResetToStart),
            _ => (),
        }

        match phase {
            GamePhase::Idle | GamePhase::Result => match input.as_str() {
                "" | "s" | "start" | "p" | "play" => self.send(GameCommand::StartGame),
                _ => InputOutcome::Unrecognized,
            },
            GamePhase::Puzzling => match input.as_str() {
                "g" | "give up" => InputOutcome::ConfirmGiveUp,
                "r" | "shuffle" => self.send(GameCommand::Shuffle),
                other => match parse_choice(other, TILE_COUNT) {
                    Some(position) => self.send(GameCommand::MoveTile(position)),
                    None => InputOutcome::Unrecognized,
                },
            },
            GamePhase::Quizzing => match parse_choice(&input, quiz_options.len()) {
                Some(index) => self.send(GameCommand::SubmitAnswer(quiz_options[index].clone())),
                None => InputOutcome::Unrecognized,
            },
        }
    }

    /// Answer to the give-up prompt.
    pub fn handle_confirmation(&self, line: &str) -> bool {
        let confirmed = matches!(line.trim().to_lowercase().as_str(), "y" | "yes");
        if confirmed {
            self.send(GameCommand::GiveUp);
        }
        confirmed
    }

    fn send(&self, command: GameCommand) -> InputOutcome {
        self.game_command_emitter.emit(command);
        InputOutcome::Sent
    }
}

/// Parses a 1-based choice into a 0-based index below `count`.
fn parse_choice(input: &str, count: usize) -> Option<usize> {
    let choice = input.parse::<usize>().ok()?;
    (1..=count).contains(&choice).then(|| choice - 1)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::events::Channel;

    fn translator() -> (InputTranslator, Rc<RefCell<Vec<GameCommand>>>) {
        let (emitter, observer) = Channel::<GameCommand>::new();
        let sent = Rc::new(RefCell::new(Vec::new()));
        let sent_clone = sent.clone();
        observer.subscribe(move |command| sent_clone.borrow_mut().push(command.clone()));
        (InputTranslator::new(emitter), sent)
    }

    #[test]
    fn test_tiles_are_numbered_from_one() {
        let (translator, sent) = translator();
        assert_eq!(translator.handle_line(GamePhase::Puzzling, " 6 ", &[]), InputOutcome::Sent);
        assert_eq!(translator.handle_line(GamePhase::Puzzling, "0", &[]), InputOutcome::Unrecognized);
        assert_eq!(translator.handle_line(GamePhase::Puzzling, "10", &[]), InputOutcome::Unrecognized);
        assert_eq!(*sent.borrow(), vec![GameCommand::MoveTile(5)]);
    }

    #[test]
    fn test_give_up_needs_confirmation() {
        let (translator, sent) = translator();
        assert_eq!(
            translator.handle_line(GamePhase::Puzzling, "g", &[]),
            InputOutcome::ConfirmGiveUp
        );
        assert!(sent.borrow().is_empty());

        assert!(!translator.handle_confirmation("n"));
        assert!(sent.borrow().is_empty());
        assert!(translator.handle_confirmation("Y"));
        assert_eq!(*sent.borrow(), vec![GameCommand::GiveUp]);
    }

    #[test]
    fn test_quiz_answers_follow_shown_order() {
        let (translator, sent) = translator();
        let options = vec!["Amazon EBS".to_string(), "Amazon S3".to_string()];
        translator.handle_line(GamePhase::Quizzing, "2", &options);
        assert_eq!(
            translator.handle_line(GamePhase::Quizzing, "3", &options),
            InputOutcome::Unrecognized
        );
        assert_eq!(
            *sent.borrow(),
            vec![GameCommand::SubmitAnswer("Amazon S3".to_string())]
        );
    }

    #[test]
    fn test_start_and_menu() {
        let (translator, sent) = translator();
        translator.handle_line(GamePhase::Idle, "", &[]);
        translator.handle_line(GamePhase::Result, "play", &[]);
        translator.handle_line(GamePhase::Quizzing, "m", &[]);
        assert_eq!(translator.handle_line(GamePhase::Idle, "Q", &[]), InputOutcome::Quit);
        assert_eq!(
            *sent.borrow(),
            vec![
                GameCommand::StartGame,
                GameCommand::StartGame,
                GameCommand::ResetToStart
            ]
        );
    }
}
