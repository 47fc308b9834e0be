use log::{error, trace};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::collaborators::{CatalogProvider, Clock, RandomSource};
use super::game_session::GameSession;
use super::settings::Settings;
use super::shuffler::Shuffler;
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::{GameCommand, GameError, GameSessionEvent};

/// Turns frontend commands into game session calls, supplying the clock,
/// randomness and catalog the session needs. Holds no timing policy: screen
/// delays belong to whoever renders the events.
pub struct GameController {
    session: GameSession,
    clock: Box<dyn Clock>,
    random: Box<dyn RandomSource>,
    catalog_provider: Box<dyn CatalogProvider>,
    subscription: Option<Unsubscriber<GameCommand>>,
}

impl Destroyable for GameController {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl GameController {
    pub fn new(
        game_command_observer: EventObserver<GameCommand>,
        game_session_event_emitter: EventEmitter<GameSessionEvent>,
        settings: &Settings,
        clock: Box<dyn Clock>,
        random: Box<dyn RandomSource>,
        catalog_provider: Box<dyn CatalogProvider>,
    ) -> Result<Rc<RefCell<Self>>, GameError> {
        let shuffler = Shuffler::new(settings.shuffle_steps)?;
        let controller = Self {
            session: GameSession::new(game_session_event_emitter, shuffler),
            clock,
            random,
            catalog_provider,
            subscription: None,
        };
        let refcell = Rc::new(RefCell::new(controller));
        GameController::wire_subscription(refcell.clone(), game_command_observer);
        Ok(refcell)
    }

    fn wire_subscription(
        controller: Rc<RefCell<Self>>,
        game_command_observer: EventObserver<GameCommand>,
    ) {
        let handler = controller.clone();
        let subscription = game_command_observer.subscribe(move |command| {
            handler.borrow_mut().handle_command(command.clone());
        });
        controller.borrow_mut().subscription = Some(subscription);
    }

    pub fn handle_command(&mut self, command: GameCommand) {
        trace!(target: "game_session", "Handling command: {:?}", command);
        match command {
            GameCommand::StartGame => self.start_game(),
            GameCommand::MoveTile(position) => {
                let now = self.clock.now();
                self.session.attempt_move(position, now);
            }
            GameCommand::Shuffle => {
                self.session.reshuffle(self.random.as_mut());
            }
            GameCommand::GiveUp => {
                let now = self.clock.now();
                self.session.give_up(now);
            }
            GameCommand::SubmitAnswer(answer) => {
                self.session.submit_answer(&answer);
            }
            GameCommand::ResetToStart => self.session.reset_to_start(),
        }
    }

    fn start_game(&mut self) {
        let catalog = self.catalog_provider.catalog();
        let now = self.clock.now();
        if let Err(err) = self
            .session
            .start_game(&catalog, self.random.as_mut(), now)
        {
            error!(target: "game_session", "Cannot start a game: {}", err);
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Current reading for a ticking timer display.
    pub fn elapsed(&self) -> Duration {
        self.session.elapsed_at(self.clock.now())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::events::Channel;
    use crate::game::collaborators::testing::ManualClock;
    use crate::game::collaborators::StaticCatalog;
    use crate::model::{Catalog, GamePhase, ServiceRecord, TileGrid};

    struct Wiring {
        commands: EventEmitter<GameCommand>,
        controller: Rc<RefCell<GameController>>,
        clock: ManualClock,
        events: Rc<RefCell<Vec<GameSessionEvent>>>,
    }

    fn wire(catalog: Catalog) -> Wiring {
        let (commands, command_observer) = Channel::<GameCommand>::new();
        let (event_emitter, event_observer) = Channel::<GameSessionEvent>::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let events_clone = events.clone();
        event_observer.subscribe(move |event| events_clone.borrow_mut().push(event.clone()));

        let clock = ManualClock::new();
        let controller = GameController::new(
            command_observer,
            event_emitter,
            &Settings::default(),
            Box::new(clock.clone()),
            Box::new(StdRng::seed_from_u64(5)),
            Box::new(StaticCatalog(Rc::new(catalog))),
        )
        .unwrap();

        Wiring {
            commands,
            controller,
            clock,
            events,
        }
    }

    fn two_services() -> Catalog {
        Catalog::new(vec![
            ServiceRecord::new("Amazon SQS", "sqs.svg", &["Amazon SQS", "Amazon SNS"]),
            ServiceRecord::new("Amazon SNS", "sns.svg", &["Amazon SQS", "Amazon SNS"]),
        ])
    }

    fn phase(wiring: &Wiring) -> GamePhase {
        wiring.controller.borrow().session().phase
    }

    #[test]
    fn test_rejects_short_shuffle_setting() {
        let (_, command_observer) = Channel::<GameCommand>::new();
        let (event_emitter, _) = Channel::<GameSessionEvent>::new();
        let settings = Settings {
            shuffle_steps: 10,
            ..Settings::default()
        };
        let result = GameController::new(
            command_observer,
            event_emitter,
            &settings,
            Box::new(ManualClock::new()),
            Box::new(StdRng::seed_from_u64(5)),
            Box::new(StaticCatalog(Rc::new(two_services()))),
        );
        assert!(matches!(result, Err(GameError::ShuffleTooShort { .. })));
    }

    #[test]
    fn test_give_up_and_answer_through_commands() {
        let wiring = wire(two_services());

        wiring.commands.emit(GameCommand::StartGame);
        assert_eq!(phase(&wiring), GamePhase::Puzzling);

        wiring.clock.advance(Duration::from_secs(75));
        assert_eq!(wiring.controller.borrow().elapsed(), Duration::from_secs(75));
        wiring.commands.emit(GameCommand::GiveUp);
        assert_eq!(phase(&wiring), GamePhase::Quizzing);
        assert_eq!(wiring.controller.borrow().session().grid, TileGrid::identity());

        // the quiz screen shows up later; the frozen time must not move
        wiring.clock.advance(Duration::from_secs(10));
        assert_eq!(wiring.controller.borrow().elapsed(), Duration::from_secs(75));

        let name = wiring
            .controller
            .borrow()
            .session()
            .selected_service
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap();
        wiring.commands.emit(GameCommand::SubmitAnswer(name.clone()));
        assert_eq!(phase(&wiring), GamePhase::Result);

        let stats = wiring.controller.borrow().session().stats().unwrap();
        assert_eq!(stats.elapsed_seconds(), 75);
        assert!(stats.gave_up);
        assert_eq!(stats.answered_correctly, Some(true));
        assert_eq!(stats.service_name, name);
    }

    #[test]
    fn test_play_again_picks_the_other_service() {
        let wiring = wire(two_services());
        let mut names = Vec::new();

        for _ in 0..4 {
            wiring.commands.emit(GameCommand::StartGame);
            let name = wiring
                .controller
                .borrow()
                .session()
                .selected_service
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap();
            names.push(name);
            wiring.commands.emit(GameCommand::GiveUp);
            wiring.commands.emit(GameCommand::SubmitAnswer(String::new()));
        }

        for pair in names.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_stale_commands_are_ignored() {
        let wiring = wire(two_services());

        wiring.commands.emit(GameCommand::MoveTile(5));
        wiring.commands.emit(GameCommand::GiveUp);
        wiring.commands.emit(GameCommand::SubmitAnswer("Amazon SQS".to_string()));
        wiring.commands.emit(GameCommand::Shuffle);

        assert_eq!(phase(&wiring), GamePhase::Idle);
        assert!(wiring.events.borrow().is_empty());
    }

    #[test]
    fn test_empty_catalog_keeps_idle() {
        let wiring = wire(Catalog::new(vec![]));
        wiring.commands.emit(GameCommand::StartGame);
        assert_eq!(phase(&wiring), GamePhase::Idle);
    }

    #[test]
    fn test_reset_and_destroy() {
        let wiring = wire(two_services());
        wiring.commands.emit(GameCommand::StartGame);
        wiring.commands.emit(GameCommand::ResetToStart);
        assert_eq!(phase(&wiring), GamePhase::Idle);

        wiring.controller.borrow_mut().destroy();
        wiring.commands.emit(GameCommand::StartGame);
        assert_eq!(phase(&wiring), GamePhase::Idle);
    }
}
