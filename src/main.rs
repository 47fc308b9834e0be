use log::{error, info};
use std::cell::RefCell;
use std::error::Error;
use std::io::{self, BufRead};
use std::rc::Rc;
use std::thread;

use slidequiz::destroyable::Destroyable;
use slidequiz::events::{Channel, EventHandler};
use slidequiz::game::{seeded_random, GameController, JsonCatalogProvider, Settings, SystemClock};
use slidequiz::model::{GameCommand, GamePhase, GameSessionEvent};
use slidequiz::ui::{InputOutcome, InputTranslator, TerminalRenderer};

fn init_logging() {
    env_logger::init();
}

fn run() -> Result<(), Box<dyn Error>> {
    let settings = Settings::load();
    let debug_mode = Settings::is_debug_mode();
    if debug_mode {
        info!(target: "settings", "Debug mode on");
    }

    let (game_command_emitter, game_command_observer) = Channel::<GameCommand>::new();
    let (game_session_event_emitter, game_session_event_observer) =
        Channel::<GameSessionEvent>::new();

    let renderer = Rc::new(RefCell::new(TerminalRenderer::new(
        io::stdout(),
        &settings,
        debug_mode,
    )));
    let renderer_handler = renderer.clone();
    let renderer_subscription = game_session_event_observer
        .subscribe(move |event| renderer_handler.borrow_mut().handle_event(event));

    let controller = GameController::new(
        game_command_observer,
        game_session_event_emitter,
        &settings,
        Box::new(SystemClock),
        Box::new(seeded_random(Settings::seed_from_env())),
        Box::new(JsonCatalogProvider::new(settings.catalog_path.clone())),
    )?;
    let translator = InputTranslator::new(game_command_emitter);

    renderer.borrow_mut().draw_start_screen()?;
    let mut lines = io::stdin().lock().lines();
    loop {
        let phase = controller.borrow().session().phase;
        if phase == GamePhase::Puzzling {
            let elapsed = controller.borrow().elapsed();
            renderer.borrow_mut().draw_status(elapsed)?;
        }
        renderer.borrow_mut().prompt("> ")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let quiz_options = renderer.borrow().quiz_options().to_vec();

        match translator.handle_line(phase, &line, &quiz_options) {
            InputOutcome::Sent => (),
            InputOutcome::ConfirmGiveUp => {
                renderer.borrow_mut().prompt("Give up and see the picture? (y/n) ")?;
                if let Some(answer) = lines.next() {
                    translator.handle_confirmation(&answer?);
                }
            }
            InputOutcome::ShowHelp => renderer.borrow_mut().draw_help(phase)?,
            InputOutcome::Quit => break,
            InputOutcome::Unrecognized => {
                renderer.borrow_mut().prompt("Not understood, h shows the keys.\n")?
            }
        }

        let pending_delay = renderer.borrow_mut().take_pending_delay();
        if let Some(delay) = pending_delay {
            thread::sleep(delay);
            renderer.borrow_mut().show_deferred()?;
        }
    }

    controller.borrow_mut().destroy();
    renderer_subscription.unsubscribe();
    Ok(())
}

fn main() {
    init_logging();

    if let Err(err) = run() {
        error!("slidequiz stopped: {}", err);
        eprintln!("slidequiz: {}", err);
        std::process::exit(1);
    }
}
