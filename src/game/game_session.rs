use log::{debug, info, trace};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use super::collaborators::RandomSource;
use super::move_validator::is_adjacent_to_empty;
use super::service_selector;
use super::shuffler::Shuffler;
use crate::events::EventEmitter;
use crate::model::{
    Catalog, CatalogError, GamePhase, GameSessionEvent, GameStats, ServiceRecord, TileGrid,
    TimerState, TILE_COUNT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Wrong phase or a tile that isn't next to the blank. Nothing changed.
    Ignored,
    Moved,
    /// The move solved the puzzle; the session is now quizzing.
    Completed,
}

/// One player's game, from the start screen through puzzle, quiz and result.
///
/// Every field can be read from outside but only changed through the methods
/// below. Calls that don't fit the current phase (a tile clicked after the
/// puzzle was solved, a second answer) are ignored rather than reported, since
/// they come from ordinary UI races.
#[readonly::make]
pub struct GameSession {
    pub phase: GamePhase,
    pub grid: TileGrid,
    pub move_count: u32,
    pub gave_up: bool,
    pub answered_correctly: Option<bool>,
    pub selected_service: Option<ServiceRecord>,
    /// Remembered across games so the next pick can avoid it.
    pub previous_service_index: Option<usize>,
    /// Stopped once, when the puzzle is solved or abandoned.
    pub timer_state: Option<TimerState>,
    pub playthrough_id: Uuid,
    shuffler: Shuffler,
    event_emitter: EventEmitter<GameSessionEvent>,
}

impl GameSession {
    pub fn new(event_emitter: EventEmitter<GameSessionEvent>, shuffler: Shuffler) -> Self {
        Self {
            phase: GamePhase::Idle,
            grid: TileGrid::identity(),
            move_count: 0,
            gave_up: false,
            answered_correctly: None,
            selected_service: None,
            previous_service_index: None,
            timer_state: None,
            playthrough_id: Uuid::new_v4(),
            shuffler,
            event_emitter,
        }
    }

    /// Begins a new puzzle from the start screen or the result screen ("play
    /// again"). In any other phase this does nothing and returns `Ok(false)`.
    pub fn start_game(
        &mut self,
        catalog: &Catalog,
        rng: &mut dyn RandomSource,
        now: SystemTime,
    ) -> Result<bool, CatalogError> {
        if !self.phase.can_start() {
            trace!(target: "game_session", "Ignoring start in {:?}", self.phase);
            return Ok(false);
        }

        let index = service_selector::pick(catalog.len(), self.previous_service_index, rng)?;
        let service = catalog.get(index).cloned().ok_or(CatalogError::Empty)?;
        info!(
            target: "game_session",
            "Selected service: {} (index {}/{})",
            service.name,
            index,
            catalog.len() - 1
        );

        self.previous_service_index = Some(index);
        self.selected_service = Some(service.clone());
        self.grid = self.shuffler.shuffle(&TileGrid::identity(), rng);
        self.move_count = 0;
        self.gave_up = false;
        self.answered_correctly = None;
        self.timer_state = Some(TimerState::started(now));
        self.playthrough_id = Uuid::new_v4();

        self.event_emitter
            .emit(GameSessionEvent::ServiceSelected(service));
        self.set_phase(GamePhase::Puzzling);
        self.emit_full_grid();
        self.event_emitter
            .emit(GameSessionEvent::MoveCountChanged(self.move_count));
        Ok(true)
    }

    /// Slides the tile at `position` into the blank if it is next to it.
    pub fn attempt_move(&mut self, position: usize, now: SystemTime) -> MoveOutcome {
        if self.phase != GamePhase::Puzzling {
            trace!(target: "game_session", "Ignoring move in {:?}", self.phase);
            return MoveOutcome::Ignored;
        }
        if !is_adjacent_to_empty(&self.grid, position) {
            trace!(
                target: "game_session",
                "Position {} is not next to the blank at {}",
                position,
                self.grid.empty_position()
            );
            return MoveOutcome::Ignored;
        }

        let empty_position = self.grid.empty_position();
        self.grid = self.grid.swap(position, empty_position);
        self.move_count += 1;

        self.event_emitter.emit(GameSessionEvent::GridChanged {
            grid: self.grid,
            changed_positions: vec![position, empty_position],
        });
        self.event_emitter
            .emit(GameSessionEvent::MoveCountChanged(self.move_count));

        if !self.grid.is_complete() {
            return MoveOutcome::Moved;
        }

        self.freeze_clock(now);
        info!(
            target: "game_session",
            "Puzzle completed in {} moves, {:?}",
            self.move_count,
            self.final_elapsed()
        );
        if let Some(stats) = self.stats() {
            self.event_emitter
                .emit(GameSessionEvent::PuzzleCompleted(stats));
        }
        self.set_phase(GamePhase::Quizzing);
        MoveOutcome::Completed
    }

    /// Re-scrambles the board mid-puzzle. Moves and time keep counting.
    pub fn reshuffle(&mut self, rng: &mut dyn RandomSource) -> bool {
        if self.phase != GamePhase::Puzzling {
            return false;
        }
        self.grid = self.shuffler.shuffle(&self.grid, rng);
        self.emit_full_grid();
        true
    }

    /// Solves the board for the player and moves on to the quiz. The caller
    /// is responsible for having asked the player to confirm.
    pub fn give_up(&mut self, now: SystemTime) -> bool {
        if self.phase != GamePhase::Puzzling {
            trace!(target: "game_session", "Ignoring give up in {:?}", self.phase);
            return false;
        }

        self.grid = TileGrid::identity();
        self.gave_up = true;
        self.freeze_clock(now);
        info!(
            target: "game_session",
            "Gave up after {} moves, {:?}",
            self.move_count,
            self.final_elapsed()
        );

        self.emit_full_grid();
        if let Some(stats) = self.stats() {
            self.event_emitter.emit(GameSessionEvent::GaveUp(stats));
        }
        self.set_phase(GamePhase::Quizzing);
        true
    }

    /// Checks the answer against the selected service and moves to the result
    /// phase. Returns `None` when not quizzing.
    pub fn submit_answer(&mut self, answer: &str) -> Option<bool> {
        if self.phase != GamePhase::Quizzing {
            trace!(target: "game_session", "Ignoring answer in {:?}", self.phase);
            return None;
        }
        let service = self.selected_service.as_ref()?;
        let is_correct = service.is_correct(answer);
        let correct_name = service.name.clone();
        debug!(
            target: "game_session",
            "Answer {:?} for {:?}: {}",
            answer,
            correct_name,
            if is_correct { "correct" } else { "incorrect" }
        );

        self.answered_correctly = Some(is_correct);
        self.event_emitter.emit(GameSessionEvent::AnswerResult {
            is_correct,
            correct_name,
        });
        self.set_phase(GamePhase::Result);
        if let Some(stats) = self.stats() {
            self.event_emitter.emit(GameSessionEvent::ResultReady(stats));
        }
        Some(is_correct)
    }

    /// Abandons whatever is in progress and returns to the start screen.
    pub fn reset_to_start(&mut self) {
        if self.phase == GamePhase::Idle {
            return;
        }
        self.gave_up = false;
        self.answered_correctly = None;
        self.selected_service = None;
        self.timer_state = None;
        self.set_phase(GamePhase::Idle);
    }

    /// Time on the puzzle clock as of `now`; frozen once the puzzle ends.
    pub fn elapsed_at(&self, now: SystemTime) -> Duration {
        self.timer_state
            .as_ref()
            .map(|timer| timer.elapsed_at(now))
            .unwrap_or_default()
    }

    pub fn final_elapsed(&self) -> Option<Duration> {
        self.timer_state.as_ref()?.final_elapsed()
    }

    /// Available from the moment the puzzle is solved or abandoned.
    pub fn stats(&self) -> Option<GameStats> {
        let timer = self.timer_state.as_ref()?;
        let elapsed = timer.final_elapsed()?;
        let ended = timer.ended_timestamp?;
        let service = self.selected_service.as_ref()?;
        Some(GameStats {
            elapsed,
            move_count: self.move_count,
            gave_up: self.gave_up,
            answered_correctly: self.answered_correctly,
            service_name: service.name.clone(),
            timestamp: ended
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as i64)
                .unwrap_or_default(),
            playthrough_id: self.playthrough_id,
        })
    }

    fn freeze_clock(&mut self, now: SystemTime) {
        self.timer_state = self.timer_state.as_ref().map(|timer| timer.ended(now));
    }

    fn set_phase(&mut self, phase: GamePhase) {
        debug!(target: "game_session", "Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.event_emitter.emit(GameSessionEvent::StateChanged(phase));
    }

    fn emit_full_grid(&self) {
        self.event_emitter.emit(GameSessionEvent::GridChanged {
            grid: self.grid,
            changed_positions: (0..TILE_COUNT).collect(),
        });
    }
}
