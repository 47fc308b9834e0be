use chrono::{Local, TimeZone};
use log::{error, trace};
use rand::seq::SliceRandom;
use std::io::{self, Write};
use std::time::Duration;

use crate::events::EventHandler;
use crate::game::Settings;
use crate::model::{
    GamePhase, GameSessionEvent, GameStats, ServiceRecord, TileGrid, EMPTY_TILE, GRID_WIDTH,
};

/// Draws the game as text. Screen switches after a solved puzzle or an
/// answered quiz are held back: the renderer notes how long the player should
/// look at the current screen, and the input loop waits that long before
/// calling [`TerminalRenderer::show_deferred`].
pub struct TerminalRenderer<W: Write> {
    out: W,
    settings: Settings,
    debug_mode: bool,
    service: Option<ServiceRecord>,
    grid: TileGrid,
    move_count: u32,
    quiz_options: Vec<String>,
    gave_up: bool,
    result: Option<GameStats>,
    pending_delay: Option<Duration>,
    deferred_screen: Option<GamePhase>,
}

pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl<W: Write> EventHandler<GameSessionEvent> for TerminalRenderer<W> {
    fn handle_event(&mut self, event: &GameSessionEvent) {
        if let Err(err) = self.render_event(event) {
            error!(target: "ui", "Failed to draw {:?}: {}", event, err);
        }
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, settings: &Settings, debug_mode: bool) -> Self {
        Self {
            out,
            settings: settings.clone(),
            debug_mode,
            service: None,
            grid: TileGrid::identity(),
            move_count: 0,
            quiz_options: Vec::new(),
            gave_up: false,
            result: None,
            pending_delay: None,
            deferred_screen: None,
        }
    }

    fn render_event(&mut self, event: &GameSessionEvent) -> io::Result<()> {
        match event {
            GameSessionEvent::StateChanged(phase) => match phase {
                GamePhase::Idle => {
                    self.deferred_screen = None;
                    self.pending_delay = None;
                    self.draw_start_screen()
                }
                GamePhase::Puzzling => {
                    self.deferred_screen = None;
                    self.gave_up = false;
                    self.result = None;
                    writeln!(self.out, "\nNew puzzle! Slide the tiles back into order.")
                }
                GamePhase::Quizzing | GamePhase::Result => {
                    self.deferred_screen = Some(*phase);
                    Ok(())
                }
            },
            GameSessionEvent::ServiceSelected(service) => {
                self.quiz_options = service.options.clone();
                self.quiz_options.shuffle(&mut rand::rng());
                self.service = Some(service.clone());
                if self.debug_mode {
                    writeln!(self.out, "[debug] service: {} ({})", service.name, service.image)?;
                }
                Ok(())
            }
            GameSessionEvent::GridChanged {
                grid,
                changed_positions,
            } => {
                trace!(target: "ui", "Repainting cells {:?}", changed_positions);
                self.grid = *grid;
                self.draw_board()
            }
            GameSessionEvent::MoveCountChanged(move_count) => {
                self.move_count = *move_count;
                Ok(())
            }
            GameSessionEvent::PuzzleCompleted(stats) => {
                self.pending_delay = Some(self.settings.completion_delay());
                writeln!(
                    self.out,
                    "Puzzle complete! {} moves in {}.",
                    stats.move_count,
                    format_duration(stats.elapsed)
                )
            }
            GameSessionEvent::GaveUp(_) => {
                self.gave_up = true;
                self.pending_delay = Some(self.settings.completion_delay());
                writeln!(self.out, "You gave up. Here is the finished picture.")
            }
            GameSessionEvent::AnswerResult {
                is_correct,
                correct_name,
            } => {
                self.pending_delay = Some(self.settings.answer_delay(*is_correct));
                if *is_correct {
                    writeln!(self.out, "Correct!")
                } else {
                    writeln!(self.out, "Incorrect... the answer is \"{}\".", correct_name)
                }
            }
            GameSessionEvent::ResultReady(stats) => {
                self.result = Some(stats.clone());
                Ok(())
            }
        }
    }

    /// How long to leave the current screen up, if a switch is pending.
    pub fn take_pending_delay(&mut self) -> Option<Duration> {
        self.pending_delay.take()
    }

    pub fn show_deferred(&mut self) -> io::Result<()> {
        match self.deferred_screen.take() {
            Some(GamePhase::Quizzing) => self.draw_quiz(),
            Some(GamePhase::Result) => self.draw_result(),
            _ => Ok(()),
        }
    }

    pub fn quiz_options(&self) -> &[String] {
        &self.quiz_options
    }

    pub fn draw_start_screen(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n=== Slide Quiz ===")?;
        writeln!(self.out, "Solve the sliding puzzle, then name the service it shows.")?;
        writeln!(self.out, "Press Enter to start, h for help, q to quit.")?;
        self.out.flush()
    }

    pub fn draw_board(&mut self) -> io::Result<()> {
        let border = format!("+{}", "---+".repeat(GRID_WIDTH));
        writeln!(self.out, "{}", border)?;
        for row in self.grid.tiles().chunks(GRID_WIDTH) {
            write!(self.out, "|")?;
            for &tile in row {
                if tile == EMPTY_TILE {
                    write!(self.out, "   |")?;
                } else {
                    write!(self.out, " {} |", tile + 1)?;
                }
            }
            writeln!(self.out)?;
            writeln!(self.out, "{}", border)?;
        }
        self.out.flush()
    }

    pub fn draw_status(&mut self, elapsed: Duration) -> io::Result<()> {
        writeln!(
            self.out,
            "Time {}  Moves {}  (1-9 to slide, r to shuffle, g to give up)",
            format_duration(elapsed),
            self.move_count
        )?;
        self.out.flush()
    }

    fn draw_quiz(&mut self) -> io::Result<()> {
        if self.gave_up {
            writeln!(self.out, "\nYou gave up! Which service is this?")?;
        } else {
            writeln!(self.out, "\nWhich service is this?")?;
        }
        if let Some(service) = &self.service {
            writeln!(self.out, "(picture: {})", service.image)?;
        }
        for (i, option) in self.quiz_options.iter().enumerate() {
            writeln!(self.out, "  {}. {}", i + 1, option)?;
        }
        self.out.flush()
    }

    fn draw_result(&mut self) -> io::Result<()> {
        let Some(stats) = &self.result else {
            return Ok(());
        };
        let suffix = if stats.gave_up { " (gave up)" } else { "" };
        writeln!(self.out, "\n=== Result ===")?;
        writeln!(self.out, "Time: {}{}", format_duration(stats.elapsed), suffix)?;
        writeln!(self.out, "Moves: {}{}", stats.move_count, suffix)?;
        if let Some(finished) = Local.timestamp_opt(stats.timestamp, 0).single() {
            writeln!(self.out, "Finished: {}", finished.format("%Y-%m-%d %H:%M:%S"))?;
        }
        writeln!(self.out, "Press Enter to play again, m for the menu, q to quit.")?;
        self.out.flush()
    }

    pub fn draw_help(&mut self, phase: GamePhase) -> io::Result<()> {
        match phase {
            GamePhase::Idle | GamePhase::Result => {
                writeln!(self.out, "Enter: start a game  q: quit")?
            }
            GamePhase::Puzzling => {
                writeln!(self.out, "Board positions are numbered 1-9, left to right, top to bottom.")?;
                writeln!(self.out, "Type the position of a tile next to the gap to slide it.")?;
                writeln!(self.out, "r: shuffle again  g: give up  m: back to menu  q: quit")?
            }
            GamePhase::Quizzing => {
                writeln!(self.out, "Type the number of your answer.  m: menu  q: quit")?
            }
        }
        self.out.flush()
    }

    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()
    }

    #[cfg(test)]
    fn output(&self) -> String
    where
        W: AsRef<[u8]>,
    {
        String::from_utf8_lossy(self.out.as_ref()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn renderer() -> TerminalRenderer<Vec<u8>> {
        TerminalRenderer::new(Vec::new(), &Settings::default(), false)
    }

    fn stats(gave_up: bool) -> GameStats {
        GameStats {
            elapsed: Duration::from_secs(83),
            move_count: 27,
            gave_up,
            answered_correctly: Some(true),
            service_name: "Amazon S3".to_string(),
            timestamp: 1_700_000_000,
            playthrough_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "00:00");
        assert_eq!(format_duration(Duration::from_secs(83)), "01:23");
        assert_eq!(format_duration(Duration::from_secs(3_723)), "01:02:03");
    }

    #[test]
    fn test_board_drawing() {
        let mut renderer = renderer();
        renderer.handle_event(&GameSessionEvent::GridChanged {
            grid: TileGrid::identity().swap(8, 5),
            changed_positions: vec![8, 5],
        });
        let output = renderer.output();
        assert!(output.contains("| 4 | 5 |   |"));
        assert!(output.contains("| 7 | 8 | 6 |"));
    }

    #[test]
    fn test_quiz_waits_for_delay() {
        let mut renderer = renderer();
        let service = ServiceRecord::new("Amazon S3", "s3.svg", &["Amazon S3", "Amazon EBS"]);
        renderer.handle_event(&GameSessionEvent::ServiceSelected(service));
        renderer.handle_event(&GameSessionEvent::PuzzleCompleted(stats(false)));
        renderer.handle_event(&GameSessionEvent::StateChanged(GamePhase::Quizzing));

        assert!(!renderer.output().contains("Which service"));
        assert_eq!(renderer.take_pending_delay(), Some(Duration::from_secs(1)));
        assert_eq!(renderer.take_pending_delay(), None);

        renderer.show_deferred().unwrap();
        let output = renderer.output();
        assert!(output.contains("Which service is this?"));
        assert!(output.contains("Amazon EBS"));
        let mut options = renderer.quiz_options().to_vec();
        options.sort();
        assert_eq!(options, vec!["Amazon EBS", "Amazon S3"]);
    }

    #[test]
    fn test_wrong_answer_waits_longer() {
        let mut renderer = renderer();
        renderer.handle_event(&GameSessionEvent::AnswerResult {
            is_correct: false,
            correct_name: "Amazon S3".to_string(),
        });
        assert!(renderer.output().contains("the answer is \"Amazon S3\""));
        assert_eq!(renderer.take_pending_delay(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_result_marks_give_up() {
        let mut renderer = renderer();
        renderer.handle_event(&GameSessionEvent::StateChanged(GamePhase::Result));
        renderer.handle_event(&GameSessionEvent::ResultReady(stats(true)));
        renderer.show_deferred().unwrap();

        let output = renderer.output();
        assert!(output.contains("Time: 01:23 (gave up)"));
        assert!(output.contains("Moves: 27 (gave up)"));
    }

    #[test]
    fn test_returning_to_menu_drops_pending_screen() {
        let mut renderer = renderer();
        renderer.handle_event(&GameSessionEvent::GaveUp(stats(true)));
        renderer.handle_event(&GameSessionEvent::StateChanged(GamePhase::Quizzing));
        renderer.handle_event(&GameSessionEvent::StateChanged(GamePhase::Idle));

        assert_eq!(renderer.take_pending_delay(), None);
        renderer.show_deferred().unwrap();
        assert!(!renderer.output().contains("Which service"));
    }
}
