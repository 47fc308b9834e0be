mod catalog;
mod error;
mod game_command;
mod game_phase;
mod game_session_event;
mod game_stats;
mod service_record;
mod tile_grid;
mod timer_state;

pub use catalog::Catalog;
pub use error::{CatalogError, GameError};
pub use game_command::GameCommand;
pub use game_phase::GamePhase;
pub use game_session_event::GameSessionEvent;
pub use game_stats::GameStats;
pub use service_record::ServiceRecord;
pub use tile_grid::{TileGrid, EMPTY_TILE, GRID_WIDTH, TILE_COUNT};
pub use timer_state::TimerState;
