pub mod collaborators;
pub mod game_controller;
pub mod game_session;
pub mod move_validator;
pub mod service_selector;
pub mod settings;
pub mod shuffler;

pub use collaborators::{
    seeded_random, CatalogProvider, Clock, JsonCatalogProvider, RandomSource, StaticCatalog,
    SystemClock,
};
pub use game_controller::GameController;
pub use game_session::{GameSession, MoveOutcome};
pub use move_validator::{adjacent_positions, is_adjacent_to_empty};
pub use settings::Settings;
pub use shuffler::{random_walk, Shuffler, DEFAULT_SHUFFLE_STEPS, MIN_SHUFFLE_STEPS};
