pub mod input_translator;
pub mod terminal_renderer;

pub use input_translator::{InputOutcome, InputTranslator};
pub use terminal_renderer::{format_duration, TerminalRenderer};
