use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::shuffler::{DEFAULT_SHUFFLE_STEPS, MIN_SHUFFLE_STEPS};

pub const SETTINGS_PATH_VAR: &str = "SLIDEQUIZ_SETTINGS";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub(crate) version: u32,

    #[serde(default = "default_shuffle_steps")]
    pub shuffle_steps: usize,

    /// Milliseconds the solved board stays up before the quiz.
    #[serde(default = "default_completion_delay")]
    pub completion_delay: u64,

    #[serde(default = "default_correct_answer_delay")]
    pub correct_answer_delay: u64,

    #[serde(default = "default_incorrect_answer_delay")]
    pub incorrect_answer_delay: u64,

    /// Service catalog JSON. `null` plays with the built-in fallback only.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: Option<PathBuf>,
}

// Helper functions for default values
fn default_version() -> u32 {
    1
}
fn default_shuffle_steps() -> usize {
    DEFAULT_SHUFFLE_STEPS
}
fn default_completion_delay() -> u64 {
    1000
}
fn default_correct_answer_delay() -> u64 {
    2000
}
fn default_incorrect_answer_delay() -> u64 {
    3000
}
fn default_catalog_path() -> Option<PathBuf> {
    Some(PathBuf::from("data/services.json"))
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            shuffle_steps: default_shuffle_steps(),
            completion_delay: default_completion_delay(),
            correct_answer_delay: default_correct_answer_delay(),
            incorrect_answer_delay: default_incorrect_answer_delay(),
            catalog_path: default_catalog_path(),
        }
    }
}

impl Settings {
    /// Reads the file named by `SLIDEQUIZ_SETTINGS`, or returns defaults.
    /// Settings are never written back.
    pub fn load() -> Self {
        match std::env::var(SETTINGS_PATH_VAR) {
            Ok(path) => Self::load_from(Path::new(&path)),
            Err(_) => Settings::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(target: "settings", "Cannot read {}: {}; using defaults", path.display(), err);
                return Settings::default();
            }
        };
        match serde_json::from_str::<Settings>(&contents) {
            Ok(mut settings) => {
                settings.migrate();
                debug!(target: "settings", "Loaded settings {:?}", settings);
                settings
            }
            Err(err) => {
                warn!(target: "settings", "Cannot parse {}: {}; using defaults", path.display(), err);
                Settings::default()
            }
        }
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
        if self.shuffle_steps < MIN_SHUFFLE_STEPS {
            warn!(
                target: "settings",
                "shuffle_steps {} is below {}; raising it",
                self.shuffle_steps,
                MIN_SHUFFLE_STEPS
            );
            self.shuffle_steps = MIN_SHUFFLE_STEPS;
        }
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay)
    }

    pub fn answer_delay(&self, is_correct: bool) -> Duration {
        if is_correct {
            Duration::from_millis(self.correct_answer_delay)
        } else {
            Duration::from_millis(self.incorrect_answer_delay)
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse::<u64>().ok())
    }
}
