//! What the game needs from the outside world: a clock, a source of
//! randomness and a service catalog. Tests swap in deterministic versions.

use std::path::PathBuf;
use std::rc::Rc;
use std::time::SystemTime;

use log::{error, info, warn};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, RngCore, SeedableRng};

use crate::model::Catalog;

pub trait Clock {
    fn now(&self) -> SystemTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

pub trait RandomSource {
    /// Uniform integer in `[0, n)`. Callers never pass `n == 0`.
    fn uniform(&mut self, n: usize) -> usize;
}

impl RandomSource for StdRng {
    fn uniform(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }
}

impl RandomSource for ThreadRng {
    fn uniform(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }
}

/// A seeded generator; without a seed one is drawn and logged so a run can be replayed.
pub fn seeded_random(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
    info!(target: "game_session", "Random seed: {}", seed);
    StdRng::seed_from_u64(seed)
}

pub trait CatalogProvider {
    /// Read once per game start; the returned catalog is not mutated afterwards.
    fn catalog(&mut self) -> Rc<Catalog>;
}

/// Serves a catalog fixed at construction.
pub struct StaticCatalog(pub Rc<Catalog>);

impl CatalogProvider for StaticCatalog {
    fn catalog(&mut self) -> Rc<Catalog> {
        Rc::clone(&self.0)
    }
}

/// Loads the catalog from a JSON file on first use and keeps it. Any failure
/// to read, parse or validate it is logged and the built-in fallback is used.
pub struct JsonCatalogProvider {
    path: Option<PathBuf>,
    cached: Option<Rc<Catalog>>,
}

impl JsonCatalogProvider {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path, cached: None }
    }

    fn load(&self) -> Catalog {
        let Some(path) = &self.path else {
            warn!(target: "catalog", "No catalog path configured; using fallback catalog");
            return Catalog::fallback();
        };
        match Catalog::load(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                error!(target: "catalog", "Failed to load {}: {}", path.display(), err);
                warn!(target: "catalog", "Using fallback catalog");
                Catalog::fallback()
            }
        }
    }
}

impl CatalogProvider for JsonCatalogProvider {
    fn catalog(&mut self) -> Rc<Catalog> {
        if let Some(catalog) = &self.cached {
            return Rc::clone(catalog);
        }
        let catalog = Rc::new(self.load());
        self.cached = Some(Rc::clone(&catalog));
        catalog
    }
}
