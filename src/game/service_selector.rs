use log::debug;

use super::collaborators::RandomSource;
use crate::model::CatalogError;

/// After this many rejected draws the selector stops sampling and picks among
/// the remaining indices directly. With a fair source this is never reached.
const MAX_REDRAWS: usize = 64;

/// Picks a catalog index uniformly, avoiding `previous` when there is any
/// other choice. Redraws until the index differs from `previous`; the
/// expected number of draws is [`expected_draws`].
pub fn pick(
    catalog_len: usize,
    previous: Option<usize>,
    rng: &mut dyn RandomSource,
) -> Result<usize, CatalogError> {
    if catalog_len == 0 {
        return Err(CatalogError::Empty);
    }
    if catalog_len == 1 {
        return Ok(0);
    }

    for _ in 0..MAX_REDRAWS {
        let index = rng.uniform(catalog_len);
        if Some(index) != previous {
            return Ok(index);
        }
    }

    // only reachable when `previous` is a valid index, so skip over it
    debug!(target: "game_session", "Service selection gave up redrawing; choosing directly");
    let index = rng.uniform(catalog_len - 1);
    Ok(match previous {
        Some(previous) if index >= previous => index + 1,
        _ => index,
    })
}

/// Mean draws per pick when one of `catalog_len` indices is excluded.
pub fn expected_draws(catalog_len: usize) -> f64 {
    if catalog_len <= 1 {
        return 1.0;
    }
    catalog_len as f64 / (catalog_len - 1) as f64
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::game::collaborators::testing::ScriptedRandom;

    #[test]
    fn test_empty_catalog() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(pick(0, None, &mut rng), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_single_entry_always_zero() {
        let mut rng = StdRng::seed_from_u64(0);
        for previous in [None, Some(0)] {
            for _ in 0..20 {
                assert_eq!(pick(1, previous, &mut rng).unwrap(), 0);
            }
        }
    }

    #[test]
    fn test_never_repeats_previous_and_is_even() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut counts = [0usize; 5];

        for _ in 0..1000 {
            let index = pick(5, Some(2), &mut rng).unwrap();
            counts[index] += 1;
        }

        assert_eq!(counts[2], 0);
        for (index, &count) in counts.iter().enumerate().filter(|(i, _)| *i != 2) {
            assert!((175..=325).contains(&count), "index {} drawn {} times", index, count);
        }
    }

    #[test]
    fn test_redraws_past_previous() {
        let mut rng = ScriptedRandom::new(&[1, 1, 1, 3]);
        assert_eq!(pick(4, Some(1), &mut rng).unwrap(), 3);
    }

    #[test]
    fn test_stubborn_source_still_terminates() {
        // every sampled draw lands on the excluded index
        let draws = vec![2; MAX_REDRAWS + 1];
        let mut rng = ScriptedRandom::new(&draws);
        let index = pick(4, Some(2), &mut rng).unwrap();
        assert_eq!(index, 3);
    }

    #[test]
    fn test_expected_draws() {
        assert_eq!(expected_draws(1), 1.0);
        assert_eq!(expected_draws(2), 2.0);
        assert!((expected_draws(5) - 1.25).abs() < f64::EPSILON);
    }
}
