//! Uniform random destination choice.

use parking_lot::Mutex;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::place::Place;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Picks one destination among the candidates found around a start position.
///
/// Seeded from OS entropy in production; pass a seed for reproducible picks.
pub struct Recommender {
    rng: Mutex<ChaCha8Rng>,
}

impl Recommender {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Uniform choice; `NotFound(Place)` when there is nothing to choose from.
    pub fn pick(&self, candidates: &[Place]) -> Result<Place, DomainError> {
        let mut rng = self.rng.lock();
        candidates.choose(&mut *rng).cloned().ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Place,
                "no place available within the recommendation radius",
            )
        })
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender").finish_non_exhaustive()
    }
}
