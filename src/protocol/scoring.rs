use std::sync::Mutex;
use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

pub const PLACEHOLDER_SCORE_MIN: u8 = 85;
pub const PLACEHOLDER_SCORE_MAX: u8 = 100;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionOutcome {
    pub duration_seconds: u64,
    pub completion_score: u8,
}

/// Turns a finished session into the numbers that get persisted.
///
/// Swap this out once real gesture detection produces a signal to score.
pub trait SessionScorer: Send + Sync {
    fn evaluate(&self, elapsed: Duration, gestures_completed: usize) -> SessionOutcome;
}

/// Whole-second duration and a uniform random score in `[85, 100]`.
pub struct PlaceholderScorer {
    rng: Mutex<StdRng>,
}

impl PlaceholderScorer {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for PlaceholderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionScorer for PlaceholderScorer {
    fn evaluate(&self, elapsed: Duration, _gestures_completed: usize) -> SessionOutcome {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        SessionOutcome {
            duration_seconds: elapsed.as_secs(),
            completion_score: rng.gen_range(PLACEHOLDER_SCORE_MIN..=PLACEHOLDER_SCORE_MAX),
        }
    }
}
