use std::cell::Cell;
use std::time::Duration;

use instant::Instant;

use crate::errors::MatchError;

// How often (in steps) the wall clock is consulted
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Limits on one match call. Unlimited by default.
///
/// A step is one recursive search call. Running out of budget aborts the
/// search with [`MatchError::BudgetExhausted`], which is neither "no match"
/// nor a precondition error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchBudget {
    pub max_steps: Option<u64>,
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    #[must_use]
    pub fn unlimited() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Start counting against this budget.
    pub(crate) fn start(self) -> StepCounter {
        StepCounter { budget: self, start: Instant::now(), steps: Cell::new(0) }
    }
}

/// Budget state for a single search.
///
/// Uses a `Cell` so the (otherwise immutable) search context can count steps
/// through a shared reference.
#[derive(Debug)]
pub(crate) struct StepCounter {
    budget: SearchBudget,
    start: Instant,
    steps: Cell<u64>,
}

impl StepCounter {
    /// Count one step, failing once either limit is exceeded.
    pub(crate) fn tick(&self) -> Result<(), MatchError> {
        let steps = self.steps.get() + 1;
        self.steps.set(steps);

        let over_steps = self.budget.max_steps.is_some_and(|max| steps > max);
        let over_time = steps % CLOCK_CHECK_INTERVAL == 0
            && self.budget.time_limit.is_some_and(|limit| self.elapsed() >= limit);

        if over_steps || over_time {
            return Err(MatchError::BudgetExhausted { steps, elapsed: self.elapsed() });
        }
        Ok(())
    }

    pub(crate) fn steps(&self) -> u64 {
        self.steps.get()
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
