use crate::db::models::Question;
use crate::error::TriviaError;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use tracing::trace;

/// Category id clients send for the "All" quiz selection.
pub const ALL_CATEGORIES: i64 = 0;

/// Which questions a quiz session draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

impl From<i64> for QuizScope {
    fn from(id: i64) -> Self {
        if id == ALL_CATEGORIES {
            QuizScope::All
        } else {
            QuizScope::Category(id)
        }
    }
}

impl QuizScope {
    pub fn admits(&self, question: &Question) -> bool {
        match self {
            QuizScope::All => true,
            QuizScope::Category(id) => question.category == *id,
        }
    }
}

/// Picks the next quiz question without repeating one the session has seen.
#[derive(Debug, Clone, Copy)]
pub struct QuizSelector {
    retry_budget: usize,
}

impl QuizSelector {
    pub fn new(retry_budget: usize) -> Self {
        Self {
            retry_budget: retry_budget.max(1),
        }
    }

    /// Narrow `questions` down to the candidate pool for `scope`.
    pub fn candidate_pool(&self, questions: Vec<Question>, scope: QuizScope) -> Vec<Question> {
        questions.into_iter().filter(|q| scope.admits(q)).collect()
    }

    /// Choose one unseen question from `pool`.
    ///
    /// Draws uniformly at random up to `retry_budget` times. When every draw
    /// lands on a seen id, the draw is repeated once over the unseen remainder,
    /// so an unseen candidate is never missed and the call always terminates.
    ///
    /// - empty pool: `NotFound`
    /// - every candidate already seen: `Ok(None)`, the session is complete
    pub fn select<'a, R>(
        &self,
        pool: &'a [Question],
        previous: &HashSet<i64>,
        rng: &mut R,
    ) -> Result<Option<&'a Question>, TriviaError>
    where
        R: Rng + ?Sized,
    {
        if pool.is_empty() {
            return Err(TriviaError::NotFound(
                "no questions in the requested quiz category".to_string(),
            ));
        }

        for attempt in 1..=self.retry_budget {
            let Some(drawn) = pool.choose(rng) else {
                break;
            };
            if !previous.contains(&drawn.id) {
                return Ok(Some(drawn));
            }
            trace!(attempt, id = drawn.id, "drew an already seen question");
        }

        let unseen: Vec<&Question> = pool.iter().filter(|q| !previous.contains(&q.id)).collect();
        Ok(unseen.choose(rng).copied())
    }
}
