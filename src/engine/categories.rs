use crate::db::models::{Category, Question};
use std::collections::{BTreeSet, HashMap};

/// Distinct category labels referenced by at least one question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryLabels {
    /// Sorted ascending so payloads are stable between calls.
    pub labels: Vec<String>,
    pub total: usize,
}

/// Map each question's category id to its label through the category table.
///
/// Questions pointing at an id with no category row (or at a blank label)
/// contribute nothing; they never fail the whole resolution.
pub fn resolve_labels(questions: &[Question], categories: &[Category]) -> CategoryLabels {
    let by_id: HashMap<i64, &str> = categories
        .iter()
        .map(|c| (c.id, c.kind.as_str()))
        .collect();

    let labels: BTreeSet<&str> = questions
        .iter()
        .filter_map(|q| by_id.get(&q.category).copied())
        .filter(|label| !label.is_empty())
        .collect();

    let labels: Vec<String> = labels.into_iter().map(str::to_string).collect();
    CategoryLabels {
        total: labels.len(),
        labels,
    }
}
