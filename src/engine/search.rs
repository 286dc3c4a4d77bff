use crate::db::models::Question;

/// Keep the questions whose text contains `term`, ignoring case.
///
/// A missing or empty term is a reset and returns everything unfiltered.
/// Matching is plain substring, not token based.
pub fn search_questions(questions: Vec<Question>, term: Option<&str>) -> Vec<Question> {
    let needle = match term {
        Some(t) if !t.is_empty() => t.to_lowercase(),
        _ => return questions,
    };

    questions
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .collect()
}
