use crate::db::models::NewQuestion;
use serde::Deserialize;

/// `GET /questions?page=N`. Kept as raw text so a bad value never rejects
/// the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// A missing, empty or non-integer page reads as page 1. Integers that
    /// parse are passed through, so `0` and negatives still reach the
    /// paginator's range check.
    pub fn page_or_first(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(1)
    }
}

/// `POST /search`. An absent or null term clears the filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", alias = "search_term", default)]
    pub search_term: Option<String>,
}

/// `POST /quizzes`. Both fields are required; they stay optional here so a
/// missing field surfaces as a BadRequest from the service, not a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizRequest {
    pub previous_questions: Option<Vec<i64>>,
    pub quiz_category: Option<QuizCategory>,
}

/// Clients also send the category's `type` label; only the id is read.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizCategory {
    pub id: CategoryId,
}

/// Category id as sent by clients: either `2` or `"2"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCategoryId")]
pub struct CategoryId(pub i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCategoryId {
    Number(i64),
    Text(String),
}

impl TryFrom<RawCategoryId> for CategoryId {
    type Error = String;

    fn try_from(raw: RawCategoryId) -> Result<Self, Self::Error> {
        match raw {
            RawCategoryId::Number(n) => Ok(CategoryId(n)),
            RawCategoryId::Text(s) => s
                .trim()
                .parse()
                .map(CategoryId)
                .map_err(|_| format!("category id `{s}` is not an integer")),
        }
    }
}

/// `POST /questions` body.
pub type CreateQuestionRequest = NewQuestion;
