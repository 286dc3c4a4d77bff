use crate::db::models::Question;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct IndexResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<String>,
    pub total_categories: usize,
}

/// One page of `GET /questions`, with labels computed over every question.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPageResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: Vec<String>,
    pub current_category: Option<String>,
}

/// Search results and per-category listings; `total_questions` counts
/// the returned list, never the unfiltered store.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<String>,
}

impl QuestionListResponse {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            success: true,
            total_questions: questions.len(),
            questions,
            current_category: None,
        }
    }
}

/// `question: null` marks the end of the quiz for the chosen scope.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i64,
}
