use axum::{Json, extract::State};

use crate::middleware::{JsonObject, QueryParams, ResourcePath};
use crate::types::requests::{CreateQuestionRequest, PageQuery, QuizRequest, SearchRequest};
use crate::types::responses::{
    CategoriesResponse, CreatedResponse, DeletedResponse, IndexResponse, QuestionListResponse,
    QuestionPageResponse, QuizResponse,
};
use crate::{TriviaError, router::TriviaState};

/// GET /
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        success: true,
        message: "Welcome to the Trivia API!".to_string(),
    })
}

/// GET /categories
pub async fn list_categories(
    State(state): State<TriviaState>,
) -> Result<Json<CategoriesResponse>, TriviaError> {
    Ok(Json(state.service.list_categories().await?))
}

/// GET /questions?page=N
pub async fn list_questions(
    State(state): State<TriviaState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<Json<QuestionPageResponse>, TriviaError> {
    Ok(Json(
        state.service.list_questions(query.page_or_first()).await?,
    ))
}

/// POST /questions
pub async fn create_question(
    State(state): State<TriviaState>,
    JsonObject(body): JsonObject<CreateQuestionRequest>,
) -> Result<Json<CreatedResponse>, TriviaError> {
    Ok(Json(state.service.create_question(body).await?))
}

/// DELETE /questions/{id}
pub async fn delete_question(
    State(state): State<TriviaState>,
    ResourcePath(id): ResourcePath<i64>,
) -> Result<Json<DeletedResponse>, TriviaError> {
    Ok(Json(state.service.delete_question(id).await?))
}

/// POST /search
pub async fn search_questions(
    State(state): State<TriviaState>,
    JsonObject(body): JsonObject<SearchRequest>,
) -> Result<Json<QuestionListResponse>, TriviaError> {
    Ok(Json(
        state
            .service
            .search_questions(body.search_term.as_deref())
            .await?,
    ))
}

/// GET /categories/{id}/questions
pub async fn questions_by_category(
    State(state): State<TriviaState>,
    ResourcePath(category_id): ResourcePath<i64>,
) -> Result<Json<QuestionListResponse>, TriviaError> {
    Ok(Json(state.service.questions_by_category(category_id).await?))
}

/// POST /quizzes
pub async fn next_quiz_question(
    State(state): State<TriviaState>,
    JsonObject(body): JsonObject<QuizRequest>,
) -> Result<Json<QuizResponse>, TriviaError> {
    Ok(Json(state.service.next_quiz_question(body).await?))
}

pub async fn not_found() -> TriviaError {
    TriviaError::NotFound("no such route".to_string())
}

pub async fn method_not_allowed() -> TriviaError {
    TriviaError::MethodNotAllowed
}
