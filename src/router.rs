use axum::{
    Router,
    http::{Method, header},
    middleware,
    routing::{delete, get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::QuizConfig;
use crate::db::DbActorHandle;
use crate::handlers::trivia;
use crate::middleware::{log_request, reject_bare_options};
use crate::service::TriviaService;

#[derive(Clone)]
pub struct TriviaState {
    pub service: TriviaService,
}

impl TriviaState {
    pub fn new(db: DbActorHandle, quiz: QuizConfig) -> Self {
        Self {
            service: TriviaService::new(db, quiz),
        }
    }
}

pub fn trivia_router(state: TriviaState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    Router::new()
        .route("/", get(trivia::index))
        .route("/categories", get(trivia::list_categories))
        .route(
            "/categories/{id}/questions",
            get(trivia::questions_by_category),
        )
        .route(
            "/questions",
            get(trivia::list_questions).post(trivia::create_question),
        )
        .route("/questions/{id}", delete(trivia::delete_question))
        .route("/search", post(trivia::search_questions))
        .route("/quizzes", post(trivia::next_quiz_question))
        .fallback(trivia::not_found)
        .method_not_allowed_fallback(trivia::method_not_allowed)
        .layer(cors)
        .layer(middleware::from_fn(reject_bare_options))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
