use crate::config::QuizConfig;
use crate::db::DbActorHandle;
use crate::db::models::NewQuestion;
use crate::engine::{Paginator, QuizScope, QuizSelector, resolve_labels, search_questions};
use crate::error::TriviaError;
use crate::types::requests::QuizRequest;
use crate::types::responses::{
    CategoriesResponse, CreatedResponse, DeletedResponse, QuestionListResponse,
    QuestionPageResponse, QuizResponse,
};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Fetches snapshots from the record store and runs them through the engine.
#[derive(Clone)]
pub struct TriviaService {
    db: DbActorHandle,
    paginator: Paginator,
    selector: QuizSelector,
}

impl TriviaService {
    pub fn new(db: DbActorHandle, quiz: QuizConfig) -> Self {
        Self {
            db,
            paginator: Paginator::new(quiz.page_size),
            selector: QuizSelector::new(quiz.retry_budget),
        }
    }

    /// Labels of the categories at least one question uses.
    pub async fn list_categories(&self) -> Result<CategoriesResponse, TriviaError> {
        let (questions, categories) =
            tokio::try_join!(self.db.list_questions(), self.db.list_categories())?;
        let resolved = resolve_labels(&questions, &categories);
        debug!(total = resolved.total, "categories resolved");

        Ok(CategoriesResponse {
            success: true,
            categories: resolved.labels,
            total_categories: resolved.total,
        })
    }

    pub async fn list_questions(&self, page: i64) -> Result<QuestionPageResponse, TriviaError> {
        let (questions, categories) =
            tokio::try_join!(self.db.list_questions(), self.db.list_categories())?;

        let page = self.paginator.page(&questions, page).inspect_err(|e| {
            warn!(error = %e, "question page rejected");
        })?;
        let resolved = resolve_labels(&questions, &categories);
        debug!(page = page.number, last_page = page.last_page, "question page served");

        Ok(QuestionPageResponse {
            success: true,
            questions: page.items.to_vec(),
            total_questions: page.total,
            categories: resolved.labels,
            current_category: None,
        })
    }

    pub async fn search_questions(
        &self,
        term: Option<&str>,
    ) -> Result<QuestionListResponse, TriviaError> {
        let questions = self.db.list_questions().await?;
        let hits = search_questions(questions, term);
        debug!(term = term.unwrap_or(""), hits = hits.len(), "search finished");
        Ok(QuestionListResponse::new(hits))
    }

    /// Questions of one category. An unknown category, or one with no
    /// questions left, is `NotFound`.
    pub async fn questions_by_category(
        &self,
        category_id: i64,
    ) -> Result<QuestionListResponse, TriviaError> {
        if self.db.get_category(category_id).await?.is_none() {
            warn!(category_id, "unknown category requested");
            return Err(TriviaError::NotFound(format!(
                "category {category_id} does not exist"
            )));
        }

        let questions = self.db.questions_by_category(category_id).await?;
        if questions.is_empty() {
            warn!(category_id, "category has no questions");
            return Err(TriviaError::NotFound(format!(
                "category {category_id} has no questions"
            )));
        }
        Ok(QuestionListResponse::new(questions))
    }

    pub async fn next_quiz_question(&self, req: QuizRequest) -> Result<QuizResponse, TriviaError> {
        let previous: HashSet<i64> = req
            .previous_questions
            .ok_or_else(|| TriviaError::BadRequest("missing `previous_questions`".to_string()))?
            .into_iter()
            .collect();
        let category = req
            .quiz_category
            .ok_or_else(|| TriviaError::BadRequest("missing `quiz_category`".to_string()))?;

        let scope = QuizScope::from(category.id.0);
        let questions = match scope {
            QuizScope::All => self.db.list_questions().await?,
            QuizScope::Category(id) => self.db.questions_by_category(id).await?,
        };
        let pool = self.selector.candidate_pool(questions, scope);

        // ThreadRng is !Send; keep it out of any await.
        let picked = {
            let mut rng = rand::thread_rng();
            self.selector.select(&pool, &previous, &mut rng)?.cloned()
        };

        match &picked {
            Some(q) => debug!(id = q.id, ?scope, seen = previous.len(), "quiz question picked"),
            None => info!(?scope, seen = previous.len(), "quiz exhausted for scope"),
        }
        Ok(QuizResponse {
            success: true,
            question: picked,
        })
    }

    pub async fn create_question(&self, new: NewQuestion) -> Result<CreatedResponse, TriviaError> {
        let id = self.db.insert_question(new).await?;
        info!(id, "question created");
        Ok(CreatedResponse {
            success: true,
            created: id,
        })
    }

    pub async fn delete_question(&self, id: i64) -> Result<DeletedResponse, TriviaError> {
        if !self.db.delete_question(id).await? {
            warn!(id, "delete of unknown question");
            return Err(TriviaError::NotFound(format!("question {id} does not exist")));
        }
        info!(id, "question deleted");
        Ok(DeletedResponse {
            success: true,
            deleted: id,
        })
    }
}
