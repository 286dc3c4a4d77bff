use crate::db::models::{Category, NewQuestion, Question};
use crate::db::sqlite::TriviaStorage;
use crate::error::TriviaError;

use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use tracing::{debug, info};

type Reply<T> = RpcReplyPort<Result<T, TriviaError>>;

/// Messages handled by the database actor. Every variant is an RPC.
#[derive(Debug)]
pub enum DbActorMessage {
    ListQuestions(Reply<Vec<Question>>),
    ListCategories(Reply<Vec<Category>>),
    QuestionsByCategory(i64, Reply<Vec<Question>>),
    GetCategory(i64, Reply<Option<Category>>),
    InsertQuestion(NewQuestion, Reply<i64>),
    DeleteQuestion(i64, Reply<bool>),
}

/// Handle for interacting with the database actor.
#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

fn rpc_failed(op: &str, e: impl std::fmt::Display) -> TriviaError {
    TriviaError::Actor(format!("{op} RPC failed: {e}"))
}

impl DbActorHandle {
    /// Snapshot of every question, ascending by id.
    pub async fn list_questions(&self) -> Result<Vec<Question>, TriviaError> {
        ractor::call!(self.actor, DbActorMessage::ListQuestions)
            .map_err(|e| rpc_failed("ListQuestions", e))?
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, TriviaError> {
        ractor::call!(self.actor, DbActorMessage::ListCategories)
            .map_err(|e| rpc_failed("ListCategories", e))?
    }

    pub async fn questions_by_category(&self, category: i64) -> Result<Vec<Question>, TriviaError> {
        ractor::call!(self.actor, DbActorMessage::QuestionsByCategory, category)
            .map_err(|e| rpc_failed("QuestionsByCategory", e))?
    }

    pub async fn get_category(&self, id: i64) -> Result<Option<Category>, TriviaError> {
        ractor::call!(self.actor, DbActorMessage::GetCategory, id)
            .map_err(|e| rpc_failed("GetCategory", e))?
    }

    pub async fn insert_question(&self, new: NewQuestion) -> Result<i64, TriviaError> {
        ractor::call!(self.actor, DbActorMessage::InsertQuestion, new)
            .map_err(|e| rpc_failed("InsertQuestion", e))?
    }

    /// Returns false when no question had that id.
    pub async fn delete_question(&self, id: i64) -> Result<bool, TriviaError> {
        ractor::call!(self.actor, DbActorMessage::DeleteQuestion, id)
            .map_err(|e| rpc_failed("DeleteQuestion", e))?
    }
}

/// ractor-based database actor; the storage itself is its state.
struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = TriviaStorage;
    type Arguments = TriviaStorage;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        storage: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        debug!("DbActor started");
        Ok(storage)
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        storage: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::ListQuestions(rp) => {
                let _ = rp.send(storage.list_questions().await);
            }
            DbActorMessage::ListCategories(rp) => {
                let _ = rp.send(storage.list_categories().await);
            }
            DbActorMessage::QuestionsByCategory(category, rp) => {
                let _ = rp.send(storage.questions_by_category(category).await);
            }
            DbActorMessage::GetCategory(id, rp) => {
                let _ = rp.send(storage.get_category(id).await);
            }
            DbActorMessage::InsertQuestion(new, rp) => {
                let _ = rp.send(storage.insert_question(new).await);
            }
            DbActorMessage::DeleteQuestion(id, rp) => {
                let _ = rp.send(storage.delete_question(id).await);
            }
        }
        Ok(())
    }
}

/// Connect to `database_url`, prepare the schema and spawn the database actor.
pub async fn spawn(database_url: &str, seed_categories: bool) -> Result<DbActorHandle, TriviaError> {
    let storage = TriviaStorage::connect(database_url).await?;
    storage.init_schema().await?;
    if seed_categories {
        storage.seed_categories().await?;
    }

    // Unnamed: several stores may live in one process (tests).
    let (actor, _jh) = Actor::spawn(None, DbActor, storage)
        .await
        .map_err(|e| TriviaError::Actor(format!("failed to spawn DbActor: {e}")))?;
    info!(database_url, seed_categories, "DbActor ready");
    Ok(DbActorHandle { actor })
}
