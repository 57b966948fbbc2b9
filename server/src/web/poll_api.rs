use chrono::Utc;
use warp::reply::{self, Reply, Response};

use crate::error;
use crate::polls::QuestionId;
use super::context::IndexContext;
use super::{published_context, run_store, SharedStore};

pub async fn index(store: SharedStore) -> Response {
    let now = Utc::now();
    match run_store(&store, move |s| s.visible_questions(now)).await {
        Err(err) => error::db_get(err, "questions", None).into_response(),
        Ok(questions) => reply::json(&IndexContext::new(&questions, now)).into_response(),
    }
}

pub async fn detail(question_id: QuestionId, store: SharedStore) -> Response {
    match published_context(&store, question_id, Utc::now()).await {
        Err(err) => err.into_response(),
        Ok(context) => reply::json(&context).into_response(),
    }
}

// same payload as detail; kept separate so the routes mirror the html pages
pub async fn results(question_id: QuestionId, store: SharedStore) -> Response {
    detail(question_id, store).await
}
