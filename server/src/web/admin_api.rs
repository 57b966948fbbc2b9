use std::convert::TryFrom;

use serde::Serialize;
use warp::http::StatusCode;
use warp::reply::{self, Reply, Response};

use crate::error::{self, HttpError};
use crate::polls::{
    Choice, CreateChoice, CreateQuestion, Question, QuestionId,
    UnvalidatedCreateChoice, UnvalidatedCreateQuestion,
};
use super::{run_store, SharedStore};

#[derive(Serialize)]
pub struct CreatedQuestion {
    pub question: Question,
    pub choices: Vec<Choice>,
}

pub async fn create_question(input: UnvalidatedCreateQuestion, store: SharedStore) -> Response {
    let settings = match CreateQuestion::try_from(input) {
        Err(err) => { return HttpError::from(err).into_response(); },
        Ok(s) => s,
    };

    match run_store(&store, move |s| s.create_question(settings)).await {
        Err(err) => error::db_write(err, "question").into_response(),
        Ok((question, choices)) => {
            tracing::info!(question_id = %question.id, choices = choices.len(), "question created");
            let created = CreatedQuestion { question, choices };
            reply::with_status(reply::json(&created), StatusCode::CREATED).into_response()
        },
    }
}

pub async fn add_choice(
    question_id: QuestionId, input: UnvalidatedCreateChoice, store: SharedStore
) -> Response {
    let choice = match CreateChoice::try_from(input) {
        Err(err) => { return HttpError::from(err).into_response(); },
        Ok(c) => c,
    };

    match run_store(&store, move |s| s.add_choice(&question_id, choice)).await {
        Err(err) => error::db_write(err, "choice").into_response(),
        Ok(None) => error::question_not_found(&question_id).into_response(),
        Ok(Some(choice)) => reply::with_status(reply::json(&choice), StatusCode::CREATED).into_response(),
    }
}

pub async fn delete_question(question_id: QuestionId, store: SharedStore) -> Response {
    match run_store(&store, move |s| s.delete_question(&question_id)).await {
        Err(err) => error::db_write(err, "question").into_response(),
        Ok(false) => error::question_not_found(&question_id).into_response(),
        Ok(true) => {
            tracing::info!(%question_id, "question deleted");
            StatusCode::NO_CONTENT.into_response()
        },
    }
}
