use chrono::Utc;
use serde::Deserialize;
use warp::http::{StatusCode, Uri};
use warp::reply::{self, Reply, Response};

use crate::error::{self, HttpError};
use crate::polls::{ChoiceId, QuestionId};
use super::context::IndexContext;
use super::{published_context, run_store, templates, SharedStore};

pub const NO_CHOICE_SELECTED: &str = "You didn't select a choice.";

#[derive(Debug, Default, Deserialize)]
pub struct VoteForm {
    #[serde(default)]
    pub choice: Option<String>,
}

pub async fn index(store: SharedStore) -> Response {
    let now = Utc::now();
    let questions = match run_store(&store, move |s| s.visible_questions(now)).await {
        Err(err) => { return error::db_get(err, "questions", None).into_response(); },
        Ok(q) => q,
    };

    let context = IndexContext::new(&questions, now);
    reply::html(templates::render_index(&context)).into_response()
}

pub async fn detail(question_id: QuestionId, store: SharedStore) -> Response {
    match published_context(&store, question_id, Utc::now()).await {
        Err(err) => err.into_response(),
        Ok(context) => reply::html(templates::render_detail(&context)).into_response(),
    }
}

pub async fn results(question_id: QuestionId, store: SharedStore) -> Response {
    match published_context(&store, question_id, Utc::now()).await {
        Err(err) => err.into_response(),
        Ok(context) => reply::html(templates::render_results(&context)).into_response(),
    }
}

pub async fn vote(question_id: QuestionId, form: VoteForm, store: SharedStore) -> Response {
    let mut context = match published_context(&store, question_id, Utc::now()).await {
        Err(err) => { return err.into_response(); },
        Ok(c) => c,
    };

    // anything that is not a number can't name a choice
    let choice_id = form.choice
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i32>().ok())
        .map(ChoiceId);

    let voted = match choice_id {
        None => None,
        Some(choice_id) => match run_store(&store, move |s| s.vote(&question_id, choice_id)).await {
            Err(err) => { return error::db_write(err, "vote").into_response(); },
            Ok(v) => v,
        },
    };

    let choice = match voted {
        None => {
            tracing::warn!(%question_id, choice = ?form.choice, "vote without a valid choice");
            context.error_message = Some(String::from(NO_CHOICE_SELECTED));
            return reply::html(templates::render_detail(&context)).into_response();
        },
        Some(c) => c,
    };
    tracing::info!(%question_id, choice_id = %choice.id, votes = choice.votes, "vote recorded");

    match format!("/polls/{question_id}/results").parse::<Uri>() {
        Ok(location) => warp::redirect::see_other(location).into_response(),
        Err(err) => HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, format!("bad results location: {err}"))
            .into_response(),
    }
}
