mod admin_api;
mod context;
mod poll_api;
mod poll_pages;
mod templates;

use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use warp::filters::body::BodyDeserializeError;
use warp::filters::BoxedFilter;
use warp::http::StatusCode;
use warp::reject::{
    InvalidHeader, InvalidQuery, LengthRequired, MethodNotAllowed, MissingHeader, PayloadTooLarge,
    UnsupportedMediaType,
};
use warp::reply::{self, Reply, Response};
use warp::{Filter, Rejection};

use crate::config::{Config, ConfigError};
use crate::error::{self, HttpError, StoreError};
use crate::polls::QuestionId;
use crate::store::PollStore;

pub use context::{IndexContext, QuestionContext, QuestionView};

pub type SharedStore = Arc<dyn PollStore>;

const FORM_LIMIT: u64 = 16 * 1024;

/// Runs a store operation on the blocking pool.
async fn run_store<T, F>(store: &SharedStore, op: F) -> Result<T, StoreError>
where
    T: Send + 'static,
    F: FnOnce(&dyn PollStore) -> Result<T, StoreError> + Send + 'static,
{
    let store = Arc::clone(store);
    match tokio::task::spawn_blocking(move || op(store.as_ref())).await {
        Ok(result) => result,
        Err(err) => Err(StoreError::Task(err.to_string())),
    }
}

/// Loads the context shared by the detail and results views. Questions that
/// are not yet published are reported exactly like missing ones.
async fn published_context(
    store: &SharedStore, question_id: QuestionId, now: DateTime<Utc>
) -> Result<QuestionContext, HttpError> {
    let found = run_store(store, move |s| s.published_question(&question_id, now)).await;
    match found {
        Err(err) => Err(error::db_get(err, "question", None)),
        Ok(None) => Err(error::question_not_found(&question_id)),
        Ok(Some((question, choices))) => Ok(QuestionContext::new(&question, choices, now)),
    }
}

pub fn routes(
    store: SharedStore, static_dir: Option<PathBuf>
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let with_store = warp::any().map(move || Arc::clone(&store));

    // html pages
    let index = warp::path!("polls")
        .and(warp::get())
        .and(with_store.clone())
        .then(poll_pages::index);
    let detail = warp::path!("polls" / QuestionId)
        .and(warp::get())
        .and(with_store.clone())
        .then(poll_pages::detail);
    let results = warp::path!("polls" / QuestionId / "results")
        .and(warp::get())
        .and(with_store.clone())
        .then(poll_pages::results);
    let vote = warp::path!("polls" / QuestionId / "vote")
        .and(warp::post())
        .and(warp::body::content_length_limit(FORM_LIMIT))
        .and(warp::body::form())
        .and(with_store.clone())
        .then(poll_pages::vote);

    // json api
    let api_index = warp::path!("api" / "questions")
        .and(warp::get())
        .and(with_store.clone())
        .then(poll_api::index);
    let api_detail = warp::path!("api" / "questions" / QuestionId)
        .and(warp::get())
        .and(with_store.clone())
        .then(poll_api::detail);
    let api_results = warp::path!("api" / "questions" / QuestionId / "results")
        .and(warp::get())
        .and(with_store.clone())
        .then(poll_api::results);

    // administration
    let create_question = warp::path!("api" / "admin" / "questions")
        .and(warp::post())
        .and(warp::body::content_length_limit(FORM_LIMIT))
        .and(warp::body::json())
        .and(with_store.clone())
        .then(admin_api::create_question);
    let add_choice = warp::path!("api" / "admin" / "questions" / QuestionId / "choices")
        .and(warp::post())
        .and(warp::body::content_length_limit(FORM_LIMIT))
        .and(warp::body::json())
        .and(with_store.clone())
        .then(admin_api::add_choice);
    let delete_question = warp::path!("api" / "admin" / "questions" / QuestionId)
        .and(warp::delete())
        .and(with_store)
        .then(admin_api::delete_question);

    index
        .or(detail)
        .or(results)
        .or(vote)
        .or(api_index)
        .or(api_detail)
        .or(api_results)
        .or(create_question)
        .or(add_choice)
        .or(delete_question)
        .or(static_files(static_dir))
        .recover(handle_rejection)
        .with(warp::trace::request())
}

fn static_files(static_dir: Option<PathBuf>) -> BoxedFilter<(Response,)> {
    match static_dir {
        Some(dir) => warp::path("static")
            .and(warp::fs::dir(dir))
            .map(|file: warp::fs::File| file.into_response())
            .boxed(),
        None => warp::any()
            .and_then(|| async { Err::<Response, Rejection>(warp::reject::not_found()) })
            .boxed(),
    }
}

async fn handle_rejection(r: Rejection) -> Result<Response, Infallible> {
    let (message, code) = if r.is_not_found() {
        (String::from("Route not found"), StatusCode::NOT_FOUND)
    } else if let Some(err) = r.find::<BodyDeserializeError>() {
        (err.to_string(), StatusCode::UNPROCESSABLE_ENTITY)
    } else if r.find::<PayloadTooLarge>().is_some() {
        (String::from("Payload too large"), StatusCode::PAYLOAD_TOO_LARGE)
    } else if r.find::<LengthRequired>().is_some() {
        (String::from("Length required"), StatusCode::LENGTH_REQUIRED)
    } else if r.find::<UnsupportedMediaType>().is_some() {
        (String::from("Unsupported media type"), StatusCode::UNSUPPORTED_MEDIA_TYPE)
    } else if let Some(err) = r.find::<InvalidHeader>() {
        (err.to_string(), StatusCode::BAD_REQUEST)
    } else if let Some(err) = r.find::<MissingHeader>() {
        (err.to_string(), StatusCode::BAD_REQUEST)
    } else if let Some(err) = r.find::<InvalidQuery>() {
        (err.to_string(), StatusCode::BAD_REQUEST)
    } else if r.find::<MethodNotAllowed>().is_some() {
        (String::from("Method not allowed"), StatusCode::METHOD_NOT_ALLOWED)
    } else {
        tracing::error!(rejection = ?r, "unhandled rejection");
        (String::from("Internal Server Error"), StatusCode::INTERNAL_SERVER_ERROR)
    };
    Ok(reply::with_status(message, code).into_response())
}

pub async fn serve(config: &Config, store: SharedStore) -> Result<(), ConfigError> {
    let routes = routes(store, config.static_dir.clone());
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    };

    let (addr, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown(config.bind_addr(), shutdown)
        .map_err(|e| ConfigError::Invalid(format!("cannot bind {}: {e}", config.bind_addr())))?;
    tracing::info!(%addr, "polls server listening");

    server.await;
    tracing::info!("polls server stopped");
    Ok(())
}
