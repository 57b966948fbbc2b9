use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::ops::RangeInclusive;
use std::convert::From;

use diesel::r2d2::PoolError;
use diesel::result::Error as DbError;
use thiserror::Error as ThisError;
use warp::http::StatusCode;
use warp::reply::{self, Reply, Response};

use crate::polls::QuestionId;

#[derive(Debug)]
pub struct ValidationError {
    message: String,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error: {}", self.message)
    }
}

impl Error for ValidationError {}

pub fn question_text_invalid_size(limits: RangeInclusive<usize>, len: usize) -> ValidationError {
    ValidationError {
        message: format!("question text must be between {} and {} characters, got {len}", limits.start(), limits.end()),
    }
}

pub fn choice_text_invalid_size(limits: RangeInclusive<usize>, len: usize) -> ValidationError {
    ValidationError {
        message: format!("choice text must be between {} and {} characters, got {len}", limits.start(), limits.end()),
    }
}

pub fn choice_limit_exceeded(limits: RangeInclusive<usize>, count: usize) -> ValidationError {
    ValidationError {
        message: format!("question must have between {} and {} choices, got {count}", limits.start(), limits.end()),
    }
}


#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("query failed: {0}")]
    Query(#[from] DbError),
    #[error("in-memory store lock poisoned")]
    Poisoned,
    #[error("store task failed: {0}")]
    Task(String),
}


#[derive(Debug)]
pub struct HttpError {
    pub code: StatusCode,
    message: String,
    source: Option<StoreError>,
}

impl HttpError {
    pub fn new(code: StatusCode, message: impl Into<String>) -> HttpError {
        HttpError { code, message: message.into(), source: None }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {}", self.message, source),
            None => write!(f, "{}", self.message),
        }
    }
}

impl Error for HttpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn Error + 'static))
    }
}

impl From<ValidationError> for HttpError {
    fn from(value: ValidationError) -> Self {
        HttpError {
            message: value.to_string(),
            code: StatusCode::BAD_REQUEST,
            source: None,
        }
    }
}

impl Reply for HttpError {
    fn into_response(self) -> Response {
        // store failures are logged, not echoed back to the client
        let body = match self.source {
            Some(_) => String::from("Internal Server Error"),
            None => self.message,
        };
        reply::with_status(body, self.code).into_response()
    }
}

pub fn question_not_found(id: &QuestionId) -> HttpError {
    tracing::debug!(question_id = %id, "question not found or not yet published");
    HttpError::new(StatusCode::NOT_FOUND, "No Question matches the given query.")
}

pub fn db_get(source: StoreError, subject: &str, object: Option<&str>) -> HttpError {
    let message = match object {
        Some(object) => format!("Failed to retrieve {object} of {subject}"),
        None => format!("Failed to retrieve {subject}"),
    };
    tracing::error!(error = %source, "{message}");
    HttpError { message, code: StatusCode::INTERNAL_SERVER_ERROR, source: Some(source) }
}

pub fn db_write(source: StoreError, subject: &str) -> HttpError {
    let message = format!("Failed to write {subject}");
    tracing::error!(error = %source, "{message}");
    HttpError { message, code: StatusCode::INTERNAL_SERVER_ERROR, source: Some(source) }
}
