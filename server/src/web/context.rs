use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::polls::{Choice, Question, QuestionId};

/// A question as the pages and the json api present it.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
    pub was_published_recently: bool,
}

impl QuestionView {
    pub fn new(question: &Question, now: DateTime<Utc>) -> QuestionView {
        QuestionView {
            id: question.id,
            question_text: question.question_text.clone(),
            pub_date: question.pub_date,
            was_published_recently: question.was_published_recently(now),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndexContext {
    pub latest_question_list: Vec<QuestionView>,
}

impl IndexContext {
    pub fn new(questions: &[Question], now: DateTime<Utc>) -> IndexContext {
        IndexContext {
            latest_question_list: questions.iter().map(|q| QuestionView::new(q, now)).collect(),
        }
    }
}

/// Backs both the detail (voting form) and results views.
#[derive(Debug, Serialize)]
pub struct QuestionContext {
    pub question: QuestionView,
    pub choices: Vec<Choice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl QuestionContext {
    pub fn new(question: &Question, choices: Vec<Choice>, now: DateTime<Utc>) -> QuestionContext {
        QuestionContext {
            question: QuestionView::new(question, now),
            choices,
            error_message: None,
        }
    }
}
