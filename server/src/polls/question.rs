use std::convert::TryFrom;
use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Utc};
use serde::{Serialize, Deserialize};

use super::choice::{CreateChoice, UnvalidatedCreateChoice};
use super::id::QuestionId;
use crate::error;

pub const QUESTION_TEXT_LIMITS: RangeInclusive<usize> = 1..=200;
pub const CHOICE_COUNT_LIMITS: RangeInclusive<usize> = 0..=32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl Question {
    pub fn new(question_text: String, pub_date: DateTime<Utc>) -> Question {
        Question {
            id: QuestionId::new(),
            question_text,
            pub_date,
        }
    }

    /// True once the publication date has been reached.
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }

    /// True iff the question was published within the last day, i.e.
    /// `now - 1 day < pub_date <= now`.
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) < self.pub_date && self.is_published(now)
    }
}


/// Validated input for creating a question along with its initial choices.
#[derive(Debug)]
pub struct CreateQuestion {
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
    pub choices: Vec<CreateChoice>,
}

#[derive(Debug, Deserialize)]
pub struct UnvalidatedCreateQuestion {
    pub question_text: String,
    #[serde(default)]
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub choices: Vec<String>,
}

impl TryFrom<UnvalidatedCreateQuestion> for CreateQuestion {
    type Error = error::ValidationError;
    fn try_from(value: UnvalidatedCreateQuestion) -> Result<Self, Self::Error> {
        let UnvalidatedCreateQuestion { question_text, pub_date, choices } = value;

        let question_text = question_text.trim().to_string();
        let text_len = question_text.chars().count();
        if !QUESTION_TEXT_LIMITS.contains(&text_len) {
            return Err(error::question_text_invalid_size(QUESTION_TEXT_LIMITS, text_len));
        }
        if !CHOICE_COUNT_LIMITS.contains(&choices.len()) {
            return Err(error::choice_limit_exceeded(CHOICE_COUNT_LIMITS, choices.len()));
        }

        let choices = choices.into_iter()
            .map(|choice_text| CreateChoice::try_from(UnvalidatedCreateChoice { choice_text }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CreateQuestion {
            question_text,
            // questions created without a date go live immediately
            pub_date: pub_date.unwrap_or_else(Utc::now),
            choices,
        })
    }
}
