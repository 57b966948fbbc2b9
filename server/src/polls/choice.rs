use std::convert::TryFrom;
use std::ops::RangeInclusive;

use serde::{Serialize, Deserialize};

use super::id::{ChoiceId, QuestionId};
use crate::error;

pub const CHOICE_TEXT_LIMITS: RangeInclusive<usize> = 1..=200;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub question_id: QuestionId,
    pub choice_text: String,
    pub votes: u32,
}

impl Choice {
    /// Label used on the results page, e.g. "3 votes" or "1 vote".
    pub fn votes_label(&self) -> String {
        match self.votes {
            1 => String::from("1 vote"),
            n => format!("{n} votes"),
        }
    }
}


#[derive(Debug)]
pub struct CreateChoice {
    pub choice_text: String,
}

#[derive(Debug, Deserialize)]
pub struct UnvalidatedCreateChoice {
    pub choice_text: String,
}

impl TryFrom<UnvalidatedCreateChoice> for CreateChoice {
    type Error = error::ValidationError;
    fn try_from(UnvalidatedCreateChoice { choice_text }: UnvalidatedCreateChoice) -> Result<Self, Self::Error> {
        let choice_text = choice_text.trim().to_string();
        let len = choice_text.chars().count();
        if !CHOICE_TEXT_LIMITS.contains(&len) {
            return Err(error::choice_text_invalid_size(CHOICE_TEXT_LIMITS, len));
        }
        Ok(CreateChoice { choice_text })
    }
}
