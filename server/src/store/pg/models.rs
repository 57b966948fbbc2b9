use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::polls;
use super::schema;

#[derive(Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Question {
    pub id: Uuid,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl From<Question> for polls::Question {
    fn from(Question { id, question_text, pub_date }: Question) -> Self {
        polls::Question {
            id: polls::QuestionId(id),
            question_text,
            pub_date,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = schema::questions)]
pub struct NewQuestion<'a> {
    pub question_text: &'a str,
    pub pub_date: DateTime<Utc>,
}

#[derive(Associations, Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::choices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(belongs_to(Question))]
pub struct Choice {
    pub id: i32,
    pub question_id: Uuid,
    pub choice_text: String,
    pub votes: i32,
}

impl From<Choice> for polls::Choice {
    fn from(Choice { id, question_id, choice_text, votes }: Choice) -> Self {
        polls::Choice {
            id: polls::ChoiceId(id),
            question_id: polls::QuestionId(question_id),
            choice_text,
            // the column carries a `votes >= 0` check
            votes: u32::try_from(votes).unwrap_or_default(),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = schema::choices)]
pub struct NewChoice<'a> {
    pub question_id: Uuid,
    pub choice_text: &'a str,
}
