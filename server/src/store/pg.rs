mod models;
mod schema;

use chrono::{DateTime, Utc};
use diesel::dsl::exists;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::result::Error as DbError;

use crate::error::StoreError;
use crate::polls::{self, ChoiceId, CreateChoice, CreateQuestion, QuestionId};
use super::PollStore;

type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Diesel-backed store over an r2d2 connection pool.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn connect(database_url: &str, max_connections: u32) -> Result<PgStore, StoreError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_connections)
            .build(manager)?;
        tracing::info!(max_connections, "postgres pool ready");
        Ok(PgStore { pool })
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, StoreError> {
        Ok(self.pool.get()?)
    }
}

fn load_choices(
    conn: &mut PgConnection, question: &models::Question
) -> Result<Vec<polls::Choice>, DbError> {
    let choices = models::Choice::belonging_to(question)
        .order(schema::choices::id)
        .select(models::Choice::as_select())
        .load(conn)?;
    Ok(choices.into_iter().map(Into::into).collect())
}

/// Published questions with at least one choice, newest first.
fn visible_questions_query(now: DateTime<Utc>) -> schema::questions::BoxedQuery<'static, Pg> {
    use schema::{choices, questions};

    questions::table
        .filter(questions::pub_date.le(now))
        .filter(questions::id.eq_any(
            choices::table.select(choices::question_id)
        ))
        .order((questions::pub_date.desc(), questions::id))
        .into_boxed()
}

fn published_question_query(
    question_id: &QuestionId, now: DateTime<Utc>
) -> schema::questions::BoxedQuery<'static, Pg> {
    use schema::questions;

    questions::table
        .filter(questions::id.eq(question_id.0))
        .filter(questions::pub_date.le(now))
        .into_boxed()
}

impl PollStore for PgStore {
    fn create_question(
        &self, settings: CreateQuestion
    ) -> Result<(polls::Question, Vec<polls::Choice>), StoreError> {
        let conn = &mut self.conn()?;
        let CreateQuestion { question_text, pub_date, choices } = settings;

        let created = conn.transaction::<_, DbError, _>(|conn| {
            // id is generated by the database
            let question: models::Question = diesel::insert_into(schema::questions::table)
                .values(models::NewQuestion { question_text: &question_text, pub_date })
                .returning(models::Question::as_returning())
                .get_result(conn)?;

            let new_choices: Vec<models::NewChoice> = choices.iter()
                .map(|c| models::NewChoice { question_id: question.id, choice_text: &c.choice_text })
                .collect();
            if new_choices.is_empty() {
                return Ok((question, vec![]));
            }
            let choices: Vec<models::Choice> = diesel::insert_into(schema::choices::table)
                .values(&new_choices)
                .returning(models::Choice::as_returning())
                .get_results(conn)?;

            Ok((question, choices))
        })?;

        let (question, mut choices) = created;
        choices.sort_by_key(|c| c.id);
        tracing::debug!(question_id = %question.id, choices = choices.len(), "question created");
        Ok((question.into(), choices.into_iter().map(Into::into).collect()))
    }

    fn add_choice(
        &self, question_id: &QuestionId, choice: CreateChoice
    ) -> Result<Option<polls::Choice>, StoreError> {
        let conn = &mut self.conn()?;

        let added = conn.transaction::<_, DbError, _>(|conn| {
            let question_exists: bool = diesel::select(exists(
                schema::questions::table.find(question_id.0)
            )).get_result(conn)?;
            if !question_exists {
                return Ok(None);
            }

            let choice: models::Choice = diesel::insert_into(schema::choices::table)
                .values(models::NewChoice { question_id: question_id.0, choice_text: &choice.choice_text })
                .returning(models::Choice::as_returning())
                .get_result(conn)?;
            Ok(Some(choice))
        })?;

        Ok(added.map(Into::into))
    }

    fn delete_question(&self, question_id: &QuestionId) -> Result<bool, StoreError> {
        let conn = &mut self.conn()?;
        // choices go with it via ON DELETE CASCADE
        let deleted = diesel::delete(schema::questions::table.find(question_id.0))
            .execute(conn)?;
        Ok(deleted > 0)
    }

    fn visible_questions(&self, now: DateTime<Utc>) -> Result<Vec<polls::Question>, StoreError> {
        let conn = &mut self.conn()?;
        let results: Vec<models::Question> = visible_questions_query(now).load(conn)?;

        tracing::debug!(count = results.len(), "loaded visible questions");
        Ok(results.into_iter().map(Into::into).collect())
    }

    fn published_question(
        &self, question_id: &QuestionId, now: DateTime<Utc>
    ) -> Result<Option<(polls::Question, Vec<polls::Choice>)>, StoreError> {
        let conn = &mut self.conn()?;
        let question: Option<models::Question> = published_question_query(question_id, now)
            .first(conn)
            .optional()?;

        let question = match question {
            None => return Ok(None),
            Some(q) => q,
        };
        let choices = load_choices(conn, &question)?;

        Ok(Some((question.into(), choices)))
    }

    fn vote(
        &self, question_id: &QuestionId, choice_id: ChoiceId
    ) -> Result<Option<polls::Choice>, StoreError> {
        use schema::choices;

        let conn = &mut self.conn()?;
        let updated: Option<models::Choice> = diesel::update(
            choices::table
                .filter(choices::id.eq(choice_id.0))
                .filter(choices::question_id.eq(question_id.0))
        )
            .set(choices::votes.eq(choices::votes + 1))
            .returning(models::Choice::as_returning())
            .get_result(conn)
            .optional()?;

        Ok(updated.map(Into::into))
    }
}
