//! Persistence for questions and choices.
//!
//! The trait is synchronous because diesel's connection API is; the web layer
//! drives it from tokio's blocking pool.

mod memory;
mod pg;

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::polls::{Choice, ChoiceId, CreateChoice, CreateQuestion, Question, QuestionId};

pub use memory::MemoryStore;
pub use pg::PgStore;

pub trait PollStore: Send + Sync {
    /// Inserts a question and its initial choices together.
    fn create_question(&self, settings: CreateQuestion) -> Result<(Question, Vec<Choice>), StoreError>;

    /// Attaches a choice to an existing question, regardless of its
    /// publication date. `None` if the question does not exist.
    fn add_choice(&self, question_id: &QuestionId, choice: CreateChoice) -> Result<Option<Choice>, StoreError>;

    /// Deletes a question and its choices. Returns whether anything was deleted.
    fn delete_question(&self, question_id: &QuestionId) -> Result<bool, StoreError>;

    /// Questions published at or before `now` with at least one choice,
    /// most recent first.
    fn visible_questions(&self, now: DateTime<Utc>) -> Result<Vec<Question>, StoreError>;

    /// The question and its choices, ordered by choice id, provided it is
    /// published at `now`.
    fn published_question(
        &self, question_id: &QuestionId, now: DateTime<Utc>
    ) -> Result<Option<(Question, Vec<Choice>)>, StoreError>;

    /// Adds one vote to the choice. `None` if the choice does not belong to
    /// the question.
    fn vote(&self, question_id: &QuestionId, choice_id: ChoiceId) -> Result<Option<Choice>, StoreError>;
}
