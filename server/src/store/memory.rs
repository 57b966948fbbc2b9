use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::polls::visibility::select_visible;
use crate::polls::{Choice, ChoiceId, CreateChoice, CreateQuestion, Question, QuestionId};
use super::PollStore;

#[derive(Default)]
struct Tables {
    questions: Vec<Question>,
    choices: Vec<Choice>,
    last_choice_id: i32,
}

impl Tables {
    fn insert_choice(&mut self, question_id: QuestionId, CreateChoice { choice_text }: CreateChoice) -> Choice {
        self.last_choice_id += 1;
        let choice = Choice {
            id: ChoiceId(self.last_choice_id),
            question_id,
            choice_text,
            votes: 0,
        };
        self.choices.push(choice.clone());
        choice
    }

    fn choices_of(&self, question_id: &QuestionId) -> Vec<Choice> {
        let mut choices: Vec<Choice> = self.choices.iter()
            .filter(|c| c.question_id == *question_id)
            .cloned()
            .collect();
        choices.sort_by_key(|c| c.id);
        choices
    }
}

/// Process-local store for tests and for running without a database.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl PollStore for MemoryStore {
    fn create_question(&self, settings: CreateQuestion) -> Result<(Question, Vec<Choice>), StoreError> {
        let CreateQuestion { question_text, pub_date, choices } = settings;
        let mut tables = self.lock()?;

        let question = Question::new(question_text, pub_date);
        tables.questions.push(question.clone());
        let choices: Vec<Choice> = choices.into_iter()
            .map(|choice| tables.insert_choice(question.id, choice))
            .collect();

        Ok((question, choices))
    }

    fn add_choice(&self, question_id: &QuestionId, choice: CreateChoice) -> Result<Option<Choice>, StoreError> {
        let mut tables = self.lock()?;
        if !tables.questions.iter().any(|q| q.id == *question_id) {
            return Ok(None);
        }
        Ok(Some(tables.insert_choice(*question_id, choice)))
    }

    fn delete_question(&self, question_id: &QuestionId) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        let before = tables.questions.len();
        tables.questions.retain(|q| q.id != *question_id);
        if tables.questions.len() == before {
            return Ok(false);
        }
        tables.choices.retain(|c| c.question_id != *question_id);
        Ok(true)
    }

    fn visible_questions(&self, now: DateTime<Utc>) -> Result<Vec<Question>, StoreError> {
        let tables = self.lock()?;
        let candidates = tables.questions.iter().map(|q| {
            let choice_count = tables.choices.iter().filter(|c| c.question_id == q.id).count();
            (q.clone(), choice_count)
        });
        Ok(select_visible(candidates, now))
    }

    fn published_question(
        &self, question_id: &QuestionId, now: DateTime<Utc>
    ) -> Result<Option<(Question, Vec<Choice>)>, StoreError> {
        let tables = self.lock()?;
        let question = tables.questions.iter()
            .find(|q| q.id == *question_id && q.is_published(now))
            .cloned();
        Ok(question.map(|q| {
            let choices = tables.choices_of(&q.id);
            (q, choices)
        }))
    }

    fn vote(&self, question_id: &QuestionId, choice_id: ChoiceId) -> Result<Option<Choice>, StoreError> {
        let mut tables = self.lock()?;
        let choice = tables.choices.iter_mut()
            .find(|c| c.id == choice_id && c.question_id == *question_id);
        Ok(choice.map(|c| {
            c.votes = c.votes.saturating_add(1);
            c.clone()
        }))
    }
}
