mod choice;
mod id;
mod question;
pub mod visibility;

pub use choice::{Choice, CreateChoice, UnvalidatedCreateChoice};
pub use id::{ChoiceId, QuestionId};
pub use question::{CreateQuestion, Question, UnvalidatedCreateQuestion};
