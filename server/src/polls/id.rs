use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Serialize, Deserialize};
use uuid::Uuid;

/// Questions are keyed by a database-generated UUID.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub Uuid);
impl QuestionId {
    pub const fn nil() -> QuestionId {
        QuestionId(Uuid::nil())
    }
    pub fn new() -> QuestionId {
        QuestionId(Uuid::new_v4())
    }
}
impl Display for QuestionId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl FromStr for QuestionId {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(QuestionId)
    }
}


/// Choices are keyed by a serial integer, unique across all questions.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceId(pub i32);
impl Display for ChoiceId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl PartialEq<i32> for ChoiceId {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}
