//! Which questions the public index lists.

use chrono::{DateTime, Utc};

use super::question::Question;

/// A question may be listed once it is published and has something to vote on.
pub fn is_listable(question: &Question, choice_count: usize, now: DateTime<Utc>) -> bool {
    question.is_published(now) && choice_count > 0
}

/// Filters `(question, choice count)` pairs down to the listable questions,
/// most recently published first. Questions sharing a publication date are
/// ordered by id.
pub fn select_visible<I>(candidates: I, now: DateTime<Utc>) -> Vec<Question>
where
    I: IntoIterator<Item = (Question, usize)>,
{
    let mut visible: Vec<Question> = candidates.into_iter()
        .filter(|(question, choice_count)| is_listable(question, *choice_count, now))
        .map(|(question, _)| question)
        .collect();
    visible.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(a.id.cmp(&b.id)));
    visible
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn question(text: &str, days: i64, now: DateTime<Utc>) -> Question {
        Question::new(String::from(text), now + Duration::days(days))
    }

    #[test]
    fn nothing_to_show() {
        assert!(select_visible(Vec::new(), Utc::now()).is_empty());
    }

    #[test]
    fn skips_future_and_choiceless_questions() {
        let now = Utc::now();
        let past = question("Past question", -30, now);
        let visible = select_visible(vec![
            (past.clone(), 1),
            (question("Future question", 5, now), 3),
            (question("Past question without choices", -30, now), 0),
        ], now);
        assert_eq!(visible, vec![past]);
    }

    #[test]
    fn most_recent_first() {
        let now = Utc::now();
        let older = question("Past question 2", -35, now);
        let newer = question("Past question 1", -30, now);
        let visible = select_visible(vec![(older.clone(), 1), (newer.clone(), 1)], now);
        assert_eq!(visible, vec![newer, older]);
    }

    #[test]
    fn question_published_exactly_now_is_listed() {
        let now = Utc::now();
        let current = Question::new(String::from("Just now"), now);
        assert_eq!(select_visible(vec![(current.clone(), 2)], now), vec![current]);
    }
}
