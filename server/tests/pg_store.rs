//! Runs against a live PostgreSQL when `DATABASE_URL` is set; otherwise every
//! test returns early.

use std::sync::Once;

use chrono::{Duration, Utc};
use diesel::connection::SimpleConnection;
use diesel::{Connection, PgConnection};

use polls::polls::{ChoiceId, CreateChoice, CreateQuestion, Question, QuestionId};
use polls::store::{PgStore, PollStore};

static SCHEMA: Once = Once::new();

fn connect() -> Option<PgStore> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set, skipping postgres store test");
            return None;
        },
    };
    SCHEMA.call_once(|| {
        let mut conn = PgConnection::establish(&url).unwrap();
        conn.batch_execute(include_str!("../migrations/2024-09-01-000000_create_polls/up.sql"))
            .unwrap();
    });
    Some(PgStore::connect(&url, 2).unwrap())
}

fn create(store: &PgStore, text: &str, days: i64, choices: &[&str]) -> (Question, Vec<ChoiceId>) {
    let (question, choices) = store.create_question(CreateQuestion {
        question_text: format!("{text} {}", QuestionId::new()),
        pub_date: Utc::now() + Duration::days(days),
        choices: choices.iter()
            .map(|c| CreateChoice { choice_text: c.to_string() })
            .collect(),
    }).unwrap();
    (question, choices.into_iter().map(|c| c.id).collect())
}

#[test]
fn index_lists_published_questions_with_choices() {
    let Some(store) = connect() else { return; };
    let (older, _) = create(&store, "Past question 1", -35, &["a"]);
    let (newer, _) = create(&store, "Past question 2", -30, &["b"]);
    let (no_choices, _) = create(&store, "Past question without choices", -30, &[]);
    let (future, _) = create(&store, "Future question", 30, &["c"]);

    let ours = [older.id, newer.id, no_choices.id, future.id];
    let listed: Vec<QuestionId> = store.visible_questions(Utc::now()).unwrap()
        .into_iter()
        .map(|q| q.id)
        .filter(|id| ours.contains(id))
        .collect();
    assert_eq!(listed, vec![newer.id, older.id]);

    for id in ours {
        assert!(store.delete_question(&id).unwrap());
    }
}

#[test]
fn detail_hides_future_questions() {
    let Some(store) = connect() else { return; };
    let (future, _) = create(&store, "Future question", 5, &["a"]);
    let (past, _) = create(&store, "Past question", -5, &["x", "y"]);

    assert!(store.published_question(&future.id, Utc::now()).unwrap().is_none());

    let (question, choices) = store.published_question(&past.id, Utc::now()).unwrap().unwrap();
    assert_eq!(question.question_text, past.question_text);
    let texts: Vec<&str> = choices.iter().map(|c| c.choice_text.as_str()).collect();
    assert_eq!(texts, vec!["x", "y"]);

    store.delete_question(&future.id).unwrap();
    store.delete_question(&past.id).unwrap();
}

#[test]
fn vote_increments_only_the_selected_choice() {
    let Some(store) = connect() else { return; };
    let (question, choice_ids) = create(&store, "Vote question", -1, &["yes", "no"]);
    let (other, other_ids) = create(&store, "Other question", -1, &["maybe"]);

    let voted = store.vote(&question.id, choice_ids[0]).unwrap().unwrap();
    assert_eq!(voted.votes, 1);
    let voted = store.vote(&question.id, choice_ids[0]).unwrap().unwrap();
    assert_eq!(voted.votes, 2);

    assert!(store.vote(&question.id, other_ids[0]).unwrap().is_none());

    let (_, choices) = store.published_question(&question.id, Utc::now()).unwrap().unwrap();
    let votes: Vec<u32> = choices.iter().map(|c| c.votes).collect();
    assert_eq!(votes, vec![2, 0]);

    store.delete_question(&question.id).unwrap();
    store.delete_question(&other.id).unwrap();
}

#[test]
fn delete_cascades_to_choices() {
    let Some(store) = connect() else { return; };
    let (question, choice_ids) = create(&store, "Doomed question", -1, &["gone"]);
    assert!(store.add_choice(&question.id, CreateChoice { choice_text: String::from("also gone") })
        .unwrap()
        .is_some());

    assert!(store.delete_question(&question.id).unwrap());
    assert!(!store.delete_question(&question.id).unwrap());
    assert!(store.vote(&question.id, choice_ids[0]).unwrap().is_none());
    assert!(store.add_choice(&question.id, CreateChoice { choice_text: String::from("late") })
        .unwrap()
        .is_none());
}
