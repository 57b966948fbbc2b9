#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use warp::http::Response;
use warp::hyper::body::Bytes;

use polls::polls::{Choice, CreateChoice, CreateQuestion, Question};
use polls::store::MemoryStore;
use polls::web::{self, SharedStore};

pub fn new_store() -> SharedStore {
    Arc::new(MemoryStore::new())
}

/// Creates a question published `days` from now, negative for the past.
pub fn create_question(store: &SharedStore, question_text: &str, days: i64) -> Question {
    let (question, _) = store.create_question(CreateQuestion {
        question_text: String::from(question_text),
        pub_date: Utc::now() + Duration::days(days),
        choices: vec![],
    }).unwrap();
    question
}

pub fn create_choice(store: &SharedStore, question: &Question, choice_text: &str) -> Choice {
    store.add_choice(&question.id, CreateChoice { choice_text: String::from(choice_text) })
        .unwrap()
        .unwrap()
}

pub async fn get(store: &SharedStore, path: &str) -> Response<Bytes> {
    warp::test::request()
        .method("GET")
        .path(path)
        .reply(&web::routes(store.clone(), None))
        .await
}

pub async fn post_form(store: &SharedStore, path: &str, body: &str) -> Response<Bytes> {
    warp::test::request()
        .method("POST")
        .path(path)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(body.to_string())
        .reply(&web::routes(store.clone(), None))
        .await
}

pub fn body_text(response: &Response<Bytes>) -> String {
    String::from_utf8_lossy(response.body()).into_owned()
}

/// Question texts of the json index, in order.
pub async fn listed_question_texts(store: &SharedStore) -> Vec<String> {
    let response = get(store, "/api/questions").await;
    assert_eq!(response.status(), 200);
    let json: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    json["latest_question_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["question_text"].as_str().unwrap().to_string())
        .collect()
}
