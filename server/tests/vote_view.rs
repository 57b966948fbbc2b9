mod common;

use chrono::Utc;

use common::*;

#[tokio::test]
async fn vote_increments_selected_choice() {
    let store = new_store();
    let question = create_question(&store, "Past question", -5);
    let first = create_choice(&store, &question, "First");
    let second = create_choice(&store, &question, "Second");

    let response = post_form(&store, &format!("/polls/{}/vote", question.id), &format!("choice={}", second.id)).await;
    assert_eq!(response.status(), 303);
    assert_eq!(
        response.headers()["location"],
        format!("/polls/{}/results", question.id).as_str(),
    );

    let (_, choices) = store.published_question(&question.id, Utc::now()).unwrap().unwrap();
    assert_eq!(choices[0].id, first.id);
    assert_eq!(choices[0].votes, 0);
    assert_eq!(choices[1].votes, 1);

    let results = get(&store, &format!("/polls/{}/results", question.id)).await;
    assert!(body_text(&results).contains("Second -- 1 vote"));
}

#[tokio::test]
async fn vote_without_choice_redisplays_form() {
    let store = new_store();
    let question = create_question(&store, "Past question", -5);
    let choice = create_choice(&store, &question, "Only choice");

    for body in ["", "choice=", "choice=abc", "choice=9999"] {
        let response = post_form(&store, &format!("/polls/{}/vote", question.id), body).await;
        assert_eq!(response.status(), 200, "body {body:?}");
        let text = body_text(&response);
        assert!(text.contains("select a choice"), "body {body:?}");
        assert!(text.contains(&choice.choice_text));
    }

    let (_, choices) = store.published_question(&question.id, Utc::now()).unwrap().unwrap();
    assert_eq!(choices[0].votes, 0);
}

#[tokio::test]
async fn vote_rejects_choice_from_other_question() {
    let store = new_store();
    let question = create_question(&store, "Past question", -5);
    create_choice(&store, &question, "Mine");
    let other = create_question(&store, "Other question", -5);
    let foreign = create_choice(&store, &other, "Theirs");

    let response = post_form(&store, &format!("/polls/{}/vote", question.id), &format!("choice={}", foreign.id)).await;
    assert_eq!(response.status(), 200);
    assert!(body_text(&response).contains("select a choice"));

    let (_, choices) = store.published_question(&other.id, Utc::now()).unwrap().unwrap();
    assert_eq!(choices[0].votes, 0);
}

#[tokio::test]
async fn vote_on_future_question() {
    let store = new_store();
    let question = create_question(&store, "Future question", 5);
    let choice = create_choice(&store, &question, "Too early");

    let response = post_form(&store, &format!("/polls/{}/vote", question.id), &format!("choice={}", choice.id)).await;
    assert_eq!(response.status(), 404);

    let later = Utc::now() + chrono::Duration::days(6);
    let (_, choices) = store.published_question(&question.id, later).unwrap().unwrap();
    assert_eq!(choices[0].votes, 0);
}

#[tokio::test]
async fn vote_requires_post() {
    let store = new_store();
    let question = create_question(&store, "Past question", -5);
    let response = get(&store, &format!("/polls/{}/vote", question.id)).await;
    assert_eq!(response.status(), 405);
}
