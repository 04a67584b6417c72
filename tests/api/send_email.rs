use panel_members::store::MemberStore;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::any;
use wiremock::matchers::body_partial_json;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::ResponseTemplate;

use crate::helpers::spawn_app;

#[tokio::test]
async fn invitation_is_sent_and_recorded() {
    let app = spawn_app().await;
    let jo = app.seed_member("Jo Lee", "jo@x.com").await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .and(body_partial_json(json!({
            "To": "jo@x.com",
            "Subject": "Invitation to conduct dispute resolution cases",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let resp = app
        .send_email(&json!([{ "_id": jo.id, "name": "Jo Lee", "email": "jo@x.com" }]))
        .await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Email process completed");
    assert_eq!(body["results"], json!([{ "email": "jo@x.com", "status": "success" }]));

    let stored = app.store.find_by_id(jo.id).await.unwrap().unwrap();
    assert!(stored.email_sent);
    assert!(stored.message.body.starts_with("Dear Jo,"));

    // the HTML body has line breaks instead of newlines
    let requests = app.email_server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let html = sent["HtmlBody"].as_str().unwrap();
    assert!(html.starts_with("Dear Jo,<br>"));
    assert!(!html.contains('\n'));
    assert!(sent["TextBody"].as_str().unwrap().starts_with("Dear Jo,\n"));
}

#[tokio::test]
async fn wrapped_request_shape_is_accepted() {
    let app = spawn_app().await;
    let jo = app.seed_member("Jo Lee", "jo@x.com").await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let resp = app
        .send_email(&json!({ "data": [{ "_id": jo.id, "name": "Jo Lee", "email": "jo@x.com" }] }))
        .await;
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["results"][0]["status"], "success");
}

#[tokio::test]
async fn unknown_member_fails_without_sending() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let resp = app
        .send_email(&json!([{ "_id": Uuid::new_v4(), "name": "Ghost", "email": "ghost@x.com" }]))
        .await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        body["results"],
        json!([{ "email": "ghost@x.com", "status": "failed", "reason": "Member not found" }])
    );
}

#[tokio::test]
async fn gateway_failure_is_reported_per_recipient() {
    let app = spawn_app().await;
    let ann = app.seed_member("Ann", "ann@x.com").await;
    let bob = app.seed_member("Bob", "bob@x.com").await;

    Mock::given(body_partial_json(json!({ "To": "bob@x.com" })))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body: serde_json::Value = app
        .send_email(&json!([
            { "_id": ann.id, "name": "Ann", "email": "ann@x.com" },
            { "_id": bob.id, "name": "Bob", "email": "bob@x.com" },
        ]))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["results"][0]["status"], "success");
    assert_eq!(body["results"][1]["email"], "bob@x.com");
    assert_eq!(body["results"][1]["status"], "failed");
    assert!(body["results"][1]["reason"].is_string());

    assert!(app.store.find_by_id(ann.id).await.unwrap().unwrap().email_sent);
    assert!(!app.store.find_by_id(bob.id).await.unwrap().unwrap().email_sent);
}

#[tokio::test]
async fn empty_batch_is_ok() {
    let app = spawn_app().await;

    let body: serde_json::Value = app.send_email(&json!([])).await.json().await.unwrap();
    assert_eq!(body["results"], json!([]));
}
