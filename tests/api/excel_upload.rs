use panel_members::store::MemberStore;
use reqwest::multipart::Form;
use serde_json::json;

use crate::helpers::assert_json_failure;
use crate::helpers::spawn_app;

const MEMBERS: &[u8] = include_bytes!("../fixtures/members.xlsx");
const DUPLICATE_EMAILS: &[u8] = include_bytes!("../fixtures/duplicate_emails.xlsx");
const HEADER_ONLY: &[u8] = include_bytes!("../fixtures/header_only.xlsx");

#[tokio::test]
async fn duplicate_within_file_is_skipped() {
    let app = spawn_app().await;

    let resp = app.upload_excel(DUPLICATE_EMAILS).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Inserted 1 rows, Skipped 1 rows, Out of 2");
    // rows processed, as in "Out of 2"
    assert_eq!(body["count"], 2);
    assert_eq!(body["inserted"][0]["name"], "Jo Lee");
    assert_eq!(
        body["skipped"],
        json!([{ "row": 2, "name": "Sam", "email": "A@X.com", "reason": "Email already exists" }])
    );

    let jo = app.store.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(jo.name, "Jo Lee");
    assert_eq!(jo.field, "N/A");
    assert!(!jo.email_sent);
    assert!(jo.message.body.starts_with("Dear Colleague,"));
}

#[tokio::test]
async fn full_sheet_is_imported() {
    let app = spawn_app().await;

    let body: serde_json::Value = app.upload_excel(MEMBERS).await.json().await.unwrap();
    assert_eq!(body["message"], "Inserted 2 rows, Skipped 2 rows, Out of 4");
    assert_eq!(body["count"], 4);
    assert_eq!(body["inserted"].as_array().unwrap().len(), 2);
    assert_eq!(body["skipped"][1]["reason"], "Missing email");
    assert!(body["skipped"][1]["email"].is_null());

    // only the first sheet is read
    assert!(app.store.find_by_email("old@x.com").await.unwrap().is_none());
    assert_eq!(app.store.len().await, 2);
}

#[tokio::test]
async fn existing_members_are_not_overwritten() {
    let app = spawn_app().await;
    let original = app.seed_member("Original", "a@x.com").await;

    let body: serde_json::Value = app.upload_excel(DUPLICATE_EMAILS).await.json().await.unwrap();
    assert_eq!(body["message"], "Inserted 0 rows, Skipped 2 rows, Out of 2");
    assert_eq!(
        app.store.find_by_id(original.id).await.unwrap(),
        Some(original)
    );
}

#[tokio::test]
async fn uploading_twice_inserts_nothing_new() {
    let app = spawn_app().await;

    app.upload_excel(MEMBERS).await;
    let body: serde_json::Value = app.upload_excel(MEMBERS).await.json().await.unwrap();
    assert_eq!(body["message"], "Inserted 0 rows, Skipped 4 rows, Out of 4");
    assert_eq!(app.store.len().await, 2);
}

#[tokio::test]
async fn header_only_sheet_is_400() {
    let app = spawn_app().await;

    let resp = app.upload_excel(HEADER_ONLY).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_json_failure(&body, "Excel file is empty");
}

#[tokio::test]
async fn missing_file_is_400() {
    let app = spawn_app().await;

    let resp = app.upload(Form::new().text("comment", "no file here")).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_json_failure(&body, "No file uploaded");
}

#[tokio::test]
async fn unreadable_file_is_400() {
    let app = spawn_app().await;

    let resp = app.upload_excel(b"name,email\nJo,a@x.com\n").await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(app.store.is_empty().await);
}
