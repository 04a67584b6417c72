use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check() {
    let app = spawn_app().await;

    let resp = app
        .api_client
        .get(format!("{}/health_check", app.addr))
        .send()
        .await
        .expect("execute request");
    assert!(resp.status().is_success());
    assert_eq!(resp.content_length().unwrap(), 0);
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = spawn_app().await;

    let resp = app
        .api_client
        .get(format!("{}/members/nope/nope", app.addr))
        .send()
        .await
        .expect("execute request");
    assert_eq!(resp.status().as_u16(), 404);
    let body: serde_json::Value = resp.json().await.unwrap();
    crate::helpers::assert_json_failure(&body, "Not found");
}
