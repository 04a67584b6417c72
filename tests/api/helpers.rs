use std::sync::Arc;

use once_cell::sync::Lazy;
use panel_members::configuration::get_configuration;
use panel_members::configuration::DatabaseSettings;
use panel_members::domain::Member;
use panel_members::domain::MemberDraft;
use panel_members::startup::Application;
use panel_members::store::InMemoryMemberStore;
use panel_members::store::MemberStore;
use panel_members::telemetry::get_subscriber;
use panel_members::telemetry::init_subscriber;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use wiremock::MockServer;

/// Logs are discarded unless `TEST_LOG` is set:
///
/// ```sh
///      TEST_LOG=true cargo test [test_name] | bunyan
/// ```
static TRACING: Lazy<()> = Lazy::new(|| {
    // the two sinks are different types, hence the duplicated arms
    match std::env::var("TEST_LOG") {
        Ok(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::stdout);
            init_subscriber(subscriber).unwrap();
        }
        Err(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::sink);
            init_subscriber(subscriber).unwrap();
        }
    };
});

pub struct TestApp {
    pub addr: String,
    /// Shared with the running server, for seeding and inspecting records
    pub store: Arc<InMemoryMemberStore>,
    /// Stands in for the mail API
    pub email_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn seed_member(
        &self,
        name: &str,
        email: &str,
    ) -> Member {
        let draft = MemberDraft {
            name: name.to_string(),
            email: Some(email.to_string()),
            ..Default::default()
        };
        self.store
            .insert(&draft.try_into().unwrap())
            .await
            .unwrap()
    }

    pub async fn post_member(
        &self,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}/members/new", self.addr))
            .json(body)
            .send()
            .await
            .expect("execute request")
    }

    pub async fn get_members(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/members", self.addr))
            .send()
            .await
            .expect("execute request")
    }

    pub async fn edit_member(
        &self,
        id: &str,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.api_client
            .put(format!("{}/members/edit/{id}", self.addr))
            .json(body)
            .send()
            .await
            .expect("execute request")
    }

    /// Upload `bytes` as the spreadsheet field
    pub async fn upload_excel(
        &self,
        bytes: &[u8],
    ) -> reqwest::Response {
        let part = Part::bytes(bytes.to_vec()).file_name("members.xlsx");
        self.upload(Form::new().part("excel_file", part)).await
    }

    pub async fn upload(
        &self,
        form: Form,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}/members/excel-upload", self.addr))
            .multipart(form)
            .send()
            .await
            .expect("execute request")
    }

    pub async fn send_email(
        &self,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.api_client
            .put(format!("{}/members/send-email", self.addr))
            .json(body)
            .send()
            .await
            .expect("execute request")
    }
}

/// Spawn the server on a random port, backed by an in-memory store and a mock
/// mail API. No database is needed.
pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;

    let cfg = {
        let mut cfg = get_configuration().expect("failed to read configuration");
        cfg.application.port = 0;
        cfg.email_client.base_url = email_server.uri();
        cfg
    };

    let store = Arc::new(InMemoryMemberStore::new());
    let app = Application::build_with_store(cfg, store.clone()).expect("failed to build app");
    let addr = format!("http://127.0.0.1:{}", app.get_port());
    tokio::spawn(app.run_until_stopped());

    TestApp {
        addr,
        store,
        email_server,
        api_client: reqwest::Client::new(),
    }
}

/// Create a database with a random name and apply the migrations to it
pub async fn configure_database(cfg: &DatabaseSettings) -> PgPool {
    let mut conn = PgConnection::connect_with(&cfg.connection_without_db())
        .await
        .expect("postgres must be running");
    conn.execute(format!(r#"CREATE DATABASE "{}";"#, cfg.database_name).as_str())
        .await
        .unwrap();

    let pool = PgPool::connect_with(cfg.connection()).await.unwrap();
    sqlx::migrate!().run(&pool).await.expect("failed to migrate");
    pool
}

pub fn assert_json_failure(
    body: &serde_json::Value,
    message: &str,
) {
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], message);
}
