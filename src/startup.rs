use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::Server;
use actix_web::web;
use actix_web::web::Data;
use actix_web::App;
use actix_web::HttpServer;
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_actix_web::TracingLogger;

use crate::configuration::DatabaseSettings;
use crate::configuration::Settings;
use crate::email_client::EmailClient;
use crate::routes::create_member;
use crate::routes::edit_member;
use crate::routes::health_check;
use crate::routes::list_members;
use crate::routes::send_invitations;
use crate::routes::upload_members;
use crate::store::MemberStore;
use crate::store::PgMemberStore;
use crate::utils::json_error_handler;
use crate::utils::not_found;

/// Wrapper for actix's `Server` with access to the bound port.
pub struct Application {
    /// Left private; use `get_port` to access
    port: u16,
    server: Server,
}

impl Application {
    /// Connect to Postgres, apply pending migrations, then bind. A database
    /// that cannot be reached is fatal.
    pub async fn build(cfg: Settings) -> Result<Self, anyhow::Error> {
        let pool = get_connection_pool(&cfg.database)
            .await
            .context("Failed to connect to Postgres")?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to migrate the database")?;
        tracing::info!("connected to database {}", cfg.database.database_name);

        let store: Arc<dyn MemberStore> = Arc::new(PgMemberStore::new(pool));
        Self::build_with_store(cfg, store)
    }

    /// Same as `build`, but with a store supplied by the caller (tests)
    pub fn build_with_store(
        cfg: Settings,
        store: Arc<dyn MemberStore>,
    ) -> Result<Self, anyhow::Error> {
        let addr = format!("{}:{}", cfg.application.host, cfg.application.port);
        let listener = TcpListener::bind(&addr).with_context(|| format!("Failed to bind {addr}"))?;
        // port 0 is resolved by the OS
        let port = listener.local_addr()?.port();

        let email_client = cfg.email_client.client()?;
        let server = run(listener, store, email_client)?;
        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 { self.port }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> { self.server.await }
}

pub async fn get_connection_pool(db_cfg: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(db_cfg.connection())
        .await
}

pub fn run(
    listener: TcpListener,
    store: Arc<dyn MemberStore>,
    email_client: EmailClient,
) -> Result<Server, anyhow::Error> {
    let store: Data<dyn MemberStore> = Data::from(store);
    let email_client = Data::new(email_client);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/health_check", web::get().to(health_check))
            .service(
                web::scope("/members")
                    .route("", web::get().to(list_members))
                    .route("/new", web::post().to(create_member))
                    .route("/edit/{id}", web::put().to(edit_member))
                    .route("/excel-upload", web::post().to(upload_members))
                    .route("/send-email", web::put().to(send_invitations)),
            )
            .default_service(web::route().to(not_found))
            .app_data(store.clone())
            .app_data(email_client.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
