use panel_members::configuration::get_configuration;
use panel_members::startup::Application;
use panel_members::telemetry::get_subscriber;
use panel_members::telemetry::init_subscriber;

#[tokio::main] // requires tokio features: macros, rt-multi-thread
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("panel-members", "info", std::io::stdout);
    init_subscriber(subscriber)?;

    let cfg = get_configuration()?;
    let app = match Application::build(cfg).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "failed to start"
            );
            return Err(e);
        }
    };
    tracing::info!("listening on port {}", app.get_port());
    app.run_until_stopped().await?;
    Ok(())
}
