use actix_web::web;
use mock_api::{
    Config, RequestLog, build,
    store::{Store, seed},
    telemetry::{get_subscriber, init_subscriber},
};

/// Mock tourism API server
///
/// Environment variables can be set directly or loaded from a .env file.
///
/// - IP_ADDRESS: bind address (default 127.0.0.1)
/// - PORT: server port (default 8000)
/// - ALLOWED_ORIGINS: CORS origins, "*" or a comma-separated list
/// - SUPERADMIN_EMAIL / SUPERADMIN_PASSWORD: account created at startup
/// - PUBLIC_URL: base for uploaded file URLs
///
/// Data lives in memory and is lost on exit.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let subscriber = get_subscriber("info".into());
    init_subscriber(subscriber)?;

    let mut config = Config::from_env()?;

    let store = Store::new();
    seed::locations(&store);
    seed::demo_content(&store);

    let server = build(
        &mut config,
        web::Data::new(store),
        web::Data::new(RequestLog::default()),
    )
    .await?;
    tracing::info!("mock api listening on {}:{}", config.ip, config.port);
    server.await?;
    Ok(())
}
