use axum_extra::extract::cookie::Key;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use classhub_google::{ClassroomClient, IdentityResolver};
use classhub_session::SessionStore;
use classhub_server::{
    app,
    auth::GoogleOAuthClient,
    config::{GoogleCredentials, ServerConfig},
    error::ErrorTranslator,
    state::AppState,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load and validate configuration before accepting any traffic.
    let config = ServerConfig::from_env().expect("failed to load configuration");
    let credentials =
        GoogleCredentials::load(&config.credentials_file).expect("failed to load credentials file");
    let oauth = GoogleOAuthClient::new(&credentials).expect("invalid OAuth configuration");
    tracing::info!("Loaded configuration");

    let state = AppState {
        sessions: SessionStore::new(),
        oauth,
        identity: IdentityResolver::new(),
        classroom: ClassroomClient::new(),
        errors: ErrorTranslator::new(config.dev_mode),
        cookie_key: Key::derive_from(config.session.secret.as_bytes()),
        secure_cookies: config.session.secure_cookies,
    };

    let app = app::router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
