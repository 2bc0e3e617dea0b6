mod config;
mod frame;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env().expect("invalid configuration");

    // The relay task owns the hue and the broadcast group for the process lifetime.
    let relay = services::relay::Relay::new(config.initial_hue);
    let (relay_handle, _relay_task) = services::relay::spawn_relay_task(relay);
    let state = state::AppState::new(relay_handle, &config);

    let app = routes::app(state, &config.public_dir);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(
        port = config.port,
        host = %config.host,
        hue = %config.initial_hue,
        public_dir = %config.public_dir.display(),
        "huecast listening"
    );
    axum::serve(listener, app).await.expect("server failed");
}
