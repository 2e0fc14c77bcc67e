mod forms;
mod routes;
mod services;
mod views;

use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let state = routes::default_state();
    routes::initial_scan(&state).await;

    let app = routes::build_router(state);
    let addr = "0.0.0.0:3000".parse().expect("invalid bind address");
    info!("console listening on http://0.0.0.0:3000");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("server failed");
}
