#[tokio::main]
async fn main() {
    paperback_observability::init();

    let addr = std::env::var("PAPERBACK_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = paperback_api::app::build_app();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
