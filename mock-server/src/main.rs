use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let count = match std::env::var("POSTS_FIXTURE_COUNT") {
        Ok(v) => v.parse().unwrap_or_else(|_| {
            warn!(value = %v, "invalid POSTS_FIXTURE_COUNT, using 100");
            100
        }),
        Err(_) => 100,
    };

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, posts = count, "mock upstream listening");
    mock_server::run(listener, mock_server::fixture_posts(count)).await
}
