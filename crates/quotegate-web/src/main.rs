use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use quotegate_core::SimFeed;
use quotegate_web::{router, AppState};

/// quotegate market data API server.
#[derive(Debug, Parser)]
#[command(name = "quotegate", version)]
struct Args {
    /// Socket address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: String,

    /// Directory served at the root path.
    #[arg(long, default_value = "./static")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let state = AppState::new(Arc::new(SimFeed));
    let app = router(state, &args.static_dir);

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    tracing::info!(bind = %args.bind, "quotegate listening");
    axum::serve(listener, app).await
}
