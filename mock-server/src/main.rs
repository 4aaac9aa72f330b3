use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Stand-in Ficsit Remote Monitoring server for local testing.
#[derive(Parser, Debug)]
#[command(name = "mock-server", version)]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Token expected in X-FRM-Authorization on write endpoints
    #[arg(long, env = "FRM_TOKEN", default_value = "frm-mock-token")]
    token: String,
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let addr = format!("127.0.0.1:{}", args.port);
    let listener = TcpListener::bind(&addr).await?;
    mock_server::run(listener, args.token).await
}
