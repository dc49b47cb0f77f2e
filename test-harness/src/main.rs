//! Standalone Alcove backend harness
//!
//! Serves the in-memory backend on a local port with a few seeded
//! accounts, for driving the CLI or a client by hand.

use anyhow::Result;
use clap::Parser;
use test_harness::Backend;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "test-harness")]
#[command(about = "Alcove in-memory backend harness", long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    alcove_core::init_logging()?;
    let args = Args::parse();

    let backend = Backend::new();
    let alice = backend.seed_account("alice@alcove.test", "Alice", "Hart", "Admin");
    let bob = backend.seed_account("bob@alcove.test", "Bob", "Stone", "Approved");

    println!("Seeded accounts (password: \"password\"):");
    println!("  alice@alcove.test  token: {}", alice);
    println!("  bob@alcove.test    token: {}", bob);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("harness listening on http://{}", addr);

    axum::serve(listener, test_harness::router(backend)).await?;
    Ok(())
}
