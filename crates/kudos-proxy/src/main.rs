//! Kudos proxy binary
//!
//! Serves `/api/google-places` and `/api/google-images`.

use kudos_proxy::{config::ProxyConfig, start_server, ProxyError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ProxyError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ProxyConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default local configuration");
        eprintln!("Usage: kudos-proxy --config <path-to-config.toml>");
        eprintln!();
        ProxyConfig::default_test_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Kudos Proxy - Places and avatar image proxy for the reviews section");
    println!();
    println!("USAGE:");
    println!("    kudos-proxy --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 8888)");
    println!("    - api_key: Places API key (optional)");
    println!("    - places_base_url: Places API base URL (default: https://maps.googleapis.com)");
    println!("    - request_timeout_secs: Upstream request timeout in seconds (optional)");
    println!();
    println!("ENVIRONMENT:");
    println!("    GOOGLE_PLACES_API_KEY        Used when api_key is not set in the file");
    println!("    VITE_GOOGLE_PLACES_API_KEY   Checked last");
    println!("    RUST_LOG                     Log filter (default: info)");
    println!();
}
