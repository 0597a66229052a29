use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "moviecat-server")]
#[command(about = "Read-only query API over scraped movie catalogs", long_about = None)]
struct Args {
    /// Load environment configuration from this file instead of ./.env
    #[arg(short, long)]
    env_file: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    match &args.env_file {
        Some(path) => {
            if let Err(e) = dotenvy::from_path(path) {
                eprintln!("Error: failed to load env file {}: {}", path, e);
                std::process::exit(1);
            }
        }
        None => {
            // A local .env is optional; deployments set the process
            // environment directly.
            let _ = dotenvy::dotenv();
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moviecat_rs=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = moviecat_rs::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
