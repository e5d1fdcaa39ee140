mod application;
mod domain;
mod infrastructure;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use application::interactive::InteractiveSession;
use application::watermark_service::WatermarkService;
use infrastructure::axum_handler::{self, AppState};
use infrastructure::file_storage::LocalFileStorage;
use infrastructure::image_codec::DefaultImageCodec;

#[derive(Parser, Debug)]
#[command(name = "watermarker", version, about = "Blend a watermark image onto another image")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "WATERMARKER_LOG", default_value = "warn", global = true)]
    log: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask for the inputs on the console (default)
    Prompt,
    /// Serve POST /watermark over HTTP
    Serve {
        #[arg(long, env = "WATERMARKER_BIND", default_value = "0.0.0.0:3300")]
        bind: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout belongs to the prompts.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log)))
        .with_writer(io::stderr)
        .init();

    let service = WatermarkService::new(Arc::new(DefaultImageCodec::new()));

    match cli.command.unwrap_or(Command::Prompt) {
        Command::Prompt => {
            let storage = LocalFileStorage::new();
            let session = InteractiveSession::new(&service, &storage, io::stdin().lock(), io::stdout());
            if let Err(e) = session.run().await {
                tracing::debug!(error = ?e, "interactive run failed");
                println!("{e}");
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Serve { bind } => {
            let app = axum_handler::router(AppState {
                watermark_service: Arc::new(service),
            });
            tracing::info!(%bind, "listening");
            axum::Server::bind(&bind)
                .serve(app.into_make_service())
                .await
                .context("HTTP server failed")
        }
    }
}
