use carfit_api::RestApi;
use carfit_ranking::RecommendationEngine;
use carfit_storage::StorageManager;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Explainable vehicle accessory recommendations
#[derive(Parser, Debug)]
#[command(name = "carfit")]
#[command(about = "Vehicle accessory recommendation server", long_about = None)]
struct Args {
    /// Precomputed accessory feature table (CSV)
    #[arg(short, long, default_value = "./data/accessories_with_advanced_sentiment.csv")]
    catalog: PathBuf,

    /// TF-IDF vocabulary artifact; fitted from the catalog when missing
    #[arg(long, default_value = "./data/tfidf_vocabulary.json")]
    vocabulary: PathBuf,

    /// Write the vocabulary artifact if it had to be fitted
    #[arg(long)]
    save_vocabulary: bool,

    /// HTTP API port
    #[arg(long, default_value_t = 8000)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting carfit v{}", env!("CARGO_PKG_VERSION"));
    info!("Catalog: {:?}", args.catalog);
    info!("HTTP API port: {}", args.http_port);

    let storage = StorageManager::new(&args.catalog).with_vocabulary(&args.vocabulary);
    let loaded = storage.load()?;
    if loaded.vocabulary_fitted && args.save_vocabulary {
        storage.save_vocabulary(&loaded.index)?;
    }

    let engine = Arc::new(RecommendationEngine::new(loaded.catalog, loaded.index)?);
    info!("Recommendation engine ready with {} accessories", engine.catalog().len());

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(engine, http_port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
