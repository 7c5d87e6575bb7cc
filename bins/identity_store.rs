use dotenvy::dotenv;
use tracing::{error, info};

use service::catalog::IdentityCatalog;

fn init_logging() {
    // Load .env first so a RUST_LOG set there takes effect.
    dotenv().ok();
    common::utils::logging::init_logging_default();
    info!(service = "identity-store", event = "logger_init", "tracing subscriber initialized");
}

/// Opens (and on first run seeds) the identity catalog at the configured
/// paths, then reports what it holds. The storage contract itself is consumed
/// in-process by the hosting identity engine.
#[tokio::main]
async fn main() -> std::process::ExitCode {
    init_logging();

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(err) => {
            info!(event = "config_fallback", %err, "no usable config file; using defaults");
            let mut cfg = configs::AppConfig::default();
            if let Err(err) = cfg.normalize_and_validate() {
                error!(event = "config_invalid", %err, "default configuration rejected");
                return std::process::ExitCode::FAILURE;
            }
            cfg
        }
    };

    info!(
        service = "identity-store",
        event = "start",
        version = env!("CARGO_PKG_VERSION"),
        user_db = %cfg.identity.user_db_path,
        claims_db = %cfg.identity.claims_db_path,
        "opening identity catalog"
    );

    match IdentityCatalog::open(&cfg.identity).await {
        Ok(catalog) => {
            info!(
                event = "ready",
                users = catalog.user_count().await,
                claims = catalog.claim_count().await,
                "identity catalog ready"
            );
            std::process::ExitCode::SUCCESS
        }
        Err(err) => {
            error!(event = "open_failed", %err, "failed to open identity catalog");
            std::process::ExitCode::FAILURE
        }
    }
}
