mod api;
mod config;
mod error;
mod ip;
mod sync;

use std::path::PathBuf;

use config::Config;
use log::error;
use sync::SyncAgent;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let env_file = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_ENV_FILE));
    config::load_env_file(&env_file);

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {:#}", e);
            return;
        }
    };

    // Failures end the run; the process still exits with status 0 and the
    // next scheduled invocation starts fresh.
    if let Err(e) = SyncAgent::new(config).run().await {
        error!("sync failed: {}", e);
    }
}
