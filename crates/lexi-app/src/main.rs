use std::path::Path;
use std::sync::Arc;

use lexi_config::Config;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod console;
mod controller;
mod events;
mod profile;
mod search;
mod state;
mod tasks;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // Stdout belongs to the console presentation
    if std::env::var_os("LEXI_LOG_JSON").is_some() {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::new();
    let preferences = profile::open_preferences(Path::new(&config.preferences_path))?;
    let state = Arc::new(AppState::new(config, preferences));

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks().await?;

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task exited"),
                Ok(Err(e)) => tracing::error!("Task failed: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;

    Ok(())
}
