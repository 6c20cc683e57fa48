mod config;
mod pip;
mod registry;
mod tui;
mod venv;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = config::Config::load_or_default()?;
    let manager = pip::PipManager::system();

    tui::run(manager, config).await?;

    Ok(())
}
