use color_eyre::Result;
use log::info;

use openhs_client::{client::App, config::ClientConfig};

fn main() -> Result<()> {
    color_eyre::install()?;

    let config = ClientConfig::from_env();
    // the terminal belongs to the UI, so diagnostics go to a file
    simple_logging::log_to_file(&config.log_file, config.log_level)?;
    info!("Connecting to game server at {}", config.server_url);

    let mut app = App::new(config)?;
    app.run()
}
