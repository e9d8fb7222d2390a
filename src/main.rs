mod shutdown;
mod startup;

use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting EventSphere");

    // Load configuration
    let config = startup::load_config()?;

    // Serve the pages
    startup::start_server(config).await
}
