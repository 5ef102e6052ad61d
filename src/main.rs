use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use slack_request_verifier::config::Config;
use slack_request_verifier::slack;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing `.env` file is fine: deployments set the variables directly.
    dotenv::dotenv().ok();

    // Initialize the logger.
    tracing_subscriber::fmt::init();
    log::set_max_level(LevelFilter::Trace);

    // Parse our configuration from the environment.
    // This will exit with a help message if something is wrong.
    let config = Config::parse();

    // We spin up our API.
    slack::serve(config).await?;

    Ok(())
}
