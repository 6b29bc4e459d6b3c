use clap::Parser;
use jamclient::Api;
use std::error::Error;
use std::path::PathBuf;

mod config;

/// Fetch a game and its authors from the node API.
#[derive(Parser)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Slug of the game to fetch
    name: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = config::load_from_file(&cli.config)?;
    config.validate()?;

    let api = Api::new(config)?;
    let game = api.get_game(&cli.name).await?;

    println!("{}", serde_json::to_string_pretty(&game)?);

    Ok(())
}
