use jamclient::Config;
use std::fs::File;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    LoadError(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

pub fn load_from_file(path: &Path) -> Result<Config, ConfigError> {
    let file = File::open(path)?;
    let config = serde_yaml::from_reader(file)?;

    Ok(config)
}
