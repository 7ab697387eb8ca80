use std::{
    fs, io,
    path::{Path, PathBuf},
};

use kutta_core::Config;
use log::info;
use thiserror::Error;

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Loads a configuration from a TOML file.
///
/// Missing keys take their values from [`Config::default`]. The result is not
/// validated.
pub fn load(path: &Path) -> Result<Config, Error> {
    info!("loading configuration from {}", path.display());

    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse(&text).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(text)
}
