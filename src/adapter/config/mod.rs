mod content;
mod reader;

use std::path::Path;

pub use content::{Configuration, NotificationSection, TimerSection};
pub use reader::{ReadContentError, DEFAULT_CONTENT};

use snafu::prelude::*;
use toml::de::Error as DeError;

use crate::utils::xdg::{Xdg, XdgError};

/// An error type for loading configuration from files.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum LoadConfigurationError {
    #[snafu(display("Could not resolve XDG configuration directory"))]
    XdgConfig { source: XdgError },
    #[snafu(display("Could not read content from file"))]
    Read { source: ReadContentError },
    #[snafu(display("Could not parse invalid configurations"))]
    Parse { source: DeError },
}

/// Read configuration from a custom path. A missing file is an error.
///
/// # Errors
///
/// This function will return an error if reading content from file fails or
/// parsing configuration fails.
pub fn load_with_path<P: AsRef<Path>>(path: P) -> Result<Configuration, LoadConfigurationError> {
    load(path, false)
}

/// Read configuration from the XDG configuration directory, creating it from
/// the default template if it doesn't exist.
///
/// # Errors
///
/// This function will return an error if reading content from file fails or
/// parsing configuration fails.
pub fn load_with_xdg(app_name: &str) -> Result<Configuration, LoadConfigurationError> {
    let path = Xdg::new(app_name)
        .and_then(|xdg| xdg.place_config("config.toml"))
        .context(XdgConfigSnafu)?;
    load(path, true)
}

fn load<P: AsRef<Path>>(
    path: P,
    create_missing: bool,
) -> Result<Configuration, LoadConfigurationError> {
    let content = reader::read_content(path, create_missing).context(ReadSnafu)?;
    toml::from_str(&content).context(ParseSnafu)
}
