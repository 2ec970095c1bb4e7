use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bingo::Username;
use serde::Deserialize;

/// Where boards are kept when neither the command line nor the config file says otherwise.
pub const DEFAULT_STORE_DIR: &str = "bingo_boards";

/// Defaults read from a JSON config file, e.g.
///
/// ```json
/// { "store_dir": "/home/alice/.bingo", "user": "alice" }
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub store_dir: Option<PathBuf>,
    pub user: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open config file '{}'", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse config file '{}'", path.display()))?;
        Ok(config)
    }
}

/// The settings a run actually uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub store_dir: PathBuf,
    pub user: Username,
}

impl Settings {
    /// Command line values take precedence over the config file.
    pub fn resolve(
        store_dir: Option<PathBuf>,
        user: Option<String>,
        config: ConfigFile,
    ) -> anyhow::Result<Self> {
        let store_dir = store_dir
            .or(config.store_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR));
        let Some(user) = user.or(config.user) else {
            anyhow::bail!("No user given, pass --user or set \"user\" in the config file");
        };
        let user = Username::new(&user)?;
        Ok(Self { store_dir, user })
    }
}
