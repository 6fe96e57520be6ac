//! Configuration file handling for famibank.
//!
//! The configuration file is stored at `$FAMIBANK_HOME/config.json` and contains the address of
//! the Core banking service and report housekeeping settings.

use crate::db::Db;
use crate::error::{ErrorType, IntoResult, Res};
use crate::Result;
use crate::utils;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

const APP_NAME: &str = "famibank";
const CONFIG_VERSION: u8 = 1;
const REPORT_RETENTION_MONTHS: u32 = 12;
const CONFIG_JSON: &str = "config.json";
const FAMIBANK_SQLITE: &str = "famibank.sqlite";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$FAMIBANK_HOME` and from there it loads `$FAMIBANK_HOME/config.json` and opens
/// the report database.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    core_url: Url,
    db: Db,
    sqlite_path: PathBuf,
}

impl Config {
    /// Creates the data directory and:
    /// - Creates an initial `config.json` file using `core_url` along with default settings
    /// - Creates and migrates the report database
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of data directory, e.g. `$HOME/famibank`
    /// - `core_url` - The base URL of the Core banking service, e.g. `http://localhost:8081`
    ///
    /// # Errors
    /// - Returns an error if `core_url` is not a valid http(s) URL.
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>, core_url: &str) -> Res<Self> {
        let core_url = parse_core_url(core_url)?;

        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the famibank home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            );
        }

        let config_file = ConfigFile {
            core_url: core_url.to_string(),
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        let sqlite_path = root.join(FAMIBANK_SQLITE);
        let db = Db::init(&sqlite_path)
            .await
            .context("Unable to create SQLite DB")?;

        Ok(Self {
            root,
            config_path,
            config_file,
            core_url,
            db,
            sqlite_path,
        })
    }

    /// This will
    /// - validate that `famibank_home` exists and that the config file exists
    /// - load and validate the config file
    /// - open the database, migrating it if needed
    ///
    /// # Errors
    /// - Returns a `Config` error if any of the above fails.
    pub async fn load(famibank_home: impl Into<PathBuf>) -> Result<Self> {
        Self::open(famibank_home.into())
            .await
            .pub_result(ErrorType::Config)
    }

    async fn open(maybe_relative: PathBuf) -> Res<Self> {
        if !maybe_relative.is_dir() {
            bail!(
                "famibank home is missing '{}', run 'famibank init' first",
                maybe_relative.display()
            );
        }
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let core_url = parse_core_url(&config_file.core_url)
            .with_context(|| format!("Bad core_url in '{}'", config_path.display()))?;

        let sqlite_path = root.join(FAMIBANK_SQLITE);
        let db = Db::load(&sqlite_path)
            .await
            .context("Unable to load SQLite DB")?;

        Ok(Self {
            root,
            config_path,
            config_file,
            core_url,
            db,
            sqlite_path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub(crate) fn db(&self) -> &Db {
        &self.db
    }

    pub fn core_url(&self) -> &Url {
        &self.core_url
    }

    pub fn sqlite_path(&self) -> &Path {
        &self.sqlite_path
    }

    /// How many months of reports, counting the current month, `prune` keeps by default.
    pub fn report_retention_months(&self) -> u32 {
        self.config_file.report_retention_months
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "famibank",
///   "config_version": 1,
///   "core_url": "http://localhost:8081/",
///   "report_retention_months": 12
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "famibank"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Base URL of the Core banking service
    core_url: String,

    /// Number of months of stored reports to keep, including the current month
    #[serde(default = "default_retention")]
    report_retention_months: u32,
}

fn default_retention() -> u32 {
    REPORT_RETENTION_MONTHS
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            core_url: String::new(),
            report_retention_months: REPORT_RETENTION_MONTHS,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it is not a famibank config.
    async fn load(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.report_retention_months >= 1,
            "report_retention_months must be at least 1"
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Res<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

/// Parses the Core base URL. A trailing slash is added so that relative API paths are joined
/// beneath it rather than replacing its last segment.
fn parse_core_url(s: &str) -> Res<Url> {
    let mut url = Url::parse(s.trim()).with_context(|| format!("Invalid Core URL '{s}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("The Core URL must be http or https, got '{s}'");
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
