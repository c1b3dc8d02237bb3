use crate::error::{ImportError, Result, ResultExt as _};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE: &str = "Test Planning.xlsx";
pub const DEFAULT_SHEET: &str = "PLANNING";
pub const DEFAULT_TABLE: &str = "dynamic_tours";

/// Everything one import run needs to know.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ImportSettings {
    pub db: DbSettings,
    pub file: PathBuf,
    pub sheet: String,
    pub table: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            db: DbSettings::default(),
            file: PathBuf::from(DEFAULT_FILE),
            sheet: DEFAULT_SHEET.to_owned(),
            table: DEFAULT_TABLE.to_owned(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(
        serialize_with = "serialize_password",
        deserialize_with = "deserialize_password"
    )]
    pub password: SecretString,
    pub database: String,
}

fn serialize_password<S>(password: &SecretString, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(password.expose_secret())
}

fn deserialize_password<'de, D>(deserializer: D) -> std::result::Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(SecretString::new(s.into()))
}

impl Default for DbSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 5433,
            user: "user".to_owned(),
            password: SecretString::new("password".into()),
            database: "hajj_db".to_owned(),
        }
    }
}

impl DbSettings {
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.database
        )
    }

    /// Same as [`Self::connection_string`] with the password masked, for logs.
    pub fn redacted_connection_string(&self) -> String {
        format!(
            "postgres://{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

/// Reads settings from a JSON file. Keys that are absent keep their defaults.
pub fn load_settings(path: &Path) -> Result<ImportSettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| ImportError::Config(format!("{}: {e}", path.display())))
}
