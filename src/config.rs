//! API connection settings and per-call extraction options.

use crate::error::{ExtractError, Result};
use crate::paginate::DEFAULT_CHUNK_SIZE;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Connection settings for one commerce project.
#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    /// API base URL, e.g. `https://api.europe-west1.gcp.commercetools.com`
    pub host: String,
    /// OAuth base URL, e.g. `https://auth.europe-west1.gcp.commercetools.com`
    pub auth_host: String,
    pub project_key: String,
    pub client_id: String,
    pub client_secret: String,
    /// Defaults to `manage_project:{project_key}`
    #[serde(default)]
    pub scope: Option<String>,
}

impl ApiConfig {
    /// Reads a JSON file with the fields of [`ApiConfig`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ExtractError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| ExtractError::Config(e.to_string()))
    }

    /// Reads the `CTP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| ExtractError::Config(format!("{} is not set", key)))
        };

        Ok(ApiConfig {
            host: required("CTP_API_URL")?,
            auth_host: required("CTP_AUTH_URL")?,
            project_key: required("CTP_PROJECT_KEY")?,
            client_id: required("CTP_CLIENT_ID")?,
            client_secret: required("CTP_CLIENT_SECRET")?,
            scope: lookup("CTP_SCOPES"),
        })
    }

    pub fn scope(&self) -> String {
        self.scope
            .clone()
            .unwrap_or_else(|| format!("manage_project:{}", self.project_key))
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("auth_host", &self.auth_host)
            .field("project_key", &self.project_key)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}

/// Whether product projections are read from the staged or the current version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Staged {
    True,
    #[default]
    False,
}

impl Staged {
    pub fn as_str(self) -> &'static str {
        match self {
            Staged::True => "true",
            Staged::False => "false",
        }
    }
}

impl FromStr for Staged {
    type Err = ExtractError;

    /// Accepts exactly `"true"` or `"false"`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "true" => Ok(Staged::True),
            "false" => Ok(Staged::False),
            other => Err(ExtractError::invalid(format!(
                "staged has to be either true or false (got {:?})",
                other
            ))),
        }
    }
}

impl fmt::Display for Staged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options shared by all entity extraction calls.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Number of items to fetch (line items are not counted for orders: records are)
    pub nr_items: i64,

    pub offset: u64,

    /// Records requested per page
    pub chunk_size: u64,

    /// Locales for localized columns (ignored by customers)
    pub languages: Vec<String>,

    /// Currencies for price columns (products only)
    pub currencies: Vec<String>,

    /// Products only
    pub staged: Staged,

    /// Log chunk progress at info level instead of debug
    pub verbose: bool,
}

impl ExtractOptions {
    pub fn new(nr_items: i64) -> Self {
        ExtractOptions {
            nr_items,
            ..Default::default()
        }
    }

    /// Sets `staged` from its literal string form.
    pub fn with_staged(mut self, staged: &str) -> Result<Self> {
        self.staged = staged.parse()?;
        Ok(self)
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            nr_items: 1,
            offset: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
            languages: vec!["en".to_string(), "de".to_string()],
            currencies: vec!["USD".to_string(), "EUR".to_string()],
            staged: Staged::False,
            verbose: true,
        }
    }
}
