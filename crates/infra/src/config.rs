//! Configuration loading and representation.
//!
//! The domain crates read nothing from the environment; the binary resolves a
//! `ShopConfig` once at startup and builds the session from it.
//!
//! | variable | meaning | default |
//! |----------|---------|---------|
//! | `FRUITSHOP_SALES_LOG` | invoice log path | `sales.txt` |
//! | `FRUITSHOP_CATALOG` | JSON catalog file | built-in fruit list |
//! | `FRUITSHOP_UNKNOWN_ITEMS` | `reject` or `ignore` | `reject` |

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use fruitshop_inventory::Catalog;
use fruitshop_sales::{Session, UnknownItemPolicy};

pub const SALES_LOG_VAR: &str = "FRUITSHOP_SALES_LOG";
pub const CATALOG_VAR: &str = "FRUITSHOP_CATALOG";
pub const UNKNOWN_ITEMS_VAR: &str = "FRUITSHOP_UNKNOWN_ITEMS";

pub const DEFAULT_SALES_LOG: &str = "sales.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read catalog {path}: {source}")]
    ReadCatalog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog {path}: {source}")]
    ParseCatalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    pub sales_log_path: PathBuf,
    pub catalog: Catalog,
    pub unknown_item_policy: UnknownItemPolicy,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            sales_log_path: PathBuf::from(DEFAULT_SALES_LOG),
            catalog: Catalog::fruit_shop(),
            unknown_item_policy: UnknownItemPolicy::default(),
        }
    }
}

impl ShopConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve using `lookup` for variable values. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(SALES_LOG_VAR) {
            config.sales_log_path = PathBuf::from(path);
        }

        if let Some(path) = get(CATALOG_VAR) {
            config.catalog = load_catalog(Path::new(&path))?;
        }

        if let Some(policy) = get(UNKNOWN_ITEMS_VAR) {
            config.unknown_item_policy =
                policy.parse().map_err(|err| ConfigError::InvalidValue {
                    var: UNKNOWN_ITEMS_VAR,
                    reason: format!("{err}"),
                })?;
        }

        Ok(config)
    }

    /// A fresh session over the configured catalog.
    pub fn build_session(&self) -> Session {
        Session::new(self.catalog.clone()).with_unknown_item_policy(self.unknown_item_policy)
    }
}

/// Read a JSON catalog: a list of `{name, price, stock, unit, icon?}` objects.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadCatalog {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| ConfigError::ParseCatalog {
        path: path.to_path_buf(),
        source,
    })
}
