//! Process configuration read from the Lambda environment.

use std::env;
use thiserror::Error;

/// Table used when `TABLE_NAME` is not set.
pub const DEFAULT_TABLE_NAME: &str = "Fatawa";

/// Invalid environment configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),
    /// A variable could not be parsed.
    #[error("{name} must be a positive integer, got `{value}`")]
    NotPositive {
        /// Variable name.
        name: &'static str,
        /// Raw value found in the environment.
        value: String,
    },
}

/// Settings the handler needs at start-up.
///
/// AWS region and credentials are not part of this: they come from the
/// default provider chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Table holding the records.
    pub table_name: String,
    /// Items evaluated per scan page; `None` leaves DynamoDB's 1 MB pages.
    pub scan_page_limit: Option<i32>,
}

impl Config {
    /// Read `TABLE_NAME` and `SCAN_PAGE_LIMIT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name = match lookup("TABLE_NAME") {
            Some(name) if name.trim().is_empty() => return Err(ConfigError::Empty("TABLE_NAME")),
            Some(name) => name,
            None => DEFAULT_TABLE_NAME.to_string(),
        };
        let scan_page_limit = lookup("SCAN_PAGE_LIMIT")
            .map(|value| {
                let parsed = value.trim().parse::<i32>();
                match parsed {
                    Ok(limit) if limit > 0 => Ok(limit),
                    _ => Err(ConfigError::NotPositive {
                        name: "SCAN_PAGE_LIMIT",
                        value,
                    }),
                }
            })
            .transpose()?;
        Ok(Self {
            table_name,
            scan_page_limit,
        })
    }
}
