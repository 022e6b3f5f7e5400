//! Process configuration, read from the environment after `.env` is loaded.

use std::env;
use std::path::PathBuf;

use crate::error::{CornerError, CornerResult};
use crate::models::settings::Settings;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where the JSON ledger snapshot lives
    pub data_file: PathBuf,
    /// Overrides the stored minimum value per day for every report
    pub minimum_value: Option<f64>,
}

impl Config {
    pub const DATA_FILE: &'static str = "CORNER_DATA";
    pub const MINIMUM_VALUE: &'static str = "CORNER_MINIMUM_VALUE";

    pub fn from_env() -> CornerResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> CornerResult<Self> {
        let data_file = lookup(Self::DATA_FILE)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .ok_or(CornerError::MissingVariable(Self::DATA_FILE))?;

        let minimum_value = lookup(Self::MINIMUM_VALUE)
            .map(|raw| {
                raw.trim()
                    .parse::<f64>()
                    .ok()
                    .and_then(|value| Settings::check_minimum_value(value).ok())
                    .ok_or(CornerError::InvalidVariable {
                        name: Self::MINIMUM_VALUE,
                        value: raw,
                    })
            })
            .transpose()?;

        Ok(Self {
            data_file,
            minimum_value,
        })
    }
}
