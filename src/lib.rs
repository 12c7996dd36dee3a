pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod rest;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::meta::MetaAdsClient;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::relay::SpendRelay;
pub use crate::core::resolver::{classify, resolve, RangeRule, Resolution};
pub use crate::domain::model::{CalendarDay, DateRange, SpendReport};
pub use crate::utils::error::{RelayError, Result};
