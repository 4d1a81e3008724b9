//! CLI subcommand implementations.

pub mod list;
pub mod provinces;
pub mod watch;

use anyhow::{anyhow, Result};
use canholidays_lib::province::{self, Province};
use canholidays_lib::Config;

/// Resolves a `--province` flag (code or label), falling back to the configured default.
pub fn province_arg(arg: Option<&str>, config: &Config) -> Result<&'static Province> {
    match arg {
        Some(input) => province::resolve(input).ok_or_else(|| {
            anyhow!(
                "unknown province '{}'. Run 'canholidays provinces' for valid codes",
                input
            )
        }),
        None => Ok(config.initial_province),
    }
}
