//! The `list` subcommand: fetch one year once and print a province's holidays.

use anyhow::{bail, Result};
use canholidays_lib::{filter, Config, FetchFailure, HolidaySource, NagerHolidaySource, ViewModel};
use clap::Args;

use crate::output::{print_view, OutputFormat};

#[derive(Args)]
pub struct ListArgs {
    /// Calendar year (defaults to CANHOLIDAYS_YEAR or 2025)
    #[arg(long)]
    pub year: Option<String>,

    /// Province code or name, e.g. CA-QC or Quebec
    #[arg(long)]
    pub province: Option<String>,
}

pub async fn run(args: &ListArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let province = super::province_arg(args.province.as_deref(), config)?;
    let year = args
        .year
        .clone()
        .unwrap_or_else(|| config.initial_year.clone());

    let source = NagerHolidaySource::with_base_url(&config.base_url)
        .with_timeout(config.request_timeout);

    match source.fetch_year(&year).await {
        Ok(all) => {
            let visible = filter::project(&all, province);
            let view = ViewModel::ready(&year, province, &visible);
            eprintln!("{} ({} of {})", view.heading, visible.len(), all.len());
            print_view(&view, format)?;
            Ok(())
        }
        Err(err) => {
            let view = ViewModel::failed(&year, province, &FetchFailure::from(&err));
            if format == OutputFormat::Json {
                print_view(&view, format)?;
            }
            bail!("{}", view.message.unwrap_or_else(|| err.to_string()))
        }
    }
}
