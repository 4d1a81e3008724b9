//! The `provinces` subcommand: list selectable provinces and territories.

use anyhow::Result;
use canholidays_lib::PROVINCES;

use crate::output::{print_provinces, OutputFormat};

pub fn run(format: OutputFormat) -> Result<()> {
    print_provinces(PROVINCES, format)
}
