use anyhow::Result;
use canholidays_lib::{HolidayView, Province, ViewModel};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "csv" => Self::Csv,
            "markdown" | "md" => Self::Markdown,
            _ => Self::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct HolidayRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Holiday")]
    #[serde(rename = "Holiday")]
    title: String,
    #[tabled(rename = "Local Name")]
    #[serde(rename = "Local Name")]
    local_name: String,
    #[tabled(rename = "Learn More")]
    #[serde(rename = "Learn More")]
    search_url: String,
}

#[derive(Tabled, Serialize)]
struct ProvinceRow {
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    code: String,
    #[tabled(rename = "Province")]
    #[serde(rename = "Province")]
    label: String,
}

// -- Row builders --

fn build_holiday_rows(holidays: &[HolidayView]) -> Vec<HolidayRow> {
    holidays
        .iter()
        .map(|h| HolidayRow {
            date: h.display_date.clone(),
            title: h.title.clone(),
            local_name: h.local_name.clone(),
            search_url: h.search_url.clone(),
        })
        .collect()
}

fn build_province_rows(provinces: &[Province]) -> Vec<ProvinceRow> {
    provinces
        .iter()
        .map(|p| ProvinceRow {
            code: p.code.to_string(),
            label: p.label.to_string(),
        })
        .collect()
}

// -- Holidays --

/// Prints the holiday rows of a ready view. JSON prints the whole view model.
pub fn print_view(view: &ViewModel, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_table(build_holiday_rows(&view.holidays), false),
        OutputFormat::Markdown => print_table(build_holiday_rows(&view.holidays), true),
        OutputFormat::Csv => print_csv(&build_holiday_rows(&view.holidays))?,
        OutputFormat::Json => print_json(view),
    }
    Ok(())
}

// -- Provinces --

pub fn print_provinces(provinces: &[Province], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_table(build_province_rows(provinces), false),
        OutputFormat::Markdown => print_table(build_province_rows(provinces), true),
        OutputFormat::Csv => print_csv(&build_province_rows(provinces))?,
        OutputFormat::Json => print_json(&provinces),
    }
    Ok(())
}

fn render_table<R: Tabled>(rows: Vec<R>, markdown: bool) -> String {
    let mut table = Table::new(rows);
    if markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

fn print_table<R: Tabled>(rows: Vec<R>, markdown: bool) {
    println!("{}", render_table(rows, markdown));
}

fn print_csv<R: Serialize>(rows: &[R]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
