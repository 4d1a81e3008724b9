//! The `watch` subcommand: interactive year/province input driving the
//! acquisition controller.
//!
//! Each stdin line is a new year (debounced like keystrokes), or
//! `province <code|name>` / `p <code|name>` to switch province, or `quit`.

use anyhow::Result;
use canholidays_lib::province;
use canholidays_lib::{
    AcquisitionController, AcquisitionSnapshot, Config, NagerHolidaySource, Phase, ViewModel,
    ViewPhase,
};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output::{print_view, OutputFormat};

#[derive(Args)]
pub struct WatchArgs {
    /// Year to load first (defaults to CANHOLIDAYS_YEAR or 2025)
    #[arg(long)]
    pub year: Option<String>,

    /// Province to start with, code or name
    #[arg(long)]
    pub province: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Year(String),
    Province(String),
    Quit,
}

fn parse_line(line: &str) -> Input {
    let line = line.trim();
    if matches!(line, "quit" | "exit" | "q") {
        return Input::Quit;
    }
    let rest = line
        .strip_prefix("province ")
        .or_else(|| line.strip_prefix("p "));
    match rest {
        Some(name) => {
            let name = name.trim();
            // Names are mapped to codes the way the selector would; anything
            // unknown is passed through and ignored by the controller.
            let code = province::resolve(name).map(|p| p.code.to_string());
            Input::Province(code.unwrap_or_else(|| name.to_string()))
        }
        None => Input::Year(line.to_string()),
    }
}

pub async fn run(args: &WatchArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let mut config = config.clone();
    config.initial_province = super::province_arg(args.province.as_deref(), &config)?;
    if let Some(year) = &args.year {
        config.initial_year = year.clone();
    }

    let source = NagerHolidaySource::with_base_url(&config.base_url)
        .with_timeout(config.request_timeout);
    let handle = AcquisitionController::spawn(source, &config);
    let mut snapshots = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!("Type a year, 'province <code|name>', or 'quit'.");

    // With stdin closed (e.g. piped input) keep running until the last input settles.
    let mut input_closed = false;
    let mut typed_year = config.initial_year.clone();
    loop {
        tokio::select! {
            line = lines.next_line(), if !input_closed => match line? {
                None => {
                    input_closed = true;
                    if is_settled(&handle.snapshot(), &typed_year) {
                        break;
                    }
                }
                Some(line) => match parse_line(&line) {
                    Input::Quit => break,
                    Input::Year(year) => {
                        typed_year = year.clone();
                        handle.set_year(year)?;
                    }
                    Input::Province(code) => {
                        if province::by_code(&code).is_none() {
                            eprintln!("Unknown province '{}'", code);
                        }
                        handle.select_province(code)?;
                    }
                },
            },
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                render(&ViewModel::from(&snapshot), format)?;
                if input_closed && is_settled(&snapshot, &typed_year) {
                    break;
                }
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}

/// The last typed year has been fetched (or failed) and nothing is loading.
fn is_settled(snapshot: &AcquisitionSnapshot, typed_year: &str) -> bool {
    !matches!(snapshot.phase, Phase::Idle | Phase::Loading)
        && snapshot.year == typed_year
        && snapshot.debounced_year == typed_year
}

fn render(view: &ViewModel, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_view(view, format);
    }
    eprintln!("{}", status_line(view));
    if view.phase == ViewPhase::Ready {
        print_view(view, format)?;
    }
    Ok(())
}

/// One stderr line describing the view; the error message names its own cause.
fn status_line(view: &ViewModel) -> String {
    match view.phase {
        ViewPhase::Loading => format!("Loading holidays for {}...", view.year),
        ViewPhase::Error => view
            .message
            .clone()
            .unwrap_or_else(|| format!("Could not load holidays for {}", view.year)),
        ViewPhase::Ready => view.heading.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canholidays_lib::FetchFailure;

    #[test]
    fn status_line_follows_failure_kind() {
        let ontario = province::by_code("CA-ON").unwrap();

        let network = ViewModel::failed(
            "2025",
            ontario,
            &FetchFailure::RequestFailed {
                year: "2025".to_string(),
            },
        );
        let line = status_line(&network);
        assert!(!line.contains("Invalid Year"));
        assert!(line.contains("request failed"));
        assert!(line.contains("2025"));

        let invalid = ViewModel::failed(
            "abcd",
            ontario,
            &FetchFailure::InvalidYear {
                year: "abcd".to_string(),
            },
        );
        assert!(status_line(&invalid).contains("The year: abcd is not supported"));
    }

    #[test]
    fn status_line_for_loading_and_ready() {
        let ontario = province::by_code("CA-ON").unwrap();
        let ready = ViewModel::ready("2025", ontario, &[]);
        assert_eq!(
            status_line(&ready),
            "Public Holidays in Ontario for Calendar year 2025"
        );
    }

    #[test]
    fn plain_text_is_a_year() {
        assert_eq!(parse_line("2026\n"), Input::Year("2026".to_string()));
        assert_eq!(parse_line("abcd"), Input::Year("abcd".to_string()));
    }

    #[test]
    fn province_by_code_or_name() {
        assert_eq!(
            parse_line("province CA-QC"),
            Input::Province("CA-QC".to_string())
        );
        assert_eq!(
            parse_line("p british columbia"),
            Input::Province("CA-BC".to_string())
        );
    }

    #[test]
    fn unknown_province_passes_through() {
        assert_eq!(
            parse_line("p Atlantis"),
            Input::Province("Atlantis".to_string())
        );
    }

    #[test]
    fn quit_words() {
        assert_eq!(parse_line("quit"), Input::Quit);
        assert_eq!(parse_line(" exit "), Input::Quit);
    }
}
