// Questionnaire Wizard
// Main library entry point

pub mod models;
pub mod submit;
mod tui;
pub mod utils;
pub mod wizard;

use log::{error, info};
use std::path::{Path, PathBuf};
use utils::logging::LogLine;
use utils::settings::Settings;
use wizard::catalog;

/// Initialize logging system with dual format (JSON + human-readable)
fn init_logging(settings: &Settings, with_stdout: bool) -> anyhow::Result<PathBuf> {
    let log_dir = utils::path_resolver::resolve_log_folder(settings.log_dir.as_deref())?;

    let timestamp = chrono::Utc::now().format("%Y-%m-%d-%H%M%S");

    // JSON log file for structured parsing
    let json_log_file = log_dir.join(format!("questionnaire-{}.log", timestamp));

    // Human-readable log file (.txt)
    let txt_log_file = log_dir.join(format!("questionnaire-{}.txt", timestamp));

    // - JSON lines to .log
    // - human-readable to .txt
    // - human-readable to stdout only outside the TUI
    let mut dispatch = fern::Dispatch::new().level(settings.level_filter());

    if with_stdout {
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    let ts = chrono::Local::now()
                        .format("%Y-%m-%d %H:%M:%S%.3f")
                        .to_string();
                    let line = LogLine::parse(
                        &ts,
                        record.level(),
                        record.target(),
                        &message.to_string(),
                    );
                    out.finish(format_args!("{}", line.to_text()));
                })
                .chain(std::io::stdout()),
        );
    }

    dispatch = dispatch
        .chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    let ts = chrono::Utc::now().to_rfc3339();
                    let line = LogLine::parse(
                        &ts,
                        record.level(),
                        record.target(),
                        &message.to_string(),
                    );
                    out.finish(format_args!("{}", line.to_json()));
                })
                .chain(fern::log_file(json_log_file)?),
        )
        .chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    let ts = chrono::Local::now()
                        .format("%Y-%m-%d %H:%M:%S%.3f")
                        .to_string();
                    let line = LogLine::parse(
                        &ts,
                        record.level(),
                        record.target(),
                        &message.to_string(),
                    );
                    out.finish(format_args!("{}", line.to_text()));
                })
                .chain(fern::log_file(txt_log_file)?),
        );

    dispatch.apply()?;

    info!(
        "[PHASE: initialization] Logging initialized, log directory: {:?}",
        log_dir
    );
    Ok(log_dir)
}

/// Load settings, exiting with a message when they are unusable.
fn load_settings_or_exit(config_path: Option<&Path>) -> Settings {
    match Settings::load(config_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load settings: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Shared startup for the terminal modes: settings, file logging, export folder.
fn prepare_terminal_mode(config_path: Option<&Path>, mode: &str) -> PathBuf {
    let settings = load_settings_or_exit(config_path);

    // No stdout: it would corrupt the terminal UI.
    if let Err(e) = init_logging(&settings, false) {
        eprintln!("Failed to initialize logging: {:#}", e);
    }

    info!(
        "[PHASE: initialization] {} starting at {}",
        mode,
        chrono::Utc::now()
    );
    info!(
        "[PHASE: initialization] [STEP: deployment_folder] Deployment folder: {:?}",
        utils::path_resolver::resolve_deployment_folder()
    );

    match utils::path_resolver::resolve_export_folder(settings.export_dir.as_deref()) {
        Ok(dir) => {
            info!(
                "[PHASE: initialization] [STEP: export_folder] Export folder: {:?}",
                dir
            );
            dir
        }
        Err(e) => {
            error!("[PHASE: initialization] [STEP: export_folder] {}", e);
            eprintln!("Failed to prepare export folder: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Interactive terminal questionnaire.
pub fn run_tui(config_path: Option<PathBuf>) {
    let export_dir = prepare_terminal_mode(config_path.as_deref(), "Questionnaire TUI");

    if let Err(e) = tui::run(export_dir) {
        error!("[PHASE: tui] TUI failed: {:#}", e);
        eprintln!("Questionnaire failed: {:#}", e);
        std::process::exit(1);
    }
}

/// Render one question into an in-memory backend, print the frame and exit.
pub fn run_tui_smoke(question: Option<usize>, config_path: Option<PathBuf>) {
    let export_dir = prepare_terminal_mode(config_path.as_deref(), "Questionnaire TUI smoke");

    let question = question.unwrap_or(1);
    if question == 0 || question > catalog::QUESTIONS.len() {
        eprintln!(
            "--tui-smoke expects a question number between 1 and {}",
            catalog::QUESTIONS.len()
        );
        std::process::exit(2);
    }

    match tui::smoke(export_dir, question) {
        Ok(frame) => {
            info!(
                "[PHASE: tui] [STEP: smoke] Smoke render OK for question {}",
                question
            );
            print!("{}", frame);
        }
        Err(e) => {
            error!("[PHASE: tui] [STEP: smoke] Smoke render failed: {:#}", e);
            eprintln!("TUI smoke failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Print the question list and the field schema derived from it.
pub fn run_print_catalog() {
    println!("{}", catalog_listing());
}

fn catalog_listing() -> String {
    let mut out = String::new();
    for (i, q) in catalog::QUESTIONS.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. [{}] {} - {}\n",
            i + 1,
            q.section,
            q.id,
            q.prompt
        ));
        for spec in q.fields() {
            out.push_str(&format!("      {} : {}\n", spec.path(), spec.kind.name()));
        }
    }
    out
}

/// Print the effective settings (defaults, file, environment) as TOML.
pub fn run_print_config(config_path: Option<PathBuf>) {
    let settings = load_settings_or_exit(config_path.as_deref());
    match settings.to_toml() {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_listing_names_every_question_and_field() {
        let listing = catalog_listing();
        assert!(listing.starts_with(" 1. [profile] companyName"));
        assert!(listing.contains("20. [suggestions] additionalComments"));
        assert!(listing.contains("profile.teamCount : text"));
        assert!(listing.contains("organization.topThreeIssues : ranked"));
    }
}
