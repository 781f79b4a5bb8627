//! Session commands run against the application state.

use std::io::Write;

use anyhow::Result;
use ecotrace_core::estimator::FootprintInput;
use ecotrace_core::{
    EcoTrace, EcoTraceConfig, FileStorage, LoginForm, RandomStats, RegistrationForm,
    SessionStorage, SessionStore, WasteType,
};

use crate::cli::SessionCommand;
use crate::presenter::TerminalPresenter;
use crate::render;

/// Starts the application on file storage in the configured data directory.
pub fn open(config: &EcoTraceConfig) -> EcoTrace<FileStorage> {
    let storage = FileStorage::new(config.resolved_data_dir());
    let sessions = SessionStore::init_with_key(storage, config.storage_key.clone());
    EcoTrace::init(
        sessions,
        Box::new(RandomStats::new()),
        Box::new(TerminalPresenter::stdout()),
    )
}

/// Runs one command, writing listings and summaries to `out`.
///
/// Outcomes of actions are reported through the presenter, not `out`.
pub fn execute<S: SessionStorage>(
    app: &mut EcoTrace<S>,
    command: SessionCommand,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        SessionCommand::Login { email, password } => {
            app.login(&LoginForm { email, password })?;
        }
        SessionCommand::Register {
            first_name,
            last_name,
            email,
            password,
            community,
        } => {
            app.register(&RegistrationForm {
                first_name,
                last_name,
                email,
                password,
                community,
            })?;
        }
        SessionCommand::Logout => app.logout()?,
        SessionCommand::Dashboard { json } => {
            let dashboard = app.dashboard()?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&dashboard)?)?;
            } else {
                write!(out, "{}", render::dashboard(&dashboard))?;
            }
        }
        SessionCommand::Calculate(args) => {
            let estimate = app.calculate(&FootprintInput::from_form(&args.form()))?;
            if args.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&estimate)?)?;
            } else {
                write!(out, "{}", render::estimate(&estimate))?;
            }
        }
        SessionCommand::Report {
            waste_type,
            location,
        } => {
            app.report_waste(&waste_type, &location)?;
        }
        SessionCommand::Reports { waste_type } => {
            let filter = waste_type.as_deref().and_then(parse_filter);
            for report in app.filter_reports(filter) {
                writeln!(out, "{}", render::report(report))?;
            }
        }
        SessionCommand::Challenges => {
            for challenge in app.challenges() {
                writeln!(out, "{}", render::challenge(challenge))?;
            }
        }
        SessionCommand::Join { id } => {
            app.join_challenge(id)?;
        }
    }
    Ok(())
}

/// Message to print for a failed command, if it was not already shown.
pub fn error_message(error: &anyhow::Error) -> Option<String> {
    match error.downcast_ref::<ecotrace_core::Error>() {
        // Shown as a notice.
        Some(e) if e.is_user_facing() => None,
        Some(ecotrace_core::Error::NoActiveSession) => Some(
            "Nobody is signed in. Run `ecotrace login` or `ecotrace register` first.".to_string(),
        ),
        _ => Some(format!("{error:#}")),
    }
}

fn parse_filter(raw: &str) -> Option<WasteType> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return None;
    }
    WasteType::parse(raw)
}
