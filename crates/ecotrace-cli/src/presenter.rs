//! Terminal implementation of the presentation boundary.

use std::cell::RefCell;
use std::io::{self, Write};

use ecotrace_core::{Dashboard, Notice, Presenter, Severity};

/// Writes notices as tagged lines.
///
/// Dashboard refreshes are only logged; the `dashboard` command prints the
/// dashboard on request. Notices are not timed out on a terminal.
pub struct TerminalPresenter<W: Write> {
    out: RefCell<W>,
}

impl TerminalPresenter<io::Stdout> {
    /// Presenter writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    /// Presenter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn notify(&self, notice: &Notice) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = writeln!(out, "{}", format_notice(notice)) {
            tracing::warn!(error = %e, "Could not write notice");
        }
    }

    fn refresh(&self, dashboard: &Dashboard) {
        tracing::debug!(
            user = %dashboard.user_name,
            points = dashboard.points,
            carbon_footprint = dashboard.carbon_footprint,
            "Dashboard refreshed"
        );
    }
}

/// One line per notice, tagged with its severity.
pub fn format_notice(notice: &Notice) -> String {
    let tag = match notice.severity {
        Severity::Success => "ok",
        Severity::Error => "error",
        Severity::Info => "info",
    };
    format!("[{tag}] {}", notice.message)
}
