//! Application state and the boundary to presentation.
//!
//! [`EcoTrace`] bundles everything a front end needs: the session store, the
//! waste report collection, the challenge list, a [`StatsSource`] for mocked
//! numbers, and a [`Presenter`] to show notices and refresh the dashboard.
//! It is created once at start-up with [`EcoTrace::init`] and torn down per
//! user with [`EcoTrace::logout`].

use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::estimator::{
    BASELINE_KG_PER_MONTH, FootprintEstimate, FootprintInput, compute_footprint,
};
use crate::reporting::{REPORT_REWARD_POINTS, WasteReports};
use crate::session::SessionStore;
use crate::stats::StatsSource;
use crate::storage::SessionStorage;
use crate::types::{
    Challenge, Identity, InitialStats, Profile, UserSession, WasteReport, WasteType,
};

/// How long a notice stays on screen before it dismisses itself.
pub const NOTICE_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Number of members in the community leaderboard.
pub const COMMUNITY_SIZE: u32 = 342;

/// Share of diverted waste that was composted rather than recycled.
pub const COMPOSTED_SHARE: f64 = 0.3;

const FILL_ALL_FIELDS: &str = "Please fill in all fields.";

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something worked
    Success,
    /// Something the user did was rejected
    Error,
    /// Neutral information
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A short message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Severity tag
    pub severity: Severity,
    /// Message text
    pub message: String,
    /// Suggested display time
    #[serde(skip)]
    pub dismiss_after: Duration,
}

impl Notice {
    /// Creates a notice with the default dismiss delay.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            dismiss_after: NOTICE_DISMISS_AFTER,
        }
    }

    /// Creates a success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    /// Creates an error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Creates an info notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }
}

/// Presentation layer the core reports back to.
pub trait Presenter {
    /// Shows a short message.
    fn notify(&self, notice: &Notice);

    /// Redraws whatever shows session data.
    fn refresh(&self, dashboard: &Dashboard);
}

impl<P: Presenter + ?Sized> Presenter for Rc<P> {
    fn notify(&self, notice: &Notice) {
        (**self).notify(notice);
    }

    fn refresh(&self, dashboard: &Dashboard) {
        (**self).refresh(dashboard);
    }
}

/// Presenter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn notify(&self, _notice: &Notice) {}

    fn refresh(&self, _dashboard: &Dashboard) {}
}

/// Progress on one challenge, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeProgress {
    /// Challenge name
    pub name: String,
    /// Completion percentage
    pub percent: u8,
}

/// Everything the dashboard displays for the active session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Display name
    pub user_name: String,
    /// Monthly footprint in kg CO2e
    pub carbon_footprint: f64,
    /// How far below the baseline the footprint is, in percent; 0 when above
    pub improvement_percent: f64,
    /// Waste recycled, in kg
    pub recycled_kg: f64,
    /// Waste composted, in whole kg
    pub composted_kg: f64,
    /// Leaderboard position
    pub community_rank: u32,
    /// Leaderboard size
    pub community_size: u32,
    /// Reward points
    pub points: u64,
    /// Challenge progress bars
    pub challenges: Vec<ChallengeProgress>,
}

/// Login form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Email address
    pub email: String,
    /// Password; required but never stored
    pub password: String,
}

impl LoginForm {
    /// Checks that every field is filled in.
    pub fn validate(&self) -> Result<()> {
        all_filled(&[&self.email, &self.password])
    }

    /// Display name derived from the email's local part.
    pub fn display_name(&self) -> &str {
        let email = self.email.trim();
        email.split('@').next().unwrap_or(email)
    }
}

/// Registration form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Password; required but never stored
    pub password: String,
    /// Community to join
    pub community: String,
}

impl RegistrationForm {
    /// Checks that every field is filled in.
    pub fn validate(&self) -> Result<()> {
        all_filled(&[
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.password,
            &self.community,
        ])
    }

    fn identity(&self) -> Identity {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        Identity::new(self.email.trim(), format!("{first_name} {last_name}")).with_profile(
            Profile {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                community: self.community.trim().to_string(),
            },
        )
    }
}

fn all_filled(fields: &[&String]) -> Result<()> {
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(Error::validation(FILL_ALL_FIELDS));
    }
    Ok(())
}

/// EcoTrace application state.
pub struct EcoTrace<S: SessionStorage> {
    sessions: SessionStore<S>,
    reports: WasteReports,
    challenges: Vec<Challenge>,
    stats: Box<dyn StatsSource>,
    presenter: Box<dyn Presenter>,
}

impl<S: SessionStorage> EcoTrace<S> {
    /// Starts the application.
    ///
    /// `sessions` should come from [`SessionStore::init`] so a persisted
    /// session is already restored. Demo reports and challenges are loaded,
    /// and the dashboard is drawn if someone is signed in.
    pub fn init(
        sessions: SessionStore<S>,
        stats: Box<dyn StatsSource>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        let app = Self {
            sessions,
            reports: WasteReports::with_demo_data(),
            challenges: Challenge::demo(),
            stats,
            presenter,
        };
        tracing::info!(
            signed_in = app.sessions.is_active(),
            reports = app.reports.len(),
            "EcoTrace started"
        );
        app.refresh();
        app
    }

    /// The active session, if any.
    pub fn current_user(&self) -> Option<&UserSession> {
        self.sessions.current()
    }

    /// The session store.
    pub fn sessions(&self) -> &SessionStore<S> {
        &self.sessions
    }

    /// The waste report collection.
    pub fn reports(&self) -> &WasteReports {
        &self.reports
    }

    /// The community challenges.
    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    /// Signs in with mocked statistics from the stats source.
    pub fn login(&mut self, form: &LoginForm) -> Result<UserSession> {
        if let Err(e) = form.validate() {
            return self.fail(e);
        }
        let identity = Identity::new(form.email.trim(), form.display_name());
        let stats = self.stats.login_stats();
        let session = match self.sessions.create_session(identity, stats) {
            Ok(session) => session,
            Err(e) => return self.fail(e),
        };
        self.presenter
            .notify(&Notice::success("Welcome back! Login successful."));
        self.refresh();
        Ok(session)
    }

    /// Creates an account and signs in with registration defaults.
    pub fn register(&mut self, form: &RegistrationForm) -> Result<UserSession> {
        if let Err(e) = form.validate() {
            return self.fail(e);
        }
        let session = match self
            .sessions
            .create_session(form.identity(), InitialStats::registration())
        {
            Ok(session) => session,
            Err(e) => return self.fail(e),
        };
        self.presenter.notify(&Notice::success(
            "Account created successfully! Welcome to EcoTrace.",
        ));
        self.refresh();
        Ok(session)
    }

    /// Signs out and deletes the stored session.
    pub fn logout(&mut self) -> Result<()> {
        self.sessions.clear_session()?;
        self.presenter.notify(&Notice::info("Logged out successfully."));
        Ok(())
    }

    /// Estimates the monthly footprint and, when signed in, records it.
    pub fn calculate(&mut self, input: &FootprintInput) -> Result<FootprintEstimate> {
        let estimate = compute_footprint(input);
        tracing::info!(
            total = estimate.total,
            standing = ?estimate.comparison.standing,
            "Computed footprint"
        );
        if !self.sessions.is_active() {
            return Ok(estimate);
        }
        if let Err(e) = self.sessions.update_carbon_footprint(estimate.total) {
            return self.fail(e);
        }
        self.refresh();
        Ok(estimate)
    }

    /// Files a waste report for the active session.
    ///
    /// Returns [`Error::NoActiveSession`] without notifying when nobody is
    /// signed in; presentation should send the user to login instead.
    pub fn report_waste(&mut self, waste_type: &str, location: &str) -> Result<WasteReport> {
        if !self.sessions.is_active() {
            return Err(Error::NoActiveSession);
        }
        let report = match self
            .reports
            .submit_report(waste_type, location, &mut self.sessions)
        {
            Ok(report) => report,
            Err(e) => return self.fail(e),
        };
        let total = self.sessions.current().map_or(0, |s| s.points);
        self.presenter.notify(&Notice::success(format!(
            "Waste report submitted! You earned {REPORT_REWARD_POINTS} points. Total: {total}"
        )));
        self.refresh();
        Ok(report)
    }

    /// Reports shown on the map for a filter; `None` shows every type.
    pub fn filter_reports(&self, waste_type: Option<WasteType>) -> Vec<&WasteReport> {
        let label = waste_type.map_or_else(|| "all".to_string(), |t| t.to_string().to_lowercase());
        self.presenter
            .notify(&Notice::info(format!("Filtering waste map for: {label}")));
        self.reports.filter(waste_type)
    }

    /// Joins a challenge by id.
    ///
    /// Returns `false` if the session had already joined it.
    pub fn join_challenge(&mut self, id: u32) -> Result<bool> {
        let Some(name) = self
            .challenges
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
        else {
            return self.fail(Error::validation(format!("Unknown challenge {id}.")));
        };
        let joined = self.sessions.join_challenge(&name)?;
        if joined {
            self.presenter
                .notify(&Notice::success(format!("Joined {name}!")));
            self.refresh();
        } else {
            self.presenter
                .notify(&Notice::info(format!("Already taking part in {name}.")));
        }
        Ok(joined)
    }

    /// Builds the dashboard for the active session.
    pub fn dashboard(&self) -> Result<Dashboard> {
        let session = self.sessions.current().ok_or(Error::NoActiveSession)?;

        let carbon_footprint = if session.carbon_footprint > 0.0 {
            session.carbon_footprint
        } else {
            self.stats.fallback_footprint()
        };
        let improvement_percent = ((BASELINE_KG_PER_MONTH - carbon_footprint)
            / BASELINE_KG_PER_MONTH
            * 100.0)
            .max(0.0);

        let recycled_kg = if session.waste_reduced > 0.0 {
            session.waste_reduced
        } else {
            self.stats.fallback_waste_reduced()
        };
        let community_rank = if session.community_rank > 0 {
            session.community_rank
        } else {
            self.stats.fallback_rank()
        };

        let challenges = self
            .challenges
            .iter()
            .map(|challenge| ChallengeProgress {
                name: challenge.name.clone(),
                percent: self.stats.challenge_progress(challenge).min(100),
            })
            .collect();

        Ok(Dashboard {
            user_name: session.name.clone(),
            carbon_footprint,
            improvement_percent,
            recycled_kg,
            composted_kg: (recycled_kg * COMPOSTED_SHARE).floor(),
            community_rank,
            community_size: COMMUNITY_SIZE,
            points: session.points,
            challenges,
        })
    }

    fn refresh(&self) {
        if let Ok(dashboard) = self.dashboard() {
            self.presenter.refresh(&dashboard);
        }
    }

    fn fail<T>(&self, error: Error) -> Result<T> {
        if error.is_user_facing() {
            let message = match &error {
                Error::Validation { field: None, message } => message.clone(),
                Error::Validation { field: Some(_), .. } => FILL_ALL_FIELDS.to_string(),
                other => other.to_string(),
            };
            self.presenter.notify(&Notice::error(message));
        }
        Err(error)
    }
}
