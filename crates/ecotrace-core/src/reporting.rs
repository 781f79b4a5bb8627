//! Waste hotspot reporting.
//!
//! Reports live only in memory for the lifetime of the process. Filing one
//! needs an active session and earns it [`REPORT_REWARD_POINTS`].

use chrono::{Duration, Utc};

use crate::error::{Error, Result, require_non_empty};
use crate::session::SessionStore;
use crate::storage::SessionStorage;
use crate::types::{ANONYMOUS_REPORTER, ReportId, ReportStatus, WasteReport, WasteType};

/// Points awarded for each submitted report.
pub const REPORT_REWARD_POINTS: u64 = 50;

/// In-memory collection of waste reports. Reports are never removed.
#[derive(Debug, Clone, Default)]
pub struct WasteReports {
    reports: Vec<WasteReport>,
}

impl WasteReports {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection seeded with the sample hotspots.
    pub fn with_demo_data() -> Self {
        let now = Utc::now();
        Self {
            reports: vec![
                WasteReport {
                    id: ReportId::new(),
                    waste_type: WasteType::Plastic,
                    location: "Sector 18, Noida".to_string(),
                    reporter: ANONYMOUS_REPORTER.to_string(),
                    timestamp: now - Duration::hours(2),
                    status: ReportStatus::Reported,
                },
                WasteReport {
                    id: ReportId::new(),
                    waste_type: WasteType::Organic,
                    location: "MG Road, Bangalore".to_string(),
                    reporter: "EcoWarrior123".to_string(),
                    timestamp: now - Duration::hours(4),
                    status: ReportStatus::InProgress,
                },
            ],
        }
    }

    /// Files a report as the active session and rewards it.
    ///
    /// `waste_type` is free text parsed with [`WasteType::parse`]. Blank type
    /// or location is rejected with [`Error::Validation`], and a missing
    /// session with [`Error::NoActiveSession`]; in both cases the collection
    /// is unchanged.
    pub fn submit_report<S: SessionStorage>(
        &mut self,
        waste_type: &str,
        location: &str,
        sessions: &mut SessionStore<S>,
    ) -> Result<WasteReport> {
        let Some(waste_type) = WasteType::parse(waste_type) else {
            return Err(Error::validation_field("type", "must not be empty"));
        };
        require_non_empty("location", location)?;

        let reporter = sessions
            .current()
            .map(|session| session.name.clone())
            .ok_or(Error::NoActiveSession)?;

        let report = WasteReport::new(waste_type, location.trim(), reporter);
        sessions.award_points(REPORT_REWARD_POINTS)?;
        self.reports.push(report.clone());

        tracing::info!(
            report_id = %report.id,
            waste_type = %report.waste_type,
            location = %report.location,
            "Waste report submitted"
        );
        Ok(report)
    }

    /// All reports, oldest first.
    pub fn all(&self) -> &[WasteReport] {
        &self.reports
    }

    /// Reports of one type, or all reports for `None`.
    pub fn filter(&self, waste_type: Option<WasteType>) -> Vec<&WasteReport> {
        self.reports
            .iter()
            .filter(|report| waste_type.is_none_or(|t| report.waste_type == t))
            .collect()
    }

    /// Number of reports.
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Returns `true` if there are no reports.
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
