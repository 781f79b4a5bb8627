//! Waste hotspot reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ReportId;

/// Reporter name shown when a report has no signed-in author.
pub const ANONYMOUS_REPORTER: &str = "Anonymous";

/// Kind of waste found at a hotspot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum WasteType {
    /// Plastic waste
    Plastic,
    /// Food and garden waste
    Organic,
    /// E-waste
    Electronic,
    /// Paper and cardboard
    Paper,
    /// Anything else
    Other,
}

impl WasteType {
    /// All known waste types, in menu order.
    pub const ALL: [WasteType; 5] = [
        WasteType::Plastic,
        WasteType::Organic,
        WasteType::Electronic,
        WasteType::Paper,
        WasteType::Other,
    ];

    /// Parses user input into a waste type.
    ///
    /// Accepts the reporting menu numbers (`"1"`..`"5"`) or the type name in
    /// any case. Unrecognized non-empty text falls into [`WasteType::Other`];
    /// blank input yields `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ecotrace_core::WasteType;
    ///
    /// assert_eq!(WasteType::parse("1"), Some(WasteType::Plastic));
    /// assert_eq!(WasteType::parse("organic"), Some(WasteType::Organic));
    /// assert_eq!(WasteType::parse("glass"), Some(WasteType::Other));
    /// assert_eq!(WasteType::parse("  "), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if let Some(index) = input.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
            && let Some(waste_type) = Self::ALL.get(index)
        {
            return Some(*waste_type);
        }
        let parsed = Self::ALL
            .into_iter()
            .find(|waste_type| waste_type.to_string().eq_ignore_ascii_case(input))
            .unwrap_or(WasteType::Other);
        Some(parsed)
    }
}

impl std::fmt::Display for WasteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WasteType::Plastic => write!(f, "Plastic"),
            WasteType::Organic => write!(f, "Organic"),
            WasteType::Electronic => write!(f, "Electronic"),
            WasteType::Paper => write!(f, "Paper"),
            WasteType::Other => write!(f, "Other"),
        }
    }
}

/// Cleanup status of a report. Reports never change status in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Newly reported
    Reported,
    /// Cleanup under way
    InProgress,
    /// Cleaned up
    Resolved,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Reported => write!(f, "reported"),
            ReportStatus::InProgress => write!(f, "in_progress"),
            ReportStatus::Resolved => write!(f, "resolved"),
        }
    }
}

/// A reported waste hotspot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteReport {
    /// Unique identifier
    pub id: ReportId,

    /// Kind of waste
    #[serde(rename = "type")]
    pub waste_type: WasteType,

    /// Free-text address or landmark
    pub location: String,

    /// Display name of the reporter
    pub reporter: String,

    /// When the report was filed
    pub timestamp: DateTime<Utc>,

    /// Cleanup status
    pub status: ReportStatus,
}

impl WasteReport {
    /// Creates a freshly filed report.
    pub fn new(
        waste_type: WasteType,
        location: impl Into<String>,
        reporter: impl Into<String>,
    ) -> Self {
        Self {
            id: ReportId::new(),
            waste_type,
            location: location.into(),
            reporter: reporter.into(),
            timestamp: Utc::now(),
            status: ReportStatus::Reported,
        }
    }

    /// Time elapsed since the report was filed.
    pub fn age(&self) -> chrono::Duration {
        Utc::now().signed_duration_since(self.timestamp)
    }
}
