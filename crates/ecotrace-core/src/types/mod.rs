//! Core types for EcoTrace.

mod challenge;
mod ids;
mod report;
mod session;

pub use challenge::Challenge;
pub use ids::{ReportId, UserId};
pub use report::{ANONYMOUS_REPORTER, ReportStatus, WasteReport, WasteType};
pub use session::{
    Identity, InitialStats, Profile, STARTER_BADGE, STARTING_POINTS, UserSession,
};
