#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! EcoTrace Core Library
//!
//! Session model, carbon estimator and waste reporting for EcoTrace.
//!
//! # Modules
//!
//! - [`app`]: Application state and the presentation boundary
//! - [`config`]: TOML configuration
//! - [`error`]: Error types and Result alias
//! - [`estimator`]: Monthly carbon footprint calculation
//! - [`reporting`]: Waste hotspot reports
//! - [`session`]: The active session and its persistence
//! - [`stats`]: Pluggable source of mocked statistics
//! - [`storage`]: Durable key/value backends
//! - [`types`]: Data model

pub mod app;
pub mod config;
pub mod error;
pub mod estimator;
pub mod reporting;
pub mod session;
pub mod stats;
pub mod storage;
pub mod types;

mod proptests;

// Re-exports for convenience
pub use app::{
    Dashboard, EcoTrace, LoginForm, Notice, NullPresenter, Presenter, RegistrationForm, Severity,
};
pub use config::EcoTraceConfig;
pub use error::{Error, Result};
pub use estimator::{FootprintEstimate, FootprintInput, compute_footprint};
pub use reporting::WasteReports;
pub use session::SessionStore;
pub use stats::{FixedStats, RandomStats, StatsSource};
pub use storage::{FileStorage, MemoryStorage, SESSION_KEY, SessionStorage};
pub use types::{
    Challenge, Identity, InitialStats, ReportId, ReportStatus, UserId, UserSession, WasteReport,
    WasteType,
};
