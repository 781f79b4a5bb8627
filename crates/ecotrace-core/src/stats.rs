//! Source of user statistics that have no real backend yet.
//!
//! Login hands out starting statistics and the dashboard fills gaps in a
//! session (no footprint yet, no rank) from a [`StatsSource`]. The shipped
//! [`RandomStats`] makes numbers up; [`FixedStats`] returns constants for
//! tests and demos.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::types::{Challenge, InitialStats};

/// Supplies statistics the session store cannot compute itself.
pub trait StatsSource {
    /// Starting statistics for a session created by logging in.
    fn login_stats(&self) -> InitialStats;

    /// Footprint to display when the session has none recorded.
    fn fallback_footprint(&self) -> f64;

    /// Waste reduced to display when the session has none recorded.
    fn fallback_waste_reduced(&self) -> f64;

    /// Rank to display when the session is unranked.
    fn fallback_rank(&self) -> u32;

    /// Completion percentage, 0 to 100, for a challenge.
    fn challenge_progress(&self, challenge: &Challenge) -> u8;
}

/// Random mock statistics.
#[derive(Debug, Clone)]
pub struct RandomStats {
    /// Range for login points
    pub points: RangeInclusive<u64>,
    /// Range for login and fallback footprint, in whole kg
    pub footprint: RangeInclusive<u32>,
    /// Range for login and fallback waste reduced, in whole kg
    pub waste_reduced: RangeInclusive<u32>,
    /// Range for login and fallback rank
    pub rank: RangeInclusive<u32>,
}

impl Default for RandomStats {
    fn default() -> Self {
        Self {
            points: 1000..=10_999,
            footprint: 100..=299,
            waste_reduced: 10..=59,
            rank: 1..=100,
        }
    }
}

impl RandomStats {
    /// Creates a source with the default ranges.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsSource for RandomStats {
    fn login_stats(&self) -> InitialStats {
        InitialStats {
            points: rand::thread_rng().gen_range(self.points.clone()),
            carbon_footprint: self.fallback_footprint(),
            waste_reduced: self.fallback_waste_reduced(),
            community_rank: self.fallback_rank(),
            badges: Vec::new(),
        }
    }

    fn fallback_footprint(&self) -> f64 {
        f64::from(rand::thread_rng().gen_range(self.footprint.clone()))
    }

    fn fallback_waste_reduced(&self) -> f64 {
        f64::from(rand::thread_rng().gen_range(self.waste_reduced.clone()))
    }

    fn fallback_rank(&self) -> u32 {
        rand::thread_rng().gen_range(self.rank.clone())
    }

    fn challenge_progress(&self, _challenge: &Challenge) -> u8 {
        rand::thread_rng().gen_range(0..=99)
    }
}

/// Deterministic statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedStats {
    /// Login points
    pub points: u64,
    /// Login and fallback footprint
    pub footprint: f64,
    /// Login and fallback waste reduced
    pub waste_reduced: f64,
    /// Login and fallback rank
    pub rank: u32,
    /// Progress reported for every challenge
    pub progress: u8,
}

impl Default for FixedStats {
    fn default() -> Self {
        Self {
            points: 2500,
            footprint: 150.0,
            waste_reduced: 20.0,
            rank: 42,
            progress: 50,
        }
    }
}

impl StatsSource for FixedStats {
    fn login_stats(&self) -> InitialStats {
        InitialStats {
            points: self.points,
            carbon_footprint: self.footprint,
            waste_reduced: self.waste_reduced,
            community_rank: self.rank,
            badges: Vec::new(),
        }
    }

    fn fallback_footprint(&self) -> f64 {
        self.footprint
    }

    fn fallback_waste_reduced(&self) -> f64 {
        self.waste_reduced
    }

    fn fallback_rank(&self) -> u32 {
        self.rank
    }

    fn challenge_progress(&self, _challenge: &Challenge) -> u8 {
        self.progress.min(100)
    }
}
