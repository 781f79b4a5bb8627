//! Community challenges.

use serde::{Deserialize, Serialize};

/// A community challenge users can join for points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Numeric identifier
    pub id: u32,
    /// Short name
    pub name: String,
    /// What the challenge asks for
    pub description: String,
    /// Points awarded on completion
    pub points: u64,
    /// Current number of participants
    pub participants: u32,
    /// Human-readable time remaining
    pub time_left: String,
}

impl Challenge {
    fn new(
        id: u32,
        name: &str,
        description: &str,
        points: u64,
        participants: u32,
        time_left: &str,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            points,
            participants,
            time_left: time_left.to_string(),
        }
    }

    /// The challenges shown on a fresh start.
    pub fn demo() -> Vec<Challenge> {
        vec![
            Challenge::new(
                1,
                "Plastic-Free Week",
                "Avoid single-use plastics for a week",
                200,
                1250,
                "3 days",
            ),
            Challenge::new(
                2,
                "Green Commute Challenge",
                "Use eco-friendly transport for work",
                150,
                890,
                "1 week",
            ),
            Challenge::new(
                3,
                "Zero Waste Day",
                "Produce no waste for 24 hours",
                100,
                2100,
                "2 days",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_challenges() {
        let challenges = Challenge::demo();
        assert_eq!(challenges.len(), 3);
        assert_eq!(challenges[0].name, "Plastic-Free Week");
        assert_eq!(challenges[1].points, 150);
        assert_eq!(challenges[2].participants, 2100);
    }
}
