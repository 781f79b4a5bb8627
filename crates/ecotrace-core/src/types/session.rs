//! User session record and the inputs used to create one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Badge granted to every newly registered account.
pub const STARTER_BADGE: &str = "Welcome Warrior";

/// Points a newly registered account starts with.
pub const STARTING_POINTS: u64 = 100;

/// The signed-in user, as persisted under the session storage key.
///
/// Field names serialize in camelCase so the record matches what the web
/// client keeps in `localStorage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    /// Opaque identifier, fixed at creation
    pub id: UserId,

    /// Email address the user signed in with
    pub email: String,

    /// Display name
    pub name: String,

    /// Given name (registered accounts only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Family name (registered accounts only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Community the user joined at registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,

    /// Reward points; only ever increases
    pub points: u64,

    /// Latest monthly CO2-equivalent estimate in kg
    pub carbon_footprint: f64,

    /// Waste diverted, in kg
    pub waste_reduced: f64,

    /// Position on the community leaderboard; 0 when unranked
    pub community_rank: u32,

    /// When the session was created
    pub join_date: DateTime<Utc>,

    /// Earned badges, in award order
    #[serde(default)]
    pub badges: Vec<String>,

    /// Joined challenges, in join order
    #[serde(default)]
    pub challenges: Vec<String>,
}

impl UserSession {
    /// Appends a challenge unless the session already joined it.
    pub fn join_challenge(&mut self, challenge: impl Into<String>) -> bool {
        push_unique(&mut self.challenges, challenge.into())
    }
}

fn push_unique(set: &mut Vec<String>, value: String) -> bool {
    if set.contains(&value) {
        return false;
    }
    set.push(value);
    true
}

/// Who the session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    /// Email address; required
    pub email: String,
    /// Display name; required
    pub name: String,
    /// Optional profile captured at registration
    pub profile: Option<Profile>,
}

impl Identity {
    /// Creates an identity with no registration profile.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            profile: None,
        }
    }

    /// Attaches a registration profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }
}

/// Registration details kept on the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Community joined
    pub community: String,
}

/// Starting statistics for a new session.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialStats {
    /// Starting points
    pub points: u64,
    /// Starting footprint in kg CO2e per month
    pub carbon_footprint: f64,
    /// Starting waste reduced in kg
    pub waste_reduced: f64,
    /// Starting community rank
    pub community_rank: u32,
    /// Starting badges
    pub badges: Vec<String>,
}

impl InitialStats {
    /// Defaults for a freshly registered account.
    ///
    /// # Examples
    ///
    /// ```
    /// use ecotrace_core::InitialStats;
    ///
    /// let stats = InitialStats::registration();
    /// assert_eq!(stats.points, 100);
    /// assert_eq!(stats.badges, vec!["Welcome Warrior".to_string()]);
    /// ```
    pub fn registration() -> Self {
        Self {
            points: STARTING_POINTS,
            carbon_footprint: 0.0,
            waste_reduced: 0.0,
            community_rank: 0,
            badges: vec![STARTER_BADGE.to_string()],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> UserSession {
        UserSession {
            id: UserId::from("abc123xyz"),
            email: "jane@example.com".to_string(),
            name: "Jane Doe".to_string(),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            community: Some("Noida".to_string()),
            points: 100,
            carbon_footprint: 0.0,
            waste_reduced: 0.0,
            community_rank: 0,
            join_date: Utc::now(),
            badges: vec![STARTER_BADGE.to_string()],
            challenges: Vec::new(),
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("carbonFootprint").is_some());
        assert!(json.get("wasteReduced").is_some());
        assert!(json.get("communityRank").is_some());
        assert!(json.get("joinDate").is_some());
        assert!(json.get("firstName").is_some());
    }

    #[test]
    fn test_login_record_without_profile_or_badges_loads() {
        let json = r#"{
            "id": "k3j9x0a2b",
            "email": "sam@example.com",
            "name": "sam",
            "points": 4521,
            "carbonFootprint": 187,
            "wasteReduced": 23,
            "communityRank": 12,
            "joinDate": "2024-03-01T10:00:00.000Z"
        }"#;
        let session: UserSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.points, 4521);
        assert_eq!(session.carbon_footprint, 187.0);
        assert!(session.badges.is_empty());
        assert!(session.challenges.is_empty());
        assert!(session.first_name.is_none());
    }

    #[test]
    fn test_join_challenge_once() {
        let mut session = sample();
        assert!(session.join_challenge("Zero Waste Day"));
        assert!(!session.join_challenge("Zero Waste Day"));
        assert_eq!(session.challenges.len(), 1);
    }

    #[test]
    fn test_identity_builder() {
        let identity = Identity::new("a@b.c", "A B").with_profile(Profile {
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            community: "Delhi".to_string(),
        });
        assert_eq!(identity.profile.unwrap().community, "Delhi");
    }
}
