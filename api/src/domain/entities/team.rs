//! Team domain entity
//!
//! A team is the root of the ownership hierarchy: it exclusively owns its
//! projects. Membership is a join relationship with employees, carried here
//! as a set of employee ids.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::employee::EmployeeId;

/// Unique identifier for a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub Uuid);

impl TeamId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TeamId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TeamId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub description: Option<String>,
    pub created_date: NaiveDate,
    /// Member employees (a set: adding twice is a no-op)
    pub member_ids: BTreeSet<EmployeeId>,
}

impl Team {
    pub fn has_member(&self, employee_id: &EmployeeId) -> bool {
        self.member_ids.contains(employee_id)
    }

    pub fn member_count(&self) -> usize {
        self.member_ids.len()
    }

    /// Case-insensitive substring match against the name
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Data needed to create a team
///
/// `created_date` defaults to the current day when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTeam {
    pub name: String,
    pub description: Option<String>,
    pub created_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_a_set() {
        let member = EmployeeId::new();
        let mut team = Team {
            id: TeamId::new(),
            name: "Platform".to_string(),
            description: None,
            created_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            member_ids: BTreeSet::new(),
        };

        team.member_ids.insert(member);
        team.member_ids.insert(member);

        assert!(team.has_member(&member));
        assert_eq!(team.member_count(), 1);
    }

    #[test]
    fn name_contains_folds_unicode_case() {
        let team = Team {
            id: TeamId::new(),
            name: "Équipe Données".to_string(),
            description: None,
            created_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            member_ids: BTreeSet::new(),
        };

        assert!(team.name_contains("équipe"));
        assert!(team.name_contains("DONNÉES"));
        assert!(!team.name_contains("e_d"));
    }

    #[test]
    fn team_id_display() {
        let id = TeamId(Uuid::nil());
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
    }
}
