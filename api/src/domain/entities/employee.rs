//! Employee domain entity
//!
//! An employee has an independent identity and takes part in two
//! many-to-many relationships: team membership and task assignment.
//! Neither relationship is stored on the employee itself.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub Uuid);

impl EmployeeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for EmployeeId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person who can join teams and be assigned to tasks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all employees
    pub email: String,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<f64>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match against first or last name
    pub fn name_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.first_name.to_lowercase().contains(&needle)
            || self.last_name.to_lowercase().contains(&needle)
    }

    /// Salary within `[min, max]`, inclusive on both ends
    #[allow(dead_code)]
    pub fn salary_between(&self, min: f64, max: f64) -> bool {
        self.salary.is_some_and(|s| s >= min && s <= max)
    }
}

/// Data needed to create an employee, or to overwrite an existing one
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_employee(first: &str, last: &str, salary: Option<f64>) -> Employee {
        Employee {
            id: EmployeeId::new(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}.{}@example.com", first, last).to_lowercase(),
            position: Some("Engineer".to_string()),
            hire_date: NaiveDate::from_ymd_opt(2021, 4, 1),
            salary,
        }
    }

    #[test]
    fn full_name_joins_parts() {
        let e = make_employee("Ada", "Lovelace", None);
        assert_eq!(e.full_name(), "Ada Lovelace");
    }

    #[test]
    fn name_contains_is_case_insensitive_on_either_name() {
        let e = make_employee("Grace", "Hopper", None);
        assert!(e.name_contains("gra"));
        assert!(e.name_contains("HOP"));
        assert!(e.name_contains("ace"));
        assert!(!e.name_contains("turing"));
    }

    #[test]
    fn salary_between_includes_bounds() {
        assert!(make_employee("A", "B", Some(1000.0)).salary_between(1000.0, 5000.0));
        assert!(make_employee("A", "B", Some(5000.0)).salary_between(1000.0, 5000.0));
        assert!(!make_employee("A", "B", Some(999.99)).salary_between(1000.0, 5000.0));
        assert!(!make_employee("A", "B", None).salary_between(0.0, 5000.0));
    }

    #[test]
    fn employee_id_display() {
        let id = EmployeeId(Uuid::nil());
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
    }
}
