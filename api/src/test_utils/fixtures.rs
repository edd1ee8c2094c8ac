//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::domain::entities::{
    Employee, EmployeeId, NewEmployee, NewProject, NewTask, NewTeam, Project, ProjectId,
    ProjectStatus, Task, TaskId, TaskPriority, TaskStatus, Team, TeamId,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Create a test employee with a specific email
pub fn test_employee(email: &str) -> Employee {
    Employee {
        id: EmployeeId::new(),
        first_name: "Test".to_string(),
        last_name: "Employee".to_string(),
        email: email.to_string(),
        position: Some("Engineer".to_string()),
        hire_date: Some(date(2023, 1, 15)),
        salary: Some(3000.0),
    }
}

/// Create a test employee with a specific name
pub fn test_employee_named(first_name: &str, last_name: &str) -> Employee {
    Employee {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        ..test_employee(&format!(
            "{}.{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ))
    }
}

/// Create a test employee with a specific salary
pub fn test_employee_with_salary(email: &str, salary: Option<f64>) -> Employee {
    Employee {
        salary,
        ..test_employee(email)
    }
}

/// Create employee input with default values
pub fn new_employee(email: &str) -> NewEmployee {
    NewEmployee {
        first_name: "New".to_string(),
        last_name: "Hire".to_string(),
        email: email.to_string(),
        position: Some("Engineer".to_string()),
        hire_date: Some(date(2024, 2, 1)),
        salary: Some(2500.0),
    }
}

/// Create a test team without members
pub fn test_team(name: &str) -> Team {
    Team {
        id: TeamId::new(),
        name: name.to_string(),
        description: Some(format!("The {} team", name)),
        created_date: date(2023, 6, 1),
        member_ids: BTreeSet::new(),
    }
}

/// Create a test team with the given members
pub fn test_team_with_members(name: &str, members: &[EmployeeId]) -> Team {
    Team {
        member_ids: members.iter().copied().collect(),
        ..test_team(name)
    }
}

pub fn new_team(name: &str) -> NewTeam {
    NewTeam {
        name: name.to_string(),
        description: None,
        created_date: None,
    }
}

/// Create a test project, optionally owned by a team
pub fn test_project(name: &str, team_id: Option<TeamId>) -> Project {
    Project {
        id: ProjectId::new(),
        name: name.to_string(),
        description: None,
        budget: Some(10_000.0),
        start_date: date(2024, 1, 1),
        end_date: Some(date(2024, 12, 31)),
        status: ProjectStatus::Planned,
        team_id,
    }
}

pub fn new_project(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        description: Some("A new project".to_string()),
        budget: Some(20_000.0),
        start_date: date(2024, 3, 1),
        end_date: Some(date(2024, 9, 1)),
        status: None,
    }
}

/// Create a test task, optionally owned by a project
pub fn test_task(title: &str, project_id: Option<ProjectId>) -> Task {
    Task {
        id: TaskId::new(),
        title: title.to_string(),
        description: None,
        priority: TaskPriority::Medium,
        status: TaskStatus::Todo,
        estimated_hours: Some(8),
        due_date: Some(date(2024, 5, 1)),
        project_id,
        assignee_ids: BTreeSet::new(),
    }
}

/// Create a test task with the given assignees
pub fn test_task_assigned(title: &str, assignees: &[EmployeeId]) -> Task {
    Task {
        assignee_ids: assignees.iter().copied().collect(),
        ..test_task(title, None)
    }
}

pub fn new_task(title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: None,
        priority: None,
        status: None,
        estimated_hours: Some(5),
        due_date: Some(date(2024, 4, 1)),
    }
}
