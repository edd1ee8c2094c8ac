//! Repository port traits
//!
//! These traits define the persistence gateway used by the services.
//! Implementations are provided by adapters (e.g., SeaORM over SQL).
//!
//! Every `create` assigns a fresh identifier. Every `update` overwrites the
//! stored record by identity. `delete` removes the join rows that reference
//! the record, and for teams and projects also everything they own
//! (team -> projects -> tasks). Each delete is a single transaction: on
//! error nothing is removed.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::entities::{
    Employee, EmployeeId, NewEmployee, NewProject, NewTask, NewTeam, Project, ProjectId,
    ProjectStatus, Task, TaskId, TaskPriority, TaskStatus, Team, TeamId,
};
use crate::error::DomainError;

/// Rows removed along with a team
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamRemoval {
    pub projects: u64,
    pub tasks: u64,
}

/// Repository for Employee entities
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Find an employee by ID
    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError>;

    /// List all employees
    async fn find_all(&self) -> Result<Vec<Employee>, DomainError>;

    /// Find an employee by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DomainError>;

    /// Find employees with exactly this position
    async fn find_by_position(&self, position: &str) -> Result<Vec<Employee>, DomainError>;

    /// Find employees who are members of a team
    async fn find_by_team(&self, team_id: &TeamId) -> Result<Vec<Employee>, DomainError>;

    /// Find employees assigned to a task
    async fn find_by_task(&self, task_id: &TaskId) -> Result<Vec<Employee>, DomainError>;

    /// Case-insensitive substring match on first or last name
    async fn search_by_name(&self, name: &str) -> Result<Vec<Employee>, DomainError>;

    /// Employees whose salary lies in `[min, max]`
    async fn find_by_salary_range(&self, min: f64, max: f64)
        -> Result<Vec<Employee>, DomainError>;

    /// Employees hired strictly after `date`
    async fn find_hired_after(&self, date: NaiveDate) -> Result<Vec<Employee>, DomainError>;

    /// Employees assigned to more than `count` tasks
    async fn find_with_more_than_n_tasks(&self, count: usize)
        -> Result<Vec<Employee>, DomainError>;

    /// Create a new employee
    async fn create(&self, employee: &NewEmployee) -> Result<Employee, DomainError>;

    /// Overwrite an existing employee
    async fn update(&self, employee: &Employee) -> Result<Employee, DomainError>;

    /// Delete an employee along with its membership and assignment rows
    async fn delete(&self, id: &EmployeeId) -> Result<(), DomainError>;
}

/// Repository for Team entities
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Find a team by ID
    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    /// List all teams
    async fn find_all(&self) -> Result<Vec<Team>, DomainError>;

    /// Case-insensitive substring match on name
    async fn search_by_name(&self, name: &str) -> Result<Vec<Team>, DomainError>;

    /// Teams an employee is a member of
    async fn find_by_member(&self, employee_id: &EmployeeId) -> Result<Vec<Team>, DomainError>;

    /// Teams created strictly after `date`
    async fn find_created_after(&self, date: NaiveDate) -> Result<Vec<Team>, DomainError>;

    /// Teams owning more than `count` projects
    async fn find_with_more_than_n_projects(&self, count: usize)
        -> Result<Vec<Team>, DomainError>;

    /// Create a new team (the caller resolves the created date)
    async fn create(&self, team: &NewTeam, created_date: NaiveDate)
        -> Result<Team, DomainError>;

    /// Overwrite name, description and created date. Membership is untouched.
    async fn update(&self, team: &Team) -> Result<Team, DomainError>;

    /// Delete a team with its membership rows, its projects and their tasks
    async fn delete(&self, id: &TeamId) -> Result<TeamRemoval, DomainError>;

    /// Add an employee to a team (no-op if already a member)
    async fn add_member(
        &self,
        team_id: &TeamId,
        employee_id: &EmployeeId,
    ) -> Result<(), DomainError>;

    /// Remove an employee from a team (no-op if not a member)
    async fn remove_member(
        &self,
        team_id: &TeamId,
        employee_id: &EmployeeId,
    ) -> Result<(), DomainError>;
}

/// Repository for Project entities
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Find a project by ID
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError>;

    /// List all projects
    async fn find_all(&self) -> Result<Vec<Project>, DomainError>;

    /// Find projects by status
    async fn find_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>, DomainError>;

    /// Find projects owned by a team
    async fn find_by_team(&self, team_id: &TeamId) -> Result<Vec<Project>, DomainError>;

    /// Find projects with a status owned by a team
    async fn find_by_status_and_team(
        &self,
        status: ProjectStatus,
        team_id: &TeamId,
    ) -> Result<Vec<Project>, DomainError>;

    /// Projects whose end date is before `today` and that are not COMPLETED
    async fn find_overdue(&self, today: NaiveDate) -> Result<Vec<Project>, DomainError>;

    /// Projects starting within `[from, to]`
    async fn find_by_start_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Project>, DomainError>;

    /// Projects with a budget strictly greater than `amount`
    async fn find_by_budget_greater_than(&self, amount: f64)
        -> Result<Vec<Project>, DomainError>;

    /// Create a new project (the caller resolves the status)
    async fn create(
        &self,
        project: &NewProject,
        status: ProjectStatus,
    ) -> Result<Project, DomainError>;

    /// Overwrite every column of an existing project
    async fn update(&self, project: &Project) -> Result<Project, DomainError>;

    /// Delete a project with its tasks and their assignment rows
    ///
    /// Returns the number of tasks removed.
    async fn delete(&self, id: &ProjectId) -> Result<u64, DomainError>;
}

/// Repository for Task entities
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Find a task by ID
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, DomainError>;

    /// List all tasks
    async fn find_all(&self) -> Result<Vec<Task>, DomainError>;

    /// Find tasks owned by a project
    async fn find_by_project(&self, project_id: &ProjectId) -> Result<Vec<Task>, DomainError>;

    /// Find tasks an employee is assigned to
    async fn find_by_assignee(&self, employee_id: &EmployeeId) -> Result<Vec<Task>, DomainError>;

    /// Find tasks by status
    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, DomainError>;

    /// Find tasks by priority
    async fn find_by_priority(&self, priority: TaskPriority) -> Result<Vec<Task>, DomainError>;

    /// Find tasks matching both priority and status
    async fn find_by_priority_and_status(
        &self,
        priority: TaskPriority,
        status: TaskStatus,
    ) -> Result<Vec<Task>, DomainError>;

    /// Tasks due strictly before `date`
    async fn find_due_before(&self, date: NaiveDate) -> Result<Vec<Task>, DomainError>;

    /// Tasks of a project that are not DONE
    async fn find_incomplete_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Task>, DomainError>;

    /// Count tasks of a project with a given status
    async fn count_by_project_and_status(
        &self,
        project_id: &ProjectId,
        status: TaskStatus,
    ) -> Result<u64, DomainError>;

    /// Create a new task (the caller resolves priority and status)
    async fn create(
        &self,
        task: &NewTask,
        priority: TaskPriority,
        status: TaskStatus,
    ) -> Result<Task, DomainError>;

    /// Overwrite every column of an existing task. Assignments are untouched.
    async fn update(&self, task: &Task) -> Result<Task, DomainError>;

    /// Delete a task along with its assignment rows
    async fn delete(&self, id: &TaskId) -> Result<(), DomainError>;

    /// Assign an employee to a task (no-op if already assigned)
    async fn add_assignee(
        &self,
        task_id: &TaskId,
        employee_id: &EmployeeId,
    ) -> Result<(), DomainError>;

    /// Remove an employee from a task (no-op if not assigned)
    async fn remove_assignee(
        &self,
        task_id: &TaskId,
        employee_id: &EmployeeId,
    ) -> Result<(), DomainError>;
}
