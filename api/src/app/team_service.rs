//! Team service
//!
//! Handles team lifecycle and membership. A team is the root of the
//! ownership hierarchy: deleting it removes its projects and, through them,
//! their tasks.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::domain::entities::{EmployeeId, NewTeam, Project, Team, TeamId};
use crate::domain::ports::{EmployeeRepository, ProjectRepository, TeamRepository};
use crate::error::{AppError, DomainError};

/// A team together with the projects it owns
#[derive(Debug, Clone, Serialize)]
pub struct TeamWithProjects {
    #[serde(flatten)]
    pub team: Team,
    pub projects: Vec<Project>,
}

/// Service for managing teams
pub struct TeamService<TR, ER, PR>
where
    TR: TeamRepository,
    ER: EmployeeRepository,
    PR: ProjectRepository,
{
    teams: Arc<TR>,
    employees: Arc<ER>,
    projects: Arc<PR>,
}

impl<TR, ER, PR> TeamService<TR, ER, PR>
where
    TR: TeamRepository,
    ER: EmployeeRepository,
    PR: ProjectRepository,
{
    pub fn new(teams: Arc<TR>, employees: Arc<ER>, projects: Arc<PR>) -> Self {
        Self {
            teams,
            employees,
            projects,
        }
    }

    /// Create a new team, dated today unless a created date is given
    pub async fn create(&self, team: NewTeam) -> Result<Team, AppError> {
        let created_date = team
            .created_date
            .unwrap_or_else(|| Utc::now().date_naive());
        let team = self.teams.create(&team, created_date).await?;

        tracing::info!(team_id = %team.id, name = %team.name, "Created team");

        Ok(team)
    }

    /// Find a team by ID
    pub async fn find_by_id(&self, id: &TeamId) -> Result<Team, AppError> {
        self.teams
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Team", "id", id).into())
    }

    /// Find a team along with its owned projects
    pub async fn find_with_projects(&self, id: &TeamId) -> Result<TeamWithProjects, AppError> {
        let team = self.find_by_id(id).await?;
        let projects = self.projects.find_by_team(&team.id).await?;

        Ok(TeamWithProjects { team, projects })
    }

    pub async fn find_all(&self) -> Result<Vec<Team>, AppError> {
        Ok(self.teams.find_all().await?)
    }

    /// Overwrite name and description
    ///
    /// The created date, owned projects and membership are kept. The
    /// created date in `fields` is ignored.
    pub async fn update(&self, id: &TeamId, fields: NewTeam) -> Result<Team, AppError> {
        let mut team = self.find_by_id(id).await?;

        team.name = fields.name;
        team.description = fields.description;

        let team = self.teams.update(&team).await?;

        tracing::debug!(team_id = %team.id, "Updated team");

        Ok(team)
    }

    /// Delete a team, its projects and their tasks
    pub async fn delete(&self, id: &TeamId) -> Result<(), AppError> {
        let team = self.find_by_id(id).await?;

        let removed = self.teams.delete(&team.id).await?;

        tracing::info!(
            team_id = %team.id,
            members_removed = team.member_count(),
            projects_removed = removed.projects,
            tasks_removed = removed.tasks,
            "Deleted team"
        );

        Ok(())
    }

    /// Add an employee to a team; adding an existing member is a no-op
    pub async fn add_employee(
        &self,
        team_id: &TeamId,
        employee_id: &EmployeeId,
    ) -> Result<Team, AppError> {
        let team = self.find_by_id(team_id).await?;
        self.require_employee(employee_id).await?;

        if team.has_member(employee_id) {
            return Ok(team);
        }

        self.teams.add_member(&team.id, employee_id).await?;

        tracing::info!(team_id = %team.id, employee_id = %employee_id, "Added employee to team");

        self.find_by_id(&team.id).await
    }

    /// Remove an employee from a team; removing a non-member is a no-op
    pub async fn remove_employee(
        &self,
        team_id: &TeamId,
        employee_id: &EmployeeId,
    ) -> Result<Team, AppError> {
        let team = self.find_by_id(team_id).await?;
        self.require_employee(employee_id).await?;

        if !team.has_member(employee_id) {
            return Ok(team);
        }

        self.teams.remove_member(&team.id, employee_id).await?;

        tracing::info!(
            team_id = %team.id,
            employee_id = %employee_id,
            "Removed employee from team"
        );

        self.find_by_id(&team.id).await
    }

    /// Teams an employee belongs to
    pub async fn find_teams_by_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Vec<Team>, AppError> {
        self.require_employee(employee_id).await?;

        Ok(self.teams.find_by_member(employee_id).await?)
    }

    pub async fn search_by_name(&self, name: &str) -> Result<Vec<Team>, AppError> {
        Ok(self.teams.search_by_name(name).await?)
    }

    pub async fn find_created_after(&self, date: NaiveDate) -> Result<Vec<Team>, AppError> {
        Ok(self.teams.find_created_after(date).await?)
    }

    pub async fn find_with_more_than_n_projects(
        &self,
        count: usize,
    ) -> Result<Vec<Team>, AppError> {
        Ok(self.teams.find_with_more_than_n_projects(count).await?)
    }

    async fn require_employee(&self, employee_id: &EmployeeId) -> Result<(), AppError> {
        match self.employees.find_by_id(employee_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Employee", "id", employee_id).into()),
        }
    }
}
