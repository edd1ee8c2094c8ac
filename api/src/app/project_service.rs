//! Project service
//!
//! Handles project lifecycle, team ownership and status changes. A project
//! exclusively owns its tasks, so deleting one removes them too.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::domain::entities::{NewProject, Project, ProjectId, ProjectStatus, TeamId};
use crate::domain::ports::{ProjectRepository, TeamRepository};
use crate::error::{AppError, DomainError};

/// Service for managing projects
pub struct ProjectService<PR, TR>
where
    PR: ProjectRepository,
    TR: TeamRepository,
{
    projects: Arc<PR>,
    teams: Arc<TR>,
}

impl<PR, TR> ProjectService<PR, TR>
where
    PR: ProjectRepository,
    TR: TeamRepository,
{
    pub fn new(projects: Arc<PR>, teams: Arc<TR>) -> Self {
        Self { projects, teams }
    }

    /// Create a new project (status defaults to PLANNED)
    pub async fn create(&self, project: NewProject) -> Result<Project, AppError> {
        let status = project.status.unwrap_or_default();
        let project = self.projects.create(&project, status).await?;

        tracing::info!(project_id = %project.id, status = %project.status, "Created project");

        Ok(project)
    }

    /// Find a project by ID
    pub async fn find_by_id(&self, id: &ProjectId) -> Result<Project, AppError> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Project", "id", id).into())
    }

    pub async fn find_all(&self) -> Result<Vec<Project>, AppError> {
        Ok(self.projects.find_all().await?)
    }

    /// Overwrite name, description, budget and both dates
    ///
    /// Every one of those fields is replaced, including with `None`. Status
    /// and team ownership have their own operations and are kept.
    pub async fn update(&self, id: &ProjectId, fields: NewProject) -> Result<Project, AppError> {
        let mut project = self.find_by_id(id).await?;

        project.name = fields.name;
        project.description = fields.description;
        project.budget = fields.budget;
        project.start_date = fields.start_date;
        project.end_date = fields.end_date;

        let project = self.projects.update(&project).await?;

        tracing::debug!(project_id = %project.id, "Updated project");

        Ok(project)
    }

    /// Delete a project and all of its tasks
    pub async fn delete(&self, id: &ProjectId) -> Result<(), AppError> {
        let project = self.find_by_id(id).await?;

        let tasks_removed = self.projects.delete(&project.id).await?;

        tracing::info!(project_id = %project.id, tasks_removed, "Deleted project");

        Ok(())
    }

    /// Move a project under a team, replacing any previous owner
    pub async fn assign_to_team(
        &self,
        project_id: &ProjectId,
        team_id: &TeamId,
    ) -> Result<Project, AppError> {
        let mut project = self.find_by_id(project_id).await?;
        let team = self
            .teams
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Team", "id", team_id))?;

        let previous = project.team_id.replace(team.id);
        let project = self.projects.update(&project).await?;

        tracing::info!(
            project_id = %project.id,
            team_id = %team.id,
            previous_team_id = ?previous.map(|t| t.to_string()),
            "Assigned project to team"
        );

        Ok(project)
    }

    /// Set the status; any status may follow any other
    pub async fn update_status(
        &self,
        project_id: &ProjectId,
        status: ProjectStatus,
    ) -> Result<Project, AppError> {
        let mut project = self.find_by_id(project_id).await?;

        let previous = project.status;
        project.status = status;
        let project = self.projects.update(&project).await?;

        tracing::info!(
            project_id = %project.id,
            from = %previous,
            to = %project.status,
            "Updated project status"
        );

        Ok(project)
    }

    pub async fn find_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>, AppError> {
        Ok(self.projects.find_by_status(status).await?)
    }

    pub async fn find_by_team_id(&self, team_id: &TeamId) -> Result<Vec<Project>, AppError> {
        Ok(self.projects.find_by_team(team_id).await?)
    }

    pub async fn find_by_status_and_team(
        &self,
        status: ProjectStatus,
        team_id: &TeamId,
    ) -> Result<Vec<Project>, AppError> {
        Ok(self.projects.find_by_status_and_team(status, team_id).await?)
    }

    /// Projects past their end date that are not COMPLETED, as of today
    pub async fn find_overdue(&self) -> Result<Vec<Project>, AppError> {
        self.find_overdue_as_of(Utc::now().date_naive()).await
    }

    /// Projects past their end date that are not COMPLETED, as of `today`
    ///
    /// CANCELLED projects are included.
    pub async fn find_overdue_as_of(&self, today: NaiveDate) -> Result<Vec<Project>, AppError> {
        Ok(self.projects.find_overdue(today).await?)
    }

    /// Projects starting within `[from, to]`
    pub async fn find_by_start_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Project>, AppError> {
        if from > to {
            return Err(AppError::BadRequest(format!(
                "Start of range {} is after end {}",
                from, to
            )));
        }

        Ok(self.projects.find_by_start_date_between(from, to).await?)
    }

    pub async fn find_by_budget_greater_than(
        &self,
        amount: f64,
    ) -> Result<Vec<Project>, AppError> {
        Ok(self.projects.find_by_budget_greater_than(amount).await?)
    }
}
