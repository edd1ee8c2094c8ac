//! SeaORM adapter for ProjectRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{NewProject, Project, ProjectId, ProjectStatus, TeamId};
use crate::domain::ports::ProjectRepository;
use crate::entity::{projects, task_employees, tasks};
use crate::error::DomainError;

/// Delete projects, their tasks and the tasks' assignment rows on `conn`
///
/// Returns the number of tasks removed. Run it inside a transaction.
pub(super) async fn delete_projects<C>(conn: &C, project_ids: &[Uuid]) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    if project_ids.is_empty() {
        return Ok(0);
    }

    let task_ids: Vec<Uuid> = tasks::Entity::find()
        .select_only()
        .column(tasks::Column::Id)
        .filter(tasks::Column::ProjectId.is_in(project_ids.to_vec()))
        .into_tuple()
        .all(conn)
        .await?;

    if !task_ids.is_empty() {
        task_employees::Entity::delete_many()
            .filter(task_employees::Column::TaskId.is_in(task_ids.clone()))
            .exec(conn)
            .await?;

        tasks::Entity::delete_many()
            .filter(tasks::Column::Id.is_in(task_ids.clone()))
            .exec(conn)
            .await?;
    }

    projects::Entity::delete_many()
        .filter(projects::Column::Id.is_in(project_ids.to_vec()))
        .exec(conn)
        .await?;

    Ok(task_ids.len() as u64)
}

/// SQL implementation of ProjectRepository
pub struct SqlProjectRepository {
    db: DatabaseConnection,
}

impl SqlProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn select(&self, condition: Condition) -> Result<Vec<Project>, DomainError> {
        let results = projects::Entity::find()
            .filter(condition)
            .order_by_asc(projects::Column::Name)
            .all(&self.db)
            .await?;

        results.into_iter().map(Project::try_from).collect()
    }
}

#[async_trait]
impl ProjectRepository for SqlProjectRepository {
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        let result = projects::Entity::find_by_id(id.0).one(&self.db).await?;

        result.map(Project::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Project>, DomainError> {
        self.select(Condition::all()).await
    }

    async fn find_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>, DomainError> {
        self.select(Condition::all().add(projects::Column::Status.eq(status.to_string())))
            .await
    }

    async fn find_by_team(&self, team_id: &TeamId) -> Result<Vec<Project>, DomainError> {
        self.select(Condition::all().add(projects::Column::TeamId.eq(team_id.0)))
            .await
    }

    async fn find_by_status_and_team(
        &self,
        status: ProjectStatus,
        team_id: &TeamId,
    ) -> Result<Vec<Project>, DomainError> {
        self.select(
            Condition::all()
                .add(projects::Column::Status.eq(status.to_string()))
                .add(projects::Column::TeamId.eq(team_id.0)),
        )
        .await
    }

    async fn find_overdue(&self, today: NaiveDate) -> Result<Vec<Project>, DomainError> {
        // NULL end dates never compare less than today
        self.select(
            Condition::all()
                .add(projects::Column::EndDate.lt(today))
                .add(projects::Column::Status.ne(ProjectStatus::Completed.to_string())),
        )
        .await
    }

    async fn find_by_start_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Project>, DomainError> {
        self.select(Condition::all().add(projects::Column::StartDate.between(from, to)))
            .await
    }

    async fn find_by_budget_greater_than(
        &self,
        amount: f64,
    ) -> Result<Vec<Project>, DomainError> {
        self.select(Condition::all().add(projects::Column::Budget.gt(amount)))
            .await
    }

    async fn create(
        &self,
        project: &NewProject,
        status: ProjectStatus,
    ) -> Result<Project, DomainError> {
        let model = projects::ActiveModel {
            id: Set(ProjectId::new().0),
            name: Set(project.name.clone()),
            description: Set(project.description.clone()),
            budget: Set(project.budget),
            start_date: Set(project.start_date),
            end_date: Set(project.end_date),
            status: Set(status.to_string()),
            team_id: Set(None),
        };

        let result = model.insert(&self.db).await?;

        result.try_into()
    }

    async fn update(&self, project: &Project) -> Result<Project, DomainError> {
        let model = projects::ActiveModel {
            id: Set(project.id.0),
            name: Set(project.name.clone()),
            description: Set(project.description.clone()),
            budget: Set(project.budget),
            start_date: Set(project.start_date),
            end_date: Set(project.end_date),
            status: Set(project.status.to_string()),
            team_id: Set(project.team_id.map(|t| t.0)),
        };

        let result = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found("Project", "id", project.id),
            e => e.into(),
        })?;

        result.try_into()
    }

    async fn delete(&self, id: &ProjectId) -> Result<u64, DomainError> {
        let txn = self.db.begin().await?;

        let tasks_removed = delete_projects(&txn, &[id.0]).await?;

        txn.commit().await?;

        Ok(tasks_removed)
    }
}

/// Convert SeaORM model to domain entity
///
/// A stored status that no longer parses is reported, not replaced.
impl TryFrom<projects::Model> for Project {
    type Error = DomainError;

    fn try_from(model: projects::Model) -> Result<Self, Self::Error> {
        let status = model.status.parse::<ProjectStatus>().map_err(|e| {
            DomainError::Database(format!("project {}: {}", model.id, e))
        })?;

        Ok(Project {
            id: ProjectId(model.id),
            name: model.name,
            description: model.description,
            budget: model.budget,
            start_date: model.start_date,
            end_date: model.end_date,
            status,
            team_id: model.team_id.map(TeamId),
        })
    }
}
