//! SeaORM adapter for TaskRepository

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{
    EmployeeId, NewTask, ProjectId, Task, TaskId, TaskPriority, TaskStatus,
};
use crate::domain::ports::TaskRepository;
use crate::entity::{task_employees, tasks};
use crate::error::DomainError;

/// SQL implementation of TaskRepository
pub struct SqlTaskRepository {
    db: DatabaseConnection,
}

impl SqlTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach assignee sets to loaded task rows
    async fn with_assignees(&self, models: Vec<tasks::Model>) -> Result<Vec<Task>, DomainError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let rows = task_employees::Entity::find()
            .filter(task_employees::Column::TaskId.is_in(ids))
            .all(&self.db)
            .await?;

        let mut assignees: HashMap<Uuid, BTreeSet<EmployeeId>> = HashMap::new();
        for row in rows {
            assignees
                .entry(row.task_id)
                .or_default()
                .insert(EmployeeId(row.employee_id));
        }

        models
            .into_iter()
            .map(|m| {
                let assignee_ids = assignees.remove(&m.id).unwrap_or_default();
                to_task(m, assignee_ids)
            })
            .collect()
    }

    async fn select(&self, condition: Condition) -> Result<Vec<Task>, DomainError> {
        let results = tasks::Entity::find()
            .filter(condition)
            .order_by_asc(tasks::Column::Title)
            .all(&self.db)
            .await?;

        self.with_assignees(results).await
    }
}

#[async_trait]
impl TaskRepository for SqlTaskRepository {
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, DomainError> {
        let result = tasks::Entity::find_by_id(id.0).one(&self.db).await?;

        match result {
            Some(model) => Ok(self.with_assignees(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Task>, DomainError> {
        self.select(Condition::all()).await
    }

    async fn find_by_project(&self, project_id: &ProjectId) -> Result<Vec<Task>, DomainError> {
        self.select(Condition::all().add(tasks::Column::ProjectId.eq(project_id.0)))
            .await
    }

    async fn find_by_assignee(&self, employee_id: &EmployeeId) -> Result<Vec<Task>, DomainError> {
        let results = tasks::Entity::find()
            .join(JoinType::InnerJoin, tasks::Relation::TaskEmployees.def())
            .filter(task_employees::Column::EmployeeId.eq(employee_id.0))
            .order_by_asc(tasks::Column::Title)
            .all(&self.db)
            .await?;

        self.with_assignees(results).await
    }

    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, DomainError> {
        self.select(Condition::all().add(tasks::Column::Status.eq(status.to_string())))
            .await
    }

    async fn find_by_priority(&self, priority: TaskPriority) -> Result<Vec<Task>, DomainError> {
        self.select(Condition::all().add(tasks::Column::Priority.eq(priority.to_string())))
            .await
    }

    async fn find_by_priority_and_status(
        &self,
        priority: TaskPriority,
        status: TaskStatus,
    ) -> Result<Vec<Task>, DomainError> {
        self.select(
            Condition::all()
                .add(tasks::Column::Priority.eq(priority.to_string()))
                .add(tasks::Column::Status.eq(status.to_string())),
        )
        .await
    }

    async fn find_due_before(&self, date: NaiveDate) -> Result<Vec<Task>, DomainError> {
        self.select(Condition::all().add(tasks::Column::DueDate.lt(date)))
            .await
    }

    async fn find_incomplete_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Task>, DomainError> {
        self.select(
            Condition::all()
                .add(tasks::Column::ProjectId.eq(project_id.0))
                .add(tasks::Column::Status.ne(TaskStatus::Done.to_string())),
        )
        .await
    }

    async fn count_by_project_and_status(
        &self,
        project_id: &ProjectId,
        status: TaskStatus,
    ) -> Result<u64, DomainError> {
        let count = tasks::Entity::find()
            .filter(tasks::Column::ProjectId.eq(project_id.0))
            .filter(tasks::Column::Status.eq(status.to_string()))
            .count(&self.db)
            .await?;

        Ok(count)
    }

    async fn create(
        &self,
        task: &NewTask,
        priority: TaskPriority,
        status: TaskStatus,
    ) -> Result<Task, DomainError> {
        let model = tasks::ActiveModel {
            id: Set(TaskId::new().0),
            title: Set(task.title.clone()),
            description: Set(task.description.clone()),
            priority: Set(priority.to_string()),
            status: Set(status.to_string()),
            estimated_hours: Set(task.estimated_hours),
            due_date: Set(task.due_date),
            project_id: Set(None),
        };

        let result = model.insert(&self.db).await?;

        to_task(result, BTreeSet::new())
    }

    async fn update(&self, task: &Task) -> Result<Task, DomainError> {
        let model = tasks::ActiveModel {
            id: Set(task.id.0),
            title: Set(task.title.clone()),
            description: Set(task.description.clone()),
            priority: Set(task.priority.to_string()),
            status: Set(task.status.to_string()),
            estimated_hours: Set(task.estimated_hours),
            due_date: Set(task.due_date),
            project_id: Set(task.project_id.map(|p| p.0)),
        };

        let result = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found("Task", "id", task.id),
            e => e.into(),
        })?;

        self.with_assignees(vec![result])
            .await?
            .pop()
            .ok_or_else(|| DomainError::not_found("Task", "id", task.id))
    }

    async fn delete(&self, id: &TaskId) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        task_employees::Entity::delete_many()
            .filter(task_employees::Column::TaskId.eq(id.0))
            .exec(&txn)
            .await?;

        tasks::Entity::delete_by_id(id.0).exec(&txn).await?;

        txn.commit().await?;

        Ok(())
    }

    async fn add_assignee(
        &self,
        task_id: &TaskId,
        employee_id: &EmployeeId,
    ) -> Result<(), DomainError> {
        let row = task_employees::ActiveModel {
            task_id: Set(task_id.0),
            employee_id: Set(employee_id.0),
        };

        // An existing assignment is left as is
        task_employees::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    task_employees::Column::TaskId,
                    task_employees::Column::EmployeeId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .do_nothing()
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    async fn remove_assignee(
        &self,
        task_id: &TaskId,
        employee_id: &EmployeeId,
    ) -> Result<(), DomainError> {
        task_employees::Entity::delete_many()
            .filter(task_employees::Column::TaskId.eq(task_id.0))
            .filter(task_employees::Column::EmployeeId.eq(employee_id.0))
            .exec(&self.db)
            .await?;

        Ok(())
    }
}

fn to_task(model: tasks::Model, assignee_ids: BTreeSet<EmployeeId>) -> Result<Task, DomainError> {
    let unreadable = |e: String| DomainError::Database(format!("task {}: {}", model.id, e));
    let priority = model.priority.parse::<TaskPriority>().map_err(unreadable)?;
    let status = model.status.parse::<TaskStatus>().map_err(unreadable)?;

    Ok(Task {
        id: TaskId(model.id),
        title: model.title,
        description: model.description,
        priority,
        status,
        estimated_hours: model.estimated_hours,
        due_date: model.due_date,
        project_id: model.project_id.map(ProjectId),
        assignee_ids,
    })
}
