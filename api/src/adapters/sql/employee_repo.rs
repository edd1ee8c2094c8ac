//! SeaORM adapter for EmployeeRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use super::contains_pattern;
use crate::domain::entities::{Employee, EmployeeId, NewEmployee, TaskId, TeamId};
use crate::domain::ports::EmployeeRepository;
use crate::entity::{employees, task_employees, team_employees};
use crate::error::DomainError;

/// SQL implementation of EmployeeRepository
pub struct SqlEmployeeRepository {
    db: DatabaseConnection,
}

impl SqlEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn select(&self, condition: Condition) -> Result<Vec<Employee>, DomainError> {
        let results = employees::Entity::find()
            .filter(condition)
            .order_by_asc(employees::Column::LastName)
            .order_by_asc(employees::Column::FirstName)
            .all(&self.db)
            .await?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Map a write failure, turning a unique-index violation on email into DuplicateKey
fn map_write_err(err: DbErr, email: &str) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::duplicate_key("Employee", "email", email)
        }
        _ => DomainError::Database(err.to_string()),
    }
}

#[async_trait]
impl EmployeeRepository for SqlEmployeeRepository {
    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError> {
        let result = employees::Entity::find_by_id(id.0).one(&self.db).await?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self) -> Result<Vec<Employee>, DomainError> {
        self.select(Condition::all()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DomainError> {
        let result = employees::Entity::find()
            .filter(employees::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_position(&self, position: &str) -> Result<Vec<Employee>, DomainError> {
        self.select(Condition::all().add(employees::Column::Position.eq(position)))
            .await
    }

    async fn find_by_team(&self, team_id: &TeamId) -> Result<Vec<Employee>, DomainError> {
        let results = employees::Entity::find()
            .join(
                JoinType::InnerJoin,
                employees::Relation::TeamEmployees.def(),
            )
            .filter(team_employees::Column::TeamId.eq(team_id.0))
            .order_by_asc(employees::Column::LastName)
            .order_by_asc(employees::Column::FirstName)
            .all(&self.db)
            .await?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_task(&self, task_id: &TaskId) -> Result<Vec<Employee>, DomainError> {
        let results = employees::Entity::find()
            .join(
                JoinType::InnerJoin,
                employees::Relation::TaskEmployees.def(),
            )
            .filter(task_employees::Column::TaskId.eq(task_id.0))
            .order_by_asc(employees::Column::LastName)
            .order_by_asc(employees::Column::FirstName)
            .all(&self.db)
            .await?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Employee>, DomainError> {
        if !name.is_ascii() {
            let all = self.select(Condition::all()).await?;
            return Ok(all.into_iter().filter(|e| e.name_contains(name)).collect());
        }

        let pattern = contains_pattern(name);
        self.select(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col(employees::Column::FirstName)))
                        .like(pattern.clone()),
                )
                .add(Expr::expr(Func::lower(Expr::col(employees::Column::LastName))).like(pattern)),
        )
        .await
    }

    async fn find_by_salary_range(
        &self,
        min: f64,
        max: f64,
    ) -> Result<Vec<Employee>, DomainError> {
        self.select(Condition::all().add(employees::Column::Salary.between(min, max)))
            .await
    }

    async fn find_hired_after(&self, date: NaiveDate) -> Result<Vec<Employee>, DomainError> {
        self.select(Condition::all().add(employees::Column::HireDate.gt(date)))
            .await
    }

    async fn find_with_more_than_n_tasks(
        &self,
        count: usize,
    ) -> Result<Vec<Employee>, DomainError> {
        let ids: Vec<Uuid> = task_employees::Entity::find()
            .select_only()
            .column(task_employees::Column::EmployeeId)
            .group_by(task_employees::Column::EmployeeId)
            .having(
                Expr::expr(Func::count(Expr::col(task_employees::Column::TaskId)))
                    .gt(count as i64),
            )
            .into_tuple()
            .all(&self.db)
            .await?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.select(Condition::all().add(employees::Column::Id.is_in(ids)))
            .await
    }

    async fn create(&self, employee: &NewEmployee) -> Result<Employee, DomainError> {
        let model = employees::ActiveModel {
            id: Set(EmployeeId::new().0),
            first_name: Set(employee.first_name.clone()),
            last_name: Set(employee.last_name.clone()),
            email: Set(employee.email.clone()),
            position: Set(employee.position.clone()),
            hire_date: Set(employee.hire_date),
            salary: Set(employee.salary),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err(e, &employee.email))?;

        Ok(result.into())
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, DomainError> {
        let model = employees::ActiveModel {
            id: Set(employee.id.0),
            first_name: Set(employee.first_name.clone()),
            last_name: Set(employee.last_name.clone()),
            email: Set(employee.email.clone()),
            position: Set(employee.position.clone()),
            hire_date: Set(employee.hire_date),
            salary: Set(employee.salary),
        };

        let result = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found("Employee", "id", employee.id),
            e => map_write_err(e, &employee.email),
        })?;

        Ok(result.into())
    }

    async fn delete(&self, id: &EmployeeId) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        team_employees::Entity::delete_many()
            .filter(team_employees::Column::EmployeeId.eq(id.0))
            .exec(&txn)
            .await?;

        task_employees::Entity::delete_many()
            .filter(task_employees::Column::EmployeeId.eq(id.0))
            .exec(&txn)
            .await?;

        employees::Entity::delete_by_id(id.0).exec(&txn).await?;

        txn.commit().await?;

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<employees::Model> for Employee {
    fn from(model: employees::Model) -> Self {
        Employee {
            id: EmployeeId(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            position: model.position,
            hire_date: model.hire_date,
            salary: model.salary,
        }
    }
}
