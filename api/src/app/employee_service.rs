//! Employee service
//!
//! Handles employee lifecycle and email uniqueness.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::entities::{Employee, EmployeeId, NewEmployee, TaskId, TeamId};
use crate::domain::ports::{EmployeeRepository, TaskRepository};
use crate::error::{AppError, DomainError};

/// Service for managing employees
pub struct EmployeeService<ER, KR>
where
    ER: EmployeeRepository,
    KR: TaskRepository,
{
    employees: Arc<ER>,
    tasks: Arc<KR>,
}

impl<ER, KR> EmployeeService<ER, KR>
where
    ER: EmployeeRepository,
    KR: TaskRepository,
{
    pub fn new(employees: Arc<ER>, tasks: Arc<KR>) -> Self {
        Self { employees, tasks }
    }

    /// Create a new employee
    ///
    /// Fails with DuplicateKey if another employee already uses the email.
    pub async fn create(&self, employee: NewEmployee) -> Result<Employee, AppError> {
        if self.employees.find_by_email(&employee.email).await?.is_some() {
            return Err(DomainError::duplicate_key("Employee", "email", &employee.email).into());
        }

        let employee = self.employees.create(&employee).await?;

        tracing::info!(employee_id = %employee.id, email = %employee.email, "Created employee");

        Ok(employee)
    }

    /// Find an employee by ID
    pub async fn find_by_id(&self, id: &EmployeeId) -> Result<Employee, AppError> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Employee", "id", id).into())
    }

    pub async fn find_all(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.employees.find_all().await?)
    }

    /// Overwrite an employee's fields
    ///
    /// The uniqueness check only runs when the email actually changes, so
    /// re-submitting an employee's own email succeeds. Team membership and
    /// task assignments are untouched.
    pub async fn update(&self, id: &EmployeeId, fields: NewEmployee) -> Result<Employee, AppError> {
        let mut employee = self.find_by_id(id).await?;

        if employee.email != fields.email
            && self.employees.find_by_email(&fields.email).await?.is_some()
        {
            return Err(DomainError::duplicate_key("Employee", "email", &fields.email).into());
        }

        employee.first_name = fields.first_name;
        employee.last_name = fields.last_name;
        employee.email = fields.email;
        employee.position = fields.position;
        employee.hire_date = fields.hire_date;
        employee.salary = fields.salary;

        let employee = self.employees.update(&employee).await?;

        tracing::debug!(employee_id = %employee.id, "Updated employee");

        Ok(employee)
    }

    /// Delete an employee
    ///
    /// The repository clears the employee's team memberships and task
    /// assignments; teams and tasks themselves are kept.
    pub async fn delete(&self, id: &EmployeeId) -> Result<(), AppError> {
        let employee = self.find_by_id(id).await?;

        self.employees.delete(&employee.id).await?;

        tracing::info!(employee_id = %employee.id, name = %employee.full_name(), "Deleted employee");

        Ok(())
    }

    /// Find an employee by exact email
    pub async fn find_by_email(&self, email: &str) -> Result<Employee, AppError> {
        self.employees
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("Employee", "email", email).into())
    }

    pub async fn find_by_position(&self, position: &str) -> Result<Vec<Employee>, AppError> {
        Ok(self.employees.find_by_position(position).await?)
    }

    /// Members of a team (an unknown team simply has no members)
    pub async fn find_by_team_id(&self, team_id: &TeamId) -> Result<Vec<Employee>, AppError> {
        Ok(self.employees.find_by_team(team_id).await?)
    }

    /// Employees assigned to a task
    pub async fn find_by_task_id(&self, task_id: &TaskId) -> Result<Vec<Employee>, AppError> {
        if self.tasks.find_by_id(task_id).await?.is_none() {
            return Err(DomainError::not_found("Task", "id", task_id).into());
        }

        Ok(self.employees.find_by_task(task_id).await?)
    }

    pub async fn search_by_name(&self, name: &str) -> Result<Vec<Employee>, AppError> {
        Ok(self.employees.search_by_name(name).await?)
    }

    /// Employees whose salary lies in `[min, max]`
    pub async fn find_by_salary_range(
        &self,
        min: f64,
        max: f64,
    ) -> Result<Vec<Employee>, AppError> {
        Ok(self.employees.find_by_salary_range(min, max).await?)
    }

    pub async fn find_hired_after(&self, date: NaiveDate) -> Result<Vec<Employee>, AppError> {
        Ok(self.employees.find_hired_after(date).await?)
    }

    pub async fn find_with_more_than_n_tasks(
        &self,
        count: usize,
    ) -> Result<Vec<Employee>, AppError> {
        Ok(self.employees.find_with_more_than_n_tasks(count).await?)
    }
}
