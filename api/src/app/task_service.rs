//! Task service
//!
//! Handles task lifecycle, project ownership, employee assignment and the
//! status/priority fields. Tasks carry the largest relationship surface:
//! one owning project plus any number of assigned employees.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::entities::{
    EmployeeId, NewTask, ProjectId, Task, TaskId, TaskPriority, TaskStatus,
};
use crate::domain::ports::{EmployeeRepository, ProjectRepository, TaskRepository};
use crate::error::{AppError, DomainError};

/// Service for managing tasks
pub struct TaskService<KR, PR, ER>
where
    KR: TaskRepository,
    PR: ProjectRepository,
    ER: EmployeeRepository,
{
    tasks: Arc<KR>,
    projects: Arc<PR>,
    employees: Arc<ER>,
}

impl<KR, PR, ER> TaskService<KR, PR, ER>
where
    KR: TaskRepository,
    PR: ProjectRepository,
    ER: EmployeeRepository,
{
    pub fn new(tasks: Arc<KR>, projects: Arc<PR>, employees: Arc<ER>) -> Self {
        Self {
            tasks,
            projects,
            employees,
        }
    }

    /// Create a new task (MEDIUM priority and TODO status unless given)
    pub async fn create(&self, task: NewTask) -> Result<Task, AppError> {
        let priority = task.priority.unwrap_or_default();
        let status = task.status.unwrap_or_default();
        let task = self.tasks.create(&task, priority, status).await?;

        tracing::info!(
            task_id = %task.id,
            priority = %task.priority,
            status = %task.status,
            "Created task"
        );

        Ok(task)
    }

    /// Find a task by ID
    pub async fn find_by_id(&self, id: &TaskId) -> Result<Task, AppError> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Task", "id", id).into())
    }

    pub async fn find_all(&self) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.find_all().await?)
    }

    /// Update a task
    ///
    /// Title, description, estimated hours and due date are always
    /// overwritten. Priority and status are only overwritten when given.
    /// Project ownership and assignments are kept.
    pub async fn update(&self, id: &TaskId, fields: NewTask) -> Result<Task, AppError> {
        let mut task = self.find_by_id(id).await?;

        task.title = fields.title;
        task.description = fields.description;
        task.estimated_hours = fields.estimated_hours;
        task.due_date = fields.due_date;
        if let Some(priority) = fields.priority {
            task.priority = priority;
        }
        if let Some(status) = fields.status {
            task.status = status;
        }

        let task = self.tasks.update(&task).await?;

        tracing::debug!(task_id = %task.id, "Updated task");

        Ok(task)
    }

    /// Delete a task and its assignments; assigned employees are kept
    pub async fn delete(&self, id: &TaskId) -> Result<(), AppError> {
        let task = self.find_by_id(id).await?;

        self.tasks.delete(&task.id).await?;

        tracing::info!(
            task_id = %task.id,
            assignments_removed = task.assignee_ids.len(),
            "Deleted task"
        );

        Ok(())
    }

    /// Move a task under a project, replacing any previous owner
    pub async fn assign_to_project(
        &self,
        task_id: &TaskId,
        project_id: &ProjectId,
    ) -> Result<Task, AppError> {
        let mut task = self.find_by_id(task_id).await?;
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Project", "id", project_id))?;

        task.project_id = Some(project.id);
        let task = self.tasks.update(&task).await?;

        tracing::info!(task_id = %task.id, project_id = %project.id, "Assigned task to project");

        Ok(task)
    }

    /// Assign an employee to a task; assigning twice is a no-op
    pub async fn assign_employee(
        &self,
        task_id: &TaskId,
        employee_id: &EmployeeId,
    ) -> Result<Task, AppError> {
        let task = self.find_by_id(task_id).await?;
        self.require_employee(employee_id).await?;

        if task.is_assigned_to(employee_id) {
            return Ok(task);
        }

        self.tasks.add_assignee(&task.id, employee_id).await?;

        tracing::info!(task_id = %task.id, employee_id = %employee_id, "Assigned employee to task");

        self.find_by_id(&task.id).await
    }

    /// Unassign an employee from a task; unassigning a non-assignee is a no-op
    pub async fn remove_employee(
        &self,
        task_id: &TaskId,
        employee_id: &EmployeeId,
    ) -> Result<Task, AppError> {
        let task = self.find_by_id(task_id).await?;
        self.require_employee(employee_id).await?;

        if !task.is_assigned_to(employee_id) {
            return Ok(task);
        }

        self.tasks.remove_assignee(&task.id, employee_id).await?;

        tracing::info!(
            task_id = %task.id,
            employee_id = %employee_id,
            "Removed employee from task"
        );

        self.find_by_id(&task.id).await
    }

    /// Set the status; any status may follow any other
    pub async fn update_status(&self, task_id: &TaskId, status: TaskStatus) -> Result<Task, AppError> {
        let mut task = self.find_by_id(task_id).await?;

        let previous = task.status;
        task.status = status;
        let task = self.tasks.update(&task).await?;

        tracing::info!(
            task_id = %task.id,
            from = %previous,
            to = %task.status,
            done = task.is_done(),
            "Updated task status"
        );

        Ok(task)
    }

    pub async fn update_priority(
        &self,
        task_id: &TaskId,
        priority: TaskPriority,
    ) -> Result<Task, AppError> {
        let mut task = self.find_by_id(task_id).await?;

        let previous = task.priority;
        task.priority = priority;
        let task = self.tasks.update(&task).await?;

        tracing::info!(
            task_id = %task.id,
            from = %previous,
            to = %task.priority,
            "Updated task priority"
        );

        Ok(task)
    }

    /// Tasks owned by a project (an unknown project simply owns none)
    pub async fn find_by_project_id(&self, project_id: &ProjectId) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.find_by_project(project_id).await?)
    }

    /// Tasks assigned to an employee
    pub async fn find_by_employee_id(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Vec<Task>, AppError> {
        self.require_employee(employee_id).await?;

        Ok(self.tasks.find_by_assignee(employee_id).await?)
    }

    pub async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.find_by_status(status).await?)
    }

    pub async fn find_by_priority(&self, priority: TaskPriority) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.find_by_priority(priority).await?)
    }

    pub async fn find_by_priority_and_status(
        &self,
        priority: TaskPriority,
        status: TaskStatus,
    ) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.find_by_priority_and_status(priority, status).await?)
    }

    /// Tasks due strictly before `date`
    pub async fn find_due_before(&self, date: NaiveDate) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.find_due_before(date).await?)
    }

    pub async fn find_incomplete_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.find_incomplete_by_project(project_id).await?)
    }

    pub async fn count_by_project_and_status(
        &self,
        project_id: &ProjectId,
        status: TaskStatus,
    ) -> Result<u64, AppError> {
        Ok(self
            .tasks
            .count_by_project_and_status(project_id, status)
            .await?)
    }

    async fn require_employee(&self, employee_id: &EmployeeId) -> Result<(), AppError> {
        match self.employees.find_by_id(employee_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Employee", "id", employee_id).into()),
        }
    }
}
