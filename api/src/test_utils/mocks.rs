//! In-memory implementations of the repository ports
//!
//! A single arena backs all four repository traits so that deleting an
//! employee, team or task can clear the join tables the way the SQL adapter
//! does. Records are keyed by id; the two many-to-many relationships live in
//! separate `(owner, employee)` pair sets.
//!
//! `failing_deletes` makes every team and project delete fail before it
//! touches anything, standing in for a rolled-back transaction.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Employee, EmployeeId, NewEmployee, NewProject, NewTask, NewTeam, Project, ProjectId,
    ProjectStatus, Task, TaskId, TaskPriority, TaskStatus, Team, TeamId,
};
use crate::domain::ports::{
    EmployeeRepository, ProjectRepository, TaskRepository, TeamRemoval, TeamRepository,
};
use crate::error::DomainError;

// ============================================================================
// In-Memory Store
// ============================================================================

#[derive(Default)]
pub struct InMemoryStore {
    employees: Arc<RwLock<HashMap<EmployeeId, Employee>>>,
    teams: Arc<RwLock<HashMap<TeamId, Team>>>,
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
    team_members: Arc<RwLock<BTreeSet<(TeamId, EmployeeId)>>>,
    task_assignees: Arc<RwLock<BTreeSet<(TaskId, EmployeeId)>>>,
    fail_deletes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with an employee for testing
    pub fn with_employee(self, employee: Employee) -> Self {
        self.employees
            .write()
            .unwrap()
            .insert(employee.id, employee);
        self
    }

    /// Pre-populate with a team; its `member_ids` seed the membership table
    pub fn with_team(self, team: Team) -> Self {
        {
            let mut members = self.team_members.write().unwrap();
            for employee_id in &team.member_ids {
                members.insert((team.id, *employee_id));
            }
        }
        let mut stored = team;
        stored.member_ids.clear();
        self.teams.write().unwrap().insert(stored.id, stored);
        self
    }

    pub fn with_project(self, project: Project) -> Self {
        self.projects.write().unwrap().insert(project.id, project);
        self
    }

    /// Pre-populate with a task; its `assignee_ids` seed the assignment table
    pub fn with_task(self, task: Task) -> Self {
        {
            let mut assignees = self.task_assignees.write().unwrap();
            for employee_id in &task.assignee_ids {
                assignees.insert((task.id, *employee_id));
            }
        }
        let mut stored = task;
        stored.assignee_ids.clear();
        self.tasks.write().unwrap().insert(stored.id, stored);
        self
    }

    /// Make team and project deletes fail with a database error
    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub fn employee_count(&self) -> usize {
        self.employees.read().unwrap().len()
    }

    pub fn team_count(&self) -> usize {
        self.teams.read().unwrap().len()
    }

    pub fn project_count(&self) -> usize {
        self.projects.read().unwrap().len()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.read().unwrap().len()
    }

    /// Number of membership rows referencing an employee
    pub fn membership_rows_for(&self, employee_id: &EmployeeId) -> usize {
        self.team_members
            .read()
            .unwrap()
            .iter()
            .filter(|(_, e)| e == employee_id)
            .count()
    }

    /// Number of assignment rows referencing an employee
    pub fn assignment_rows_for(&self, employee_id: &EmployeeId) -> usize {
        self.task_assignees
            .read()
            .unwrap()
            .iter()
            .filter(|(_, e)| e == employee_id)
            .count()
    }

    fn check_delete(&self) -> Result<(), DomainError> {
        if self.fail_deletes {
            return Err(DomainError::Database("delete rejected".to_string()));
        }
        Ok(())
    }

    /// Remove projects, their tasks and those tasks' assignment rows
    fn remove_projects(&self, project_ids: &BTreeSet<ProjectId>) -> u64 {
        let task_ids: BTreeSet<TaskId> = {
            let mut tasks = self.tasks.write().unwrap();
            let ids = tasks
                .values()
                .filter(|t| t.project_id.is_some_and(|p| project_ids.contains(&p)))
                .map(|t| t.id)
                .collect::<BTreeSet<_>>();
            tasks.retain(|id, _| !ids.contains(id));
            ids
        };
        self.task_assignees
            .write()
            .unwrap()
            .retain(|(t, _)| !task_ids.contains(t));
        self.projects
            .write()
            .unwrap()
            .retain(|id, _| !project_ids.contains(id));
        task_ids.len() as u64
    }

    fn hydrate_team(&self, team: &Team) -> Team {
        let members = self.team_members.read().unwrap();
        let mut team = team.clone();
        team.member_ids = members
            .iter()
            .filter(|(t, _)| *t == team.id)
            .map(|(_, e)| *e)
            .collect();
        team
    }

    fn hydrate_task(&self, task: &Task) -> Task {
        let assignees = self.task_assignees.read().unwrap();
        let mut task = task.clone();
        task.assignee_ids = assignees
            .iter()
            .filter(|(t, _)| *t == task.id)
            .map(|(_, e)| *e)
            .collect();
        task
    }

    fn select_employees(&self, pred: impl Fn(&Employee) -> bool) -> Vec<Employee> {
        let employees = self.employees.read().unwrap();
        let mut found: Vec<Employee> = employees.values().filter(|e| pred(e)).cloned().collect();
        found.sort_by(|a, b| {
            (&a.last_name, &a.first_name, &a.email).cmp(&(&b.last_name, &b.first_name, &b.email))
        });
        found
    }

    fn select_teams(&self, pred: impl Fn(&Team) -> bool) -> Vec<Team> {
        let candidates: Vec<Team> = {
            let teams = self.teams.read().unwrap();
            teams.values().cloned().collect()
        };
        let mut found: Vec<Team> = candidates
            .iter()
            .map(|t| self.hydrate_team(t))
            .filter(|t| pred(t))
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    fn select_projects(&self, pred: impl Fn(&Project) -> bool) -> Vec<Project> {
        let projects = self.projects.read().unwrap();
        let mut found: Vec<Project> = projects.values().filter(|p| pred(p)).cloned().collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    fn select_tasks(&self, pred: impl Fn(&Task) -> bool) -> Vec<Task> {
        let candidates: Vec<Task> = {
            let tasks = self.tasks.read().unwrap();
            tasks.values().cloned().collect()
        };
        let mut found: Vec<Task> = candidates
            .iter()
            .map(|t| self.hydrate_task(t))
            .filter(|t| pred(t))
            .collect();
        found.sort_by(|a, b| a.title.cmp(&b.title));
        found
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryStore {
    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError> {
        let employees = self.employees.read().unwrap();
        Ok(employees.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Employee>, DomainError> {
        Ok(self.select_employees(|_| true))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DomainError> {
        let employees = self.employees.read().unwrap();
        Ok(employees.values().find(|e| e.email == email).cloned())
    }

    async fn find_by_position(&self, position: &str) -> Result<Vec<Employee>, DomainError> {
        Ok(self.select_employees(|e| e.position.as_deref() == Some(position)))
    }

    async fn find_by_team(&self, team_id: &TeamId) -> Result<Vec<Employee>, DomainError> {
        let member_ids: BTreeSet<EmployeeId> = self
            .team_members
            .read()
            .unwrap()
            .iter()
            .filter(|(t, _)| t == team_id)
            .map(|(_, e)| *e)
            .collect();
        Ok(self.select_employees(|e| member_ids.contains(&e.id)))
    }

    async fn find_by_task(&self, task_id: &TaskId) -> Result<Vec<Employee>, DomainError> {
        let assignee_ids: BTreeSet<EmployeeId> = self
            .task_assignees
            .read()
            .unwrap()
            .iter()
            .filter(|(t, _)| t == task_id)
            .map(|(_, e)| *e)
            .collect();
        Ok(self.select_employees(|e| assignee_ids.contains(&e.id)))
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Employee>, DomainError> {
        Ok(self.select_employees(|e| e.name_contains(name)))
    }

    async fn find_by_salary_range(
        &self,
        min: f64,
        max: f64,
    ) -> Result<Vec<Employee>, DomainError> {
        Ok(self.select_employees(|e| e.salary_between(min, max)))
    }

    async fn find_hired_after(&self, date: NaiveDate) -> Result<Vec<Employee>, DomainError> {
        Ok(self.select_employees(|e| e.hire_date.is_some_and(|d| d > date)))
    }

    async fn find_with_more_than_n_tasks(
        &self,
        count: usize,
    ) -> Result<Vec<Employee>, DomainError> {
        let mut per_employee: HashMap<EmployeeId, usize> = HashMap::new();
        for (_, employee_id) in self.task_assignees.read().unwrap().iter() {
            *per_employee.entry(*employee_id).or_default() += 1;
        }
        Ok(self.select_employees(|e| per_employee.get(&e.id).copied().unwrap_or(0) > count))
    }

    async fn create(&self, new_employee: &NewEmployee) -> Result<Employee, DomainError> {
        let mut employees = self.employees.write().unwrap();
        if employees.values().any(|e| e.email == new_employee.email) {
            return Err(DomainError::duplicate_key(
                "Employee",
                "email",
                &new_employee.email,
            ));
        }

        let employee = Employee {
            id: EmployeeId::new(),
            first_name: new_employee.first_name.clone(),
            last_name: new_employee.last_name.clone(),
            email: new_employee.email.clone(),
            position: new_employee.position.clone(),
            hire_date: new_employee.hire_date,
            salary: new_employee.salary,
        };
        employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, DomainError> {
        let mut employees = self.employees.write().unwrap();
        if employees
            .values()
            .any(|e| e.id != employee.id && e.email == employee.email)
        {
            return Err(DomainError::duplicate_key(
                "Employee",
                "email",
                &employee.email,
            ));
        }
        match employees.get_mut(&employee.id) {
            Some(stored) => {
                *stored = employee.clone();
                Ok(employee.clone())
            }
            None => Err(DomainError::not_found("Employee", "id", employee.id)),
        }
    }

    async fn delete(&self, id: &EmployeeId) -> Result<(), DomainError> {
        self.team_members
            .write()
            .unwrap()
            .retain(|(_, e)| e != id);
        self.task_assignees
            .write()
            .unwrap()
            .retain(|(_, e)| e != id);
        self.employees.write().unwrap().remove(id);
        Ok(())
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        let team = self.teams.read().unwrap().get(id).cloned();
        Ok(team.map(|t| self.hydrate_team(&t)))
    }

    async fn find_all(&self) -> Result<Vec<Team>, DomainError> {
        Ok(self.select_teams(|_| true))
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Team>, DomainError> {
        Ok(self.select_teams(|t| t.name_contains(name)))
    }

    async fn find_by_member(&self, employee_id: &EmployeeId) -> Result<Vec<Team>, DomainError> {
        Ok(self.select_teams(|t| t.has_member(employee_id)))
    }

    async fn find_created_after(&self, date: NaiveDate) -> Result<Vec<Team>, DomainError> {
        Ok(self.select_teams(|t| t.created_date > date))
    }

    async fn find_with_more_than_n_projects(
        &self,
        count: usize,
    ) -> Result<Vec<Team>, DomainError> {
        let mut per_team: HashMap<TeamId, usize> = HashMap::new();
        for project in self.projects.read().unwrap().values() {
            if let Some(team_id) = project.team_id {
                *per_team.entry(team_id).or_default() += 1;
            }
        }
        Ok(self.select_teams(|t| per_team.get(&t.id).copied().unwrap_or(0) > count))
    }

    async fn create(&self, new_team: &NewTeam, created_date: NaiveDate) -> Result<Team, DomainError> {
        let team = Team {
            id: TeamId::new(),
            name: new_team.name.clone(),
            description: new_team.description.clone(),
            created_date,
            member_ids: BTreeSet::new(),
        };
        self.teams.write().unwrap().insert(team.id, team.clone());
        Ok(team)
    }

    async fn update(&self, team: &Team) -> Result<Team, DomainError> {
        {
            let mut teams = self.teams.write().unwrap();
            let stored = teams
                .get_mut(&team.id)
                .ok_or_else(|| DomainError::not_found("Team", "id", team.id))?;
            stored.name = team.name.clone();
            stored.description = team.description.clone();
            stored.created_date = team.created_date;
        }
        TeamRepository::find_by_id(self, &team.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Team", "id", team.id))
    }

    async fn delete(&self, id: &TeamId) -> Result<TeamRemoval, DomainError> {
        self.check_delete()?;

        let project_ids: BTreeSet<ProjectId> = self
            .projects
            .read()
            .unwrap()
            .values()
            .filter(|p| p.is_owned_by(id))
            .map(|p| p.id)
            .collect();
        let tasks = self.remove_projects(&project_ids);
        self.team_members
            .write()
            .unwrap()
            .retain(|(t, _)| t != id);
        self.teams.write().unwrap().remove(id);
        Ok(TeamRemoval {
            projects: project_ids.len() as u64,
            tasks,
        })
    }

    async fn add_member(
        &self,
        team_id: &TeamId,
        employee_id: &EmployeeId,
    ) -> Result<(), DomainError> {
        self.team_members
            .write()
            .unwrap()
            .insert((*team_id, *employee_id));
        Ok(())
    }

    async fn remove_member(
        &self,
        team_id: &TeamId,
        employee_id: &EmployeeId,
    ) -> Result<(), DomainError> {
        self.team_members
            .write()
            .unwrap()
            .remove(&(*team_id, *employee_id));
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        let projects = self.projects.read().unwrap();
        Ok(projects.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Project>, DomainError> {
        Ok(self.select_projects(|_| true))
    }

    async fn find_by_status(&self, status: ProjectStatus) -> Result<Vec<Project>, DomainError> {
        Ok(self.select_projects(|p| p.status == status))
    }

    async fn find_by_team(&self, team_id: &TeamId) -> Result<Vec<Project>, DomainError> {
        Ok(self.select_projects(|p| p.is_owned_by(team_id)))
    }

    async fn find_by_status_and_team(
        &self,
        status: ProjectStatus,
        team_id: &TeamId,
    ) -> Result<Vec<Project>, DomainError> {
        Ok(self.select_projects(|p| p.status == status && p.is_owned_by(team_id)))
    }

    async fn find_overdue(&self, today: NaiveDate) -> Result<Vec<Project>, DomainError> {
        Ok(self.select_projects(|p| p.is_overdue(today)))
    }

    async fn find_by_start_date_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Project>, DomainError> {
        Ok(self.select_projects(|p| p.start_date >= from && p.start_date <= to))
    }

    async fn find_by_budget_greater_than(
        &self,
        amount: f64,
    ) -> Result<Vec<Project>, DomainError> {
        Ok(self.select_projects(|p| p.budget.is_some_and(|b| b > amount)))
    }

    async fn create(
        &self,
        new_project: &NewProject,
        status: ProjectStatus,
    ) -> Result<Project, DomainError> {
        let project = Project {
            id: ProjectId::new(),
            name: new_project.name.clone(),
            description: new_project.description.clone(),
            budget: new_project.budget,
            start_date: new_project.start_date,
            end_date: new_project.end_date,
            status,
            team_id: None,
        };
        self.projects
            .write()
            .unwrap()
            .insert(project.id, project.clone());
        Ok(project)
    }

    async fn update(&self, project: &Project) -> Result<Project, DomainError> {
        let mut projects = self.projects.write().unwrap();
        match projects.get_mut(&project.id) {
            Some(stored) => {
                *stored = project.clone();
                Ok(project.clone())
            }
            None => Err(DomainError::not_found("Project", "id", project.id)),
        }
    }

    async fn delete(&self, id: &ProjectId) -> Result<u64, DomainError> {
        self.check_delete()?;

        Ok(self.remove_projects(&BTreeSet::from([*id])))
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, DomainError> {
        let task = self.tasks.read().unwrap().get(id).cloned();
        Ok(task.map(|t| self.hydrate_task(&t)))
    }

    async fn find_all(&self) -> Result<Vec<Task>, DomainError> {
        Ok(self.select_tasks(|_| true))
    }

    async fn find_by_project(&self, project_id: &ProjectId) -> Result<Vec<Task>, DomainError> {
        Ok(self.select_tasks(|t| t.belongs_to(project_id)))
    }

    async fn find_by_assignee(&self, employee_id: &EmployeeId) -> Result<Vec<Task>, DomainError> {
        Ok(self.select_tasks(|t| t.is_assigned_to(employee_id)))
    }

    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, DomainError> {
        Ok(self.select_tasks(|t| t.status == status))
    }

    async fn find_by_priority(&self, priority: TaskPriority) -> Result<Vec<Task>, DomainError> {
        Ok(self.select_tasks(|t| t.priority == priority))
    }

    async fn find_by_priority_and_status(
        &self,
        priority: TaskPriority,
        status: TaskStatus,
    ) -> Result<Vec<Task>, DomainError> {
        Ok(self.select_tasks(|t| t.priority == priority && t.status == status))
    }

    async fn find_due_before(&self, date: NaiveDate) -> Result<Vec<Task>, DomainError> {
        Ok(self.select_tasks(|t| t.due_date.is_some_and(|d| d < date)))
    }

    async fn find_incomplete_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Task>, DomainError> {
        Ok(self.select_tasks(|t| t.belongs_to(project_id) && !t.is_done()))
    }

    async fn count_by_project_and_status(
        &self,
        project_id: &ProjectId,
        status: TaskStatus,
    ) -> Result<u64, DomainError> {
        let tasks = self.tasks.read().unwrap();
        Ok(tasks
            .values()
            .filter(|t| t.belongs_to(project_id) && t.status == status)
            .count() as u64)
    }

    async fn create(
        &self,
        new_task: &NewTask,
        priority: TaskPriority,
        status: TaskStatus,
    ) -> Result<Task, DomainError> {
        let task = Task {
            id: TaskId::new(),
            title: new_task.title.clone(),
            description: new_task.description.clone(),
            priority,
            status,
            estimated_hours: new_task.estimated_hours,
            due_date: new_task.due_date,
            project_id: None,
            assignee_ids: BTreeSet::new(),
        };
        self.tasks.write().unwrap().insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, task: &Task) -> Result<Task, DomainError> {
        {
            let mut tasks = self.tasks.write().unwrap();
            let stored = tasks
                .get_mut(&task.id)
                .ok_or_else(|| DomainError::not_found("Task", "id", task.id))?;
            let mut updated = task.clone();
            updated.assignee_ids.clear();
            *stored = updated;
        }
        TaskRepository::find_by_id(self, &task.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Task", "id", task.id))
    }

    async fn delete(&self, id: &TaskId) -> Result<(), DomainError> {
        self.task_assignees
            .write()
            .unwrap()
            .retain(|(t, _)| t != id);
        self.tasks.write().unwrap().remove(id);
        Ok(())
    }

    async fn add_assignee(
        &self,
        task_id: &TaskId,
        employee_id: &EmployeeId,
    ) -> Result<(), DomainError> {
        self.task_assignees
            .write()
            .unwrap()
            .insert((*task_id, *employee_id));
        Ok(())
    }

    async fn remove_assignee(
        &self,
        task_id: &TaskId,
        employee_id: &EmployeeId,
    ) -> Result<(), DomainError> {
        self.task_assignees
            .write()
            .unwrap()
            .remove(&(*task_id, *employee_id));
        Ok(())
    }
}
