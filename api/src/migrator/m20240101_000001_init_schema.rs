//! Initial schema: four entity tables and two join tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // 1. employees
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Employee::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Employee::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(Employee::LastName).string_len(50).not_null())
                    .col(ColumnDef::new(Employee::Email).string_len(100).not_null())
                    .col(ColumnDef::new(Employee::Position).string_len(100))
                    .col(ColumnDef::new(Employee::HireDate).date())
                    .col(ColumnDef::new(Employee::Salary).double())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employees_email")
                    .table(Employee::Table)
                    .col(Employee::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 2. teams
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Team::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Team::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Team::Description).text())
                    .col(ColumnDef::new(Team::CreatedDate).date().not_null())
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 3. projects (owned by teams)
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Project::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Project::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Project::Name).string_len(150).not_null())
                    .col(ColumnDef::new(Project::Description).text())
                    .col(ColumnDef::new(Project::Budget).double())
                    .col(ColumnDef::new(Project::StartDate).date().not_null())
                    .col(ColumnDef::new(Project::EndDate).date())
                    .col(
                        ColumnDef::new(Project::Status)
                            .string_len(32)
                            .not_null()
                            .default("PLANNED"),
                    )
                    .col(ColumnDef::new(Project::TeamId).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_team_id")
                            .from(Project::Table, Project::TeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_projects_team_id")
                    .table(Project::Table)
                    .col(Project::TeamId)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 4. tasks (owned by projects)
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Task::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Task::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Task::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Task::Description).text())
                    .col(
                        ColumnDef::new(Task::Priority)
                            .string_len(32)
                            .not_null()
                            .default("MEDIUM"),
                    )
                    .col(
                        ColumnDef::new(Task::Status)
                            .string_len(32)
                            .not_null()
                            .default("TODO"),
                    )
                    .col(ColumnDef::new(Task::EstimatedHours).integer())
                    .col(ColumnDef::new(Task::DueDate).date())
                    .col(ColumnDef::new(Task::ProjectId).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_project_id")
                            .from(Task::Table, Task::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tasks_project_id")
                    .table(Task::Table)
                    .col(Task::ProjectId)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 5. team_employees junction table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(TeamEmployee::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TeamEmployee::TeamId).uuid().not_null())
                    .col(ColumnDef::new(TeamEmployee::EmployeeId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(TeamEmployee::TeamId)
                            .col(TeamEmployee::EmployeeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_employees_team_id")
                            .from(TeamEmployee::Table, TeamEmployee::TeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_employees_employee_id")
                            .from(TeamEmployee::Table, TeamEmployee::EmployeeId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_team_employees_employee_id")
                    .table(TeamEmployee::Table)
                    .col(TeamEmployee::EmployeeId)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 6. task_employees junction table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(TaskEmployee::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TaskEmployee::TaskId).uuid().not_null())
                    .col(ColumnDef::new(TaskEmployee::EmployeeId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(TaskEmployee::TaskId)
                            .col(TaskEmployee::EmployeeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_employees_task_id")
                            .from(TaskEmployee::Table, TaskEmployee::TaskId)
                            .to(Task::Table, Task::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_employees_employee_id")
                            .from(TaskEmployee::Table, TaskEmployee::EmployeeId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_task_employees_employee_id")
                    .table(TaskEmployee::Table)
                    .col(TaskEmployee::EmployeeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order (respecting foreign keys)
        manager
            .drop_table(Table::drop().table(TaskEmployee::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TeamEmployee::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Task::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Project::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Team::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Employee::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Employee {
    #[sea_orm(iden = "employees")]
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Position,
    HireDate,
    Salary,
}

#[derive(DeriveIden)]
enum Team {
    #[sea_orm(iden = "teams")]
    Table,
    Id,
    Name,
    Description,
    CreatedDate,
}

#[derive(DeriveIden)]
enum Project {
    #[sea_orm(iden = "projects")]
    Table,
    Id,
    Name,
    Description,
    Budget,
    StartDate,
    EndDate,
    Status,
    TeamId,
}

#[derive(DeriveIden)]
enum Task {
    #[sea_orm(iden = "tasks")]
    Table,
    Id,
    Title,
    Description,
    Priority,
    Status,
    EstimatedHours,
    DueDate,
    ProjectId,
}

#[derive(DeriveIden)]
enum TeamEmployee {
    #[sea_orm(iden = "team_employees")]
    Table,
    TeamId,
    EmployeeId,
}

#[derive(DeriveIden)]
enum TaskEmployee {
    #[sea_orm(iden = "task_employees")]
    Table,
    TaskId,
    EmployeeId,
}
