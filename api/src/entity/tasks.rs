use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// LOW, MEDIUM, HIGH or CRITICAL
    pub priority: String,
    /// TODO, IN_PROGRESS or DONE
    pub status: String,
    pub estimated_hours: Option<i32>,
    pub due_date: Option<Date>,
    pub project_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Project,
    #[sea_orm(has_many = "super::task_employees::Entity")]
    TaskEmployees,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::task_employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaskEmployees.def()
    }
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        super::task_employees::Relation::Employee.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::task_employees::Relation::Task.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
