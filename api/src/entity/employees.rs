use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub position: Option<String>,
    pub hire_date: Option<Date>,
    pub salary: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::team_employees::Entity")]
    TeamEmployees,
    #[sea_orm(has_many = "super::task_employees::Entity")]
    TaskEmployees,
}

impl Related<super::team_employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamEmployees.def()
    }
}

impl Related<super::task_employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaskEmployees.def()
    }
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        super::team_employees::Relation::Team.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::team_employees::Relation::Employee.def().rev())
    }
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef {
        super::task_employees::Relation::Task.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::task_employees::Relation::Employee.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
