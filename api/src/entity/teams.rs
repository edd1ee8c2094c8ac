use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::projects::Entity")]
    Projects,
    #[sea_orm(has_many = "super::team_employees::Entity")]
    TeamEmployees,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::team_employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamEmployees.def()
    }
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        super::team_employees::Relation::Employee.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::team_employees::Relation::Team.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
