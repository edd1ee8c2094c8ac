//! SeaORM adapter for TeamRepository

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Func, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use super::contains_pattern;
use super::project_repo::delete_projects;
use crate::domain::entities::{EmployeeId, NewTeam, Team, TeamId};
use crate::domain::ports::{TeamRemoval, TeamRepository};
use crate::entity::{projects, team_employees, teams};
use crate::error::DomainError;

/// SQL implementation of TeamRepository
pub struct SqlTeamRepository {
    db: DatabaseConnection,
}

impl SqlTeamRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach membership sets to loaded team rows
    async fn with_members(&self, models: Vec<teams::Model>) -> Result<Vec<Team>, DomainError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let rows = team_employees::Entity::find()
            .filter(team_employees::Column::TeamId.is_in(ids))
            .all(&self.db)
            .await?;

        let mut members: HashMap<Uuid, BTreeSet<EmployeeId>> = HashMap::new();
        for row in rows {
            members
                .entry(row.team_id)
                .or_default()
                .insert(EmployeeId(row.employee_id));
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let member_ids = members.remove(&m.id).unwrap_or_default();
                to_team(m, member_ids)
            })
            .collect())
    }

    async fn select(&self, condition: Condition) -> Result<Vec<Team>, DomainError> {
        let results = teams::Entity::find()
            .filter(condition)
            .order_by_asc(teams::Column::Name)
            .all(&self.db)
            .await?;

        self.with_members(results).await
    }
}

#[async_trait]
impl TeamRepository for SqlTeamRepository {
    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        let result = teams::Entity::find_by_id(id.0).one(&self.db).await?;

        match result {
            Some(model) => Ok(self.with_members(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Team>, DomainError> {
        self.select(Condition::all()).await
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Team>, DomainError> {
        if !name.is_ascii() {
            let all = self.select(Condition::all()).await?;
            return Ok(all.into_iter().filter(|t| t.name_contains(name)).collect());
        }

        self.select(Condition::all().add(
            Expr::expr(Func::lower(Expr::col(teams::Column::Name))).like(contains_pattern(name)),
        ))
        .await
    }

    async fn find_by_member(&self, employee_id: &EmployeeId) -> Result<Vec<Team>, DomainError> {
        let results = teams::Entity::find()
            .join(JoinType::InnerJoin, teams::Relation::TeamEmployees.def())
            .filter(team_employees::Column::EmployeeId.eq(employee_id.0))
            .order_by_asc(teams::Column::Name)
            .all(&self.db)
            .await?;

        self.with_members(results).await
    }

    async fn find_created_after(&self, date: NaiveDate) -> Result<Vec<Team>, DomainError> {
        self.select(Condition::all().add(teams::Column::CreatedDate.gt(date)))
            .await
    }

    async fn find_with_more_than_n_projects(
        &self,
        count: usize,
    ) -> Result<Vec<Team>, DomainError> {
        let ids: Vec<Option<Uuid>> = projects::Entity::find()
            .select_only()
            .column(projects::Column::TeamId)
            .filter(projects::Column::TeamId.is_not_null())
            .group_by(projects::Column::TeamId)
            .having(Expr::expr(Func::count(Expr::col(projects::Column::Id))).gt(count as i64))
            .into_tuple()
            .all(&self.db)
            .await?;

        let ids: Vec<Uuid> = ids.into_iter().flatten().collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.select(Condition::all().add(teams::Column::Id.is_in(ids)))
            .await
    }

    async fn create(&self, team: &NewTeam, created_date: NaiveDate) -> Result<Team, DomainError> {
        let model = teams::ActiveModel {
            id: Set(TeamId::new().0),
            name: Set(team.name.clone()),
            description: Set(team.description.clone()),
            created_date: Set(created_date),
        };

        let result = model.insert(&self.db).await?;

        Ok(to_team(result, BTreeSet::new()))
    }

    async fn update(&self, team: &Team) -> Result<Team, DomainError> {
        let model = teams::ActiveModel {
            id: Set(team.id.0),
            name: Set(team.name.clone()),
            description: Set(team.description.clone()),
            created_date: Set(team.created_date),
        };

        let result = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found("Team", "id", team.id),
            e => e.into(),
        })?;

        self.with_members(vec![result])
            .await?
            .pop()
            .ok_or_else(|| DomainError::not_found("Team", "id", team.id))
    }

    async fn delete(&self, id: &TeamId) -> Result<TeamRemoval, DomainError> {
        let txn = self.db.begin().await?;

        let project_ids: Vec<Uuid> = projects::Entity::find()
            .select_only()
            .column(projects::Column::Id)
            .filter(projects::Column::TeamId.eq(id.0))
            .into_tuple()
            .all(&txn)
            .await?;
        let tasks = delete_projects(&txn, &project_ids).await?;

        team_employees::Entity::delete_many()
            .filter(team_employees::Column::TeamId.eq(id.0))
            .exec(&txn)
            .await?;

        teams::Entity::delete_by_id(id.0).exec(&txn).await?;

        txn.commit().await?;

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
        let row = team_employees::ActiveModel {
            team_id: Set(team_id.0),
            employee_id: Set(employee_id.0),
        };

        // An existing membership is left as is
        team_employees::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    team_employees::Column::TeamId,
                    team_employees::Column::EmployeeId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .do_nothing()
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    async fn remove_member(
        &self,
        team_id: &TeamId,
        employee_id: &EmployeeId,
    ) -> Result<(), DomainError> {
        team_employees::Entity::delete_many()
            .filter(team_employees::Column::TeamId.eq(team_id.0))
            .filter(team_employees::Column::EmployeeId.eq(employee_id.0))
            .exec(&self.db)
            .await?;

        Ok(())
    }
}

fn to_team(model: teams::Model, member_ids: BTreeSet<EmployeeId>) -> Team {
    Team {
        id: TeamId(model.id),
        name: model.name,
        description: model.description,
        created_date: model.created_date,
        member_ids,
    }
}
