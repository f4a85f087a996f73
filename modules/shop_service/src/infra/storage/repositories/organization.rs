use super::{delete_row, fetch_page};
use crate::contract::{
    Membership, Page, PageRequest, Pole, PoleDraft, RoleAssignment,
    RoleAssignmentDraft, RoleFilter, ServiceUnit, ServiceUnitDraft, Team, TeamDraft, UnitRef,
};
use crate::domain::repository::OrganizationRepository;
use crate::infra::storage::entity::organization::{
    org_service, pole, role_assignment, service_member, team, team_member,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;

pub struct SeaOrmOrganizationRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOrganizationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrganizationRepository for SeaOrmOrganizationRepository {
    // ===== Poles =====

    async fn list_poles(&self, page: PageRequest) -> Result<Page<Pole>> {
        let select = pole::Entity::find().order_by_asc(pole::Column::Name);
        fetch_page(&*self.db, select, page).await?.try_map(Pole::try_from)
    }

    async fn find_pole(&self, id: i64) -> Result<Option<Pole>> {
        pole::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Pole::try_from)
            .transpose()
    }

    async fn create_pole(&self, draft: &PoleDraft) -> Result<Pole> {
        let now = Utc::now();
        let active = pole::ActiveModel {
            name: Set(draft.name.clone()),
            code: Set(draft.code.as_str().to_string()),
            description: Set(draft.description.clone()),
            responsible_id: Set(draft.responsible_id),
            active: Set(draft.active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let row = pole::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Pole::try_from(row)
    }

    async fn update_pole(&self, id: i64, draft: &PoleDraft) -> Result<Option<Pole>> {
        let Some(row) = pole::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: pole::ActiveModel = row.into();
        active.name = Set(draft.name.clone());
        active.code = Set(draft.code.as_str().to_string());
        active.description = Set(draft.description.clone());
        active.responsible_id = Set(draft.responsible_id);
        active.active = Set(draft.active);
        active.updated_at = Set(Utc::now());
        Pole::try_from(active.update(&*self.db).await?).map(Some)
    }

    async fn delete_pole(&self, id: i64) -> Result<bool> {
        delete_row::<pole::Entity, _>(&*self.db, id).await
    }

    // ===== Services =====

    async fn list_services(
        &self,
        pole: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<ServiceUnit>> {
        let mut select = org_service::Entity::find().order_by_asc(org_service::Column::Name);
        if let Some(pole_id) = pole {
            select = select.filter(org_service::Column::PoleId.eq(pole_id));
        }
        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn find_service(&self, id: i64) -> Result<Option<ServiceUnit>> {
        let row = org_service::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create_service(&self, draft: &ServiceUnitDraft) -> Result<ServiceUnit> {
        let now = Utc::now();
        let active = org_service::ActiveModel {
            name: Set(draft.name.clone()),
            description: Set(draft.description.clone()),
            pole_id: Set(draft.pole_id),
            responsible_id: Set(draft.responsible_id),
            active: Set(draft.active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let row = org_service::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(row.into())
    }

    async fn update_service(
        &self,
        id: i64,
        draft: &ServiceUnitDraft,
    ) -> Result<Option<ServiceUnit>> {
        let Some(row) = org_service::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: org_service::ActiveModel = row.into();
        active.name = Set(draft.name.clone());
        active.description = Set(draft.description.clone());
        active.pole_id = Set(draft.pole_id);
        active.responsible_id = Set(draft.responsible_id);
        active.active = Set(draft.active);
        active.updated_at = Set(Utc::now());
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete_service(&self, id: i64) -> Result<bool> {
        delete_row::<org_service::Entity, _>(&*self.db, id).await
    }

    // ===== Teams =====

    async fn list_teams(&self, service: Option<i64>, page: PageRequest) -> Result<Page<Team>> {
        let mut select = team::Entity::find().order_by_asc(team::Column::Name);
        if let Some(service_id) = service {
            select = select.filter(team::Column::ServiceId.eq(service_id));
        }
        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn find_team(&self, id: i64) -> Result<Option<Team>> {
        let row = team::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create_team(&self, draft: &TeamDraft) -> Result<Team> {
        let now = Utc::now();
        let active = team::ActiveModel {
            name: Set(draft.name.clone()),
            description: Set(draft.description.clone()),
            service_id: Set(draft.service_id),
            responsible_id: Set(draft.responsible_id),
            active: Set(draft.active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let row = team::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(row.into())
    }

    async fn update_team(&self, id: i64, draft: &TeamDraft) -> Result<Option<Team>> {
        let Some(row) = team::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: team::ActiveModel = row.into();
        active.name = Set(draft.name.clone());
        active.description = Set(draft.description.clone());
        active.service_id = Set(draft.service_id);
        active.responsible_id = Set(draft.responsible_id);
        active.active = Set(draft.active);
        active.updated_at = Set(Utc::now());
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete_team(&self, id: i64) -> Result<bool> {
        delete_row::<team::Entity, _>(&*self.db, id).await
    }

    // ===== Members =====

    async fn list_members(&self, unit: UnitRef) -> Result<Vec<Membership>> {
        let members = match unit {
            UnitRef::Service(service_id) => service_member::Entity::find()
                .filter(service_member::Column::ServiceId.eq(service_id))
                .order_by_asc(service_member::Column::Id)
                .all(&*self.db)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
            UnitRef::Team(team_id) => team_member::Entity::find()
                .filter(team_member::Column::TeamId.eq(team_id))
                .order_by_asc(team_member::Column::Id)
                .all(&*self.db)
                .await?
                .into_iter()
                .map(Into::into)
                .collect(),
        };
        Ok(members)
    }

    async fn add_member(&self, unit: UnitRef, account_id: i64) -> Result<Membership> {
        let now = Utc::now();
        let membership = match unit {
            UnitRef::Service(service_id) => {
                let active = service_member::ActiveModel {
                    service_id: Set(service_id),
                    account_id: Set(account_id),
                    assigned_at: Set(now),
                    active: Set(true),
                    ..Default::default()
                };
                service_member::Entity::insert(active)
                    .exec_with_returning(&*self.db)
                    .await?
                    .into()
            }
            UnitRef::Team(team_id) => {
                let active = team_member::ActiveModel {
                    team_id: Set(team_id),
                    account_id: Set(account_id),
                    assigned_at: Set(now),
                    active: Set(true),
                    ..Default::default()
                };
                team_member::Entity::insert(active)
                    .exec_with_returning(&*self.db)
                    .await?
                    .into()
            }
        };
        Ok(membership)
    }

    async fn remove_member(&self, unit: UnitRef, account_id: i64) -> Result<bool> {
        let result = match unit {
            UnitRef::Service(service_id) => {
                service_member::Entity::delete_many()
                    .filter(service_member::Column::ServiceId.eq(service_id))
                    .filter(service_member::Column::AccountId.eq(account_id))
                    .exec(&*self.db)
                    .await?
            }
            UnitRef::Team(team_id) => {
                team_member::Entity::delete_many()
                    .filter(team_member::Column::TeamId.eq(team_id))
                    .filter(team_member::Column::AccountId.eq(account_id))
                    .exec(&*self.db)
                    .await?
            }
        };
        Ok(result.rows_affected > 0)
    }

    // ===== Role assignments =====

    async fn list_roles(
        &self,
        filter: &RoleFilter,
        page: PageRequest,
    ) -> Result<Page<RoleAssignment>> {
        let mut select = role_assignment::Entity::find()
            .order_by_desc(role_assignment::Column::AssignedAt)
            .order_by_desc(role_assignment::Column::Id);
        if let Some(account_id) = filter.account {
            select = select.filter(role_assignment::Column::AccountId.eq(account_id));
        }
        if let Some(role) = filter.role {
            select = select.filter(role_assignment::Column::Role.eq(role.as_str()));
        }
        if let Some(pole_id) = filter.pole {
            select = select.filter(role_assignment::Column::PoleId.eq(pole_id));
        }
        if let Some(active) = filter.active {
            select = select.filter(role_assignment::Column::Active.eq(active));
        }
        fetch_page(&*self.db, select, page)
            .await?
            .try_map(RoleAssignment::try_from)
    }

    async fn find_role(&self, id: i64) -> Result<Option<RoleAssignment>> {
        role_assignment::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(RoleAssignment::try_from)
            .transpose()
    }

    async fn role_exists(&self, draft: &RoleAssignmentDraft, except: Option<i64>) -> Result<bool> {
        let scope = [
            (role_assignment::Column::PoleId, draft.pole_id),
            (role_assignment::Column::ServiceId, draft.service_id),
            (role_assignment::Column::TeamId, draft.team_id),
        ];
        let mut select = role_assignment::Entity::find()
            .filter(role_assignment::Column::AccountId.eq(draft.account_id))
            .filter(role_assignment::Column::Role.eq(draft.role.as_str()));
        for (column, value) in scope {
            select = match value {
                Some(id) => select.filter(column.eq(id)),
                None => select.filter(column.is_null()),
            };
        }
        if let Some(id) = except {
            select = select.filter(role_assignment::Column::Id.ne(id));
        }
        Ok(select.count(&*self.db).await? > 0)
    }

    async fn create_role(&self, draft: &RoleAssignmentDraft) -> Result<RoleAssignment> {
        let active = role_assignment::ActiveModel {
            account_id: Set(draft.account_id),
            role: Set(draft.role.as_str().to_string()),
            pole_id: Set(draft.pole_id),
            service_id: Set(draft.service_id),
            team_id: Set(draft.team_id),
            assigned_at: Set(Utc::now()),
            active: Set(draft.active),
            ..Default::default()
        };
        let row = role_assignment::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        RoleAssignment::try_from(row)
    }

    async fn update_role(
        &self,
        id: i64,
        draft: &RoleAssignmentDraft,
    ) -> Result<Option<RoleAssignment>> {
        let Some(row) = role_assignment::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: role_assignment::ActiveModel = row.into();
        active.account_id = Set(draft.account_id);
        active.role = Set(draft.role.as_str().to_string());
        active.pole_id = Set(draft.pole_id);
        active.service_id = Set(draft.service_id);
        active.team_id = Set(draft.team_id);
        active.active = Set(draft.active);
        RoleAssignment::try_from(active.update(&*self.db).await?).map(Some)
    }

    async fn delete_role(&self, id: i64) -> Result<bool> {
        delete_row::<role_assignment::Entity, _>(&*self.db, id).await
    }
}
