//! Staff organization: poles, services, teams, memberships, roles

use super::Service;
use crate::contract::{
    AuthContext, Membership, Page, PageRequest, Pole, PoleDraft, RoleAssignment,
    RoleAssignmentDraft, RoleFilter, ServiceUnit, ServiceUnitDraft, ShopError, Team, TeamDraft,
    UnitRef,
};
use crate::domain::access::require_authenticated;
use crate::domain::errors::map_storage_error;
use crate::domain::validation::{validate_role_scope, FieldErrors};

fn required_name(name: &str) -> Result<(), ShopError> {
    let mut errors = FieldErrors::new();
    errors.require_text("name", name);
    errors.into_result()
}

impl Service {
    // ===== Poles =====

    pub async fn list_poles(
        &self,
        ctx: &AuthContext,
        page: PageRequest,
    ) -> Result<Page<Pole>, ShopError> {
        require_authenticated(ctx)?;
        self.organization
            .list_poles(page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_pole(&self, ctx: &AuthContext, id: i64) -> Result<Pole, ShopError> {
        require_authenticated(ctx)?;
        self.organization
            .find_pole(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("pole", id))
    }

    pub async fn create_pole(&self, ctx: &AuthContext, draft: PoleDraft) -> Result<Pole, ShopError> {
        require_authenticated(ctx)?;
        required_name(&draft.name)?;
        self.organization
            .create_pole(&draft)
            .await
            .map_err(map_storage_error)
    }

    pub async fn update_pole(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: PoleDraft,
    ) -> Result<Pole, ShopError> {
        require_authenticated(ctx)?;
        required_name(&draft.name)?;
        self.organization
            .update_pole(id, &draft)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("pole", id))
    }

    pub async fn delete_pole(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_authenticated(ctx)?;
        let deleted = self
            .organization
            .delete_pole(id)
            .await
            .map_err(map_storage_error)?;
        deleted
            .then_some(())
            .ok_or_else(|| ShopError::not_found("pole", id))
    }

    // ===== Services =====

    pub async fn list_services(
        &self,
        ctx: &AuthContext,
        pole: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<ServiceUnit>, ShopError> {
        require_authenticated(ctx)?;
        self.organization
            .list_services(pole, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_service(&self, ctx: &AuthContext, id: i64) -> Result<ServiceUnit, ShopError> {
        require_authenticated(ctx)?;
        self.organization
            .find_service(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("service", id))
    }

    pub async fn create_service(
        &self,
        ctx: &AuthContext,
        draft: ServiceUnitDraft,
    ) -> Result<ServiceUnit, ShopError> {
        require_authenticated(ctx)?;
        required_name(&draft.name)?;
        self.organization
            .create_service(&draft)
            .await
            .map_err(map_storage_error)
    }

    pub async fn update_service(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: ServiceUnitDraft,
    ) -> Result<ServiceUnit, ShopError> {
        require_authenticated(ctx)?;
        required_name(&draft.name)?;
        self.organization
            .update_service(id, &draft)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("service", id))
    }

    pub async fn delete_service(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_authenticated(ctx)?;
        let deleted = self
            .organization
            .delete_service(id)
            .await
            .map_err(map_storage_error)?;
        deleted
            .then_some(())
            .ok_or_else(|| ShopError::not_found("service", id))
    }

    // ===== Teams =====

    pub async fn list_teams(
        &self,
        ctx: &AuthContext,
        service: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<Team>, ShopError> {
        require_authenticated(ctx)?;
        self.organization
            .list_teams(service, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_team(&self, ctx: &AuthContext, id: i64) -> Result<Team, ShopError> {
        require_authenticated(ctx)?;
        self.organization
            .find_team(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("team", id))
    }

    pub async fn create_team(&self, ctx: &AuthContext, draft: TeamDraft) -> Result<Team, ShopError> {
        require_authenticated(ctx)?;
        required_name(&draft.name)?;
        self.organization
            .create_team(&draft)
            .await
            .map_err(map_storage_error)
    }

    pub async fn update_team(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: TeamDraft,
    ) -> Result<Team, ShopError> {
        require_authenticated(ctx)?;
        required_name(&draft.name)?;
        self.organization
            .update_team(id, &draft)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("team", id))
    }

    pub async fn delete_team(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_authenticated(ctx)?;
        let deleted = self
            .organization
            .delete_team(id)
            .await
            .map_err(map_storage_error)?;
        deleted
            .then_some(())
            .ok_or_else(|| ShopError::not_found("team", id))
    }

    // ===== Members =====

    pub async fn list_members(
        &self,
        ctx: &AuthContext,
        unit: UnitRef,
    ) -> Result<Vec<Membership>, ShopError> {
        self.existing_unit(ctx, unit).await?;
        self.organization
            .list_members(unit)
            .await
            .map_err(map_storage_error)
    }

    pub async fn add_member(
        &self,
        ctx: &AuthContext,
        unit: UnitRef,
        account_id: i64,
    ) -> Result<Membership, ShopError> {
        self.existing_unit(ctx, unit).await?;
        let membership = self
            .organization
            .add_member(unit, account_id)
            .await
            .map_err(map_storage_error)?;
        tracing::debug!(?unit, account_id, "Member added");
        Ok(membership)
    }

    pub async fn remove_member(
        &self,
        ctx: &AuthContext,
        unit: UnitRef,
        account_id: i64,
    ) -> Result<(), ShopError> {
        self.existing_unit(ctx, unit).await?;
        let removed = self
            .organization
            .remove_member(unit, account_id)
            .await
            .map_err(map_storage_error)?;
        removed
            .then_some(())
            .ok_or_else(|| ShopError::not_found("member", account_id))
    }

    async fn existing_unit(&self, ctx: &AuthContext, unit: UnitRef) -> Result<(), ShopError> {
        match unit {
            UnitRef::Service(id) => self.get_service(ctx, id).await.map(|_| ()),
            UnitRef::Team(id) => self.get_team(ctx, id).await.map(|_| ()),
        }
    }

    // ===== Role assignments =====

    pub async fn list_roles(
        &self,
        ctx: &AuthContext,
        filter: RoleFilter,
        page: PageRequest,
    ) -> Result<Page<RoleAssignment>, ShopError> {
        require_authenticated(ctx)?;
        self.organization
            .list_roles(&filter, page)
            .await
            .map_err(map_storage_error)
    }

    pub async fn get_role(&self, ctx: &AuthContext, id: i64) -> Result<RoleAssignment, ShopError> {
        require_authenticated(ctx)?;
        self.organization
            .find_role(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("role_assignment", id))
    }

    pub async fn assign_role(
        &self,
        ctx: &AuthContext,
        draft: RoleAssignmentDraft,
    ) -> Result<RoleAssignment, ShopError> {
        require_authenticated(ctx)?;
        self.check_role_scope(&draft).await?;
        self.check_role_unique(&draft, None).await?;
        let assignment = self
            .organization
            .create_role(&draft)
            .await
            .map_err(map_storage_error)?;
        tracing::info!(
            assignment_id = assignment.id,
            account_id = draft.account_id,
            role = %draft.role,
            "Role assigned"
        );
        Ok(assignment)
    }

    pub async fn update_role(
        &self,
        ctx: &AuthContext,
        id: i64,
        draft: RoleAssignmentDraft,
    ) -> Result<RoleAssignment, ShopError> {
        require_authenticated(ctx)?;
        self.check_role_scope(&draft).await?;
        self.check_role_unique(&draft, Some(id)).await?;
        self.organization
            .update_role(id, &draft)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("role_assignment", id))
    }

    pub async fn delete_role(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        require_authenticated(ctx)?;
        let deleted = self
            .organization
            .delete_role(id)
            .await
            .map_err(map_storage_error)?;
        deleted
            .then_some(())
            .ok_or_else(|| ShopError::not_found("role_assignment", id))
    }

    async fn check_role_scope(&self, draft: &RoleAssignmentDraft) -> Result<(), ShopError> {
        let pole = match draft.pole_id {
            Some(pole_id) => Some(
                self.organization
                    .find_pole(pole_id)
                    .await
                    .map_err(map_storage_error)?
                    .ok_or_else(|| ShopError::invalid("pole_id", "unknown pole"))?,
            ),
            None => None,
        };
        validate_role_scope(draft.role, pole.as_ref())
    }

    async fn check_role_unique(
        &self,
        draft: &RoleAssignmentDraft,
        except: Option<i64>,
    ) -> Result<(), ShopError> {
        let exists = self
            .organization
            .role_exists(draft, except)
            .await
            .map_err(map_storage_error)?;
        if exists {
            return Err(ShopError::conflict(
                "the account already holds this role in this scope",
            ));
        }
        Ok(())
    }
}
