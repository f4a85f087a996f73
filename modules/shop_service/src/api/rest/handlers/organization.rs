//! Staff organization handlers: poles, services, teams, members and roles

use super::super::{
    auth::Caller,
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::contract::{PoleDraft, RoleAssignmentDraft, RoleFilter, UnitRef};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

// ===== Poles =====

pub async fn list_poles(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageDto<PoleDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let poles = service
        .list_poles(&ctx, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(poles.into()))
}

pub async fn get_pole(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<PoleDto>, Problem> {
    let pole = service.get_pole(&ctx, id).await.map_err(map_domain_error)?;
    Ok(Json(pole.into()))
}

pub async fn create_pole(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<PoleRequest>,
) -> Result<(StatusCode, Json<PoleDto>), Problem> {
    let draft = PoleDraft::try_from(req).map_err(map_domain_error)?;
    let pole = service
        .create_pole(&ctx, draft)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(pole.into())))
}

pub async fn update_pole(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<PoleRequest>,
) -> Result<Json<PoleDto>, Problem> {
    let draft = PoleDraft::try_from(req).map_err(map_domain_error)?;
    let pole = service
        .update_pole(&ctx, id, draft)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(pole.into()))
}

pub async fn delete_pole(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_pole(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Services =====

pub async fn list_services(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<ServiceUnitQuery>,
) -> Result<Json<PageDto<ServiceUnitDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let units = service
        .list_services(&ctx, query.pole, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(units.into()))
}

pub async fn get_service(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<ServiceUnitDto>, Problem> {
    let unit = service
        .get_service(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(unit.into()))
}

pub async fn create_service(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<ServiceUnitRequest>,
) -> Result<(StatusCode, Json<ServiceUnitDto>), Problem> {
    let unit = service
        .create_service(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(unit.into())))
}

pub async fn update_service(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<ServiceUnitRequest>,
) -> Result<Json<ServiceUnitDto>, Problem> {
    let unit = service
        .update_service(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(unit.into()))
}

pub async fn delete_service(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_service(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Teams =====

pub async fn list_teams(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<TeamQuery>,
) -> Result<Json<PageDto<TeamDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let teams = service
        .list_teams(&ctx, query.service, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(teams.into()))
}

pub async fn get_team(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<TeamDto>, Problem> {
    let team = service.get_team(&ctx, id).await.map_err(map_domain_error)?;
    Ok(Json(team.into()))
}

pub async fn create_team(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<TeamRequest>,
) -> Result<(StatusCode, Json<TeamDto>), Problem> {
    let team = service
        .create_team(&ctx, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(team.into())))
}

pub async fn update_team(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<TeamRequest>,
) -> Result<Json<TeamDto>, Problem> {
    let team = service
        .update_team(&ctx, id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(team.into()))
}

pub async fn delete_team(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_team(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Members =====

async fn members(
    service: &Service,
    ctx: &crate::contract::AuthContext,
    unit: UnitRef,
) -> Result<Json<Vec<MembershipDto>>, Problem> {
    let members = service
        .list_members(ctx, unit)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(members.into_iter().map(Into::into).collect()))
}

async fn add_member(
    service: &Service,
    ctx: &crate::contract::AuthContext,
    unit: UnitRef,
    account_id: i64,
) -> Result<(StatusCode, Json<MembershipDto>), Problem> {
    let membership = service
        .add_member(ctx, unit, account_id)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(membership.into())))
}

async fn remove_member(
    service: &Service,
    ctx: &crate::contract::AuthContext,
    unit: UnitRef,
    account_id: i64,
) -> Result<StatusCode, Problem> {
    service
        .remove_member(ctx, unit, account_id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_service_members(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<Vec<MembershipDto>>, Problem> {
    members(&service, &ctx, UnitRef::Service(id)).await
}

pub async fn add_service_member(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<MemberRequest>,
) -> Result<(StatusCode, Json<MembershipDto>), Problem> {
    add_member(&service, &ctx, UnitRef::Service(id), req.account_id).await
}

pub async fn remove_service_member(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path((id, account_id)): Path<(i64, i64)>,
) -> Result<StatusCode, Problem> {
    remove_member(&service, &ctx, UnitRef::Service(id), account_id).await
}

pub async fn list_team_members(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<Vec<MembershipDto>>, Problem> {
    members(&service, &ctx, UnitRef::Team(id)).await
}

pub async fn add_team_member(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<MemberRequest>,
) -> Result<(StatusCode, Json<MembershipDto>), Problem> {
    add_member(&service, &ctx, UnitRef::Team(id), req.account_id).await
}

pub async fn remove_team_member(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path((id, account_id)): Path<(i64, i64)>,
) -> Result<StatusCode, Problem> {
    remove_member(&service, &ctx, UnitRef::Team(id), account_id).await
}

// ===== Roles =====

pub async fn list_roles(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Query(query): Query<RoleQuery>,
) -> Result<Json<PageDto<RoleAssignmentDto>>, Problem> {
    let page = service.config().page(query.page, query.page_size);
    let filter = RoleFilter::try_from(query).map_err(map_domain_error)?;
    let roles = service
        .list_roles(&ctx, filter, page)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(roles.into()))
}

pub async fn get_role(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<RoleAssignmentDto>, Problem> {
    let role = service.get_role(&ctx, id).await.map_err(map_domain_error)?;
    Ok(Json(role.into()))
}

/// Assign a role; clients-pole roles must point at the CLIENTS pole
pub async fn assign_role(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Json(req): Json<RoleAssignmentRequest>,
) -> Result<(StatusCode, Json<RoleAssignmentDto>), Problem> {
    let draft = RoleAssignmentDraft::try_from(req).map_err(map_domain_error)?;
    let role = service
        .assign_role(&ctx, draft)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(role.into())))
}

pub async fn update_role(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    Json(req): Json<RoleAssignmentRequest>,
) -> Result<Json<RoleAssignmentDto>, Problem> {
    let draft = RoleAssignmentDraft::try_from(req).map_err(map_domain_error)?;
    let role = service
        .update_role(&ctx, id, draft)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(role.into()))
}

pub async fn delete_role(
    Extension(service): Extension<Arc<Service>>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_role(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}
