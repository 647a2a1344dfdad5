//! HTTP handlers for the dashgate routes.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use super::error::AppError;
use super::extract::CurrentIdentity;
use super::principal::PrincipalSource;
use super::routes::AppState;
use crate::access::{AccessRequirement, Identity, RequirementInput, evaluate};
use crate::actions::{
    CreateTeamMemberAction, DeleteTeamMemberAction, SignOutAction, UpdateTeamMemberAction,
};
use crate::api::{
    AccessResponse, CheckAccessResponse, CreateTeamMemberRequest, MessageResponse,
    TeamMemberResponse, UpdateTeamMemberRequest,
};
use crate::session::{SessionRepository, removal_cookie};
use crate::{AccessError, AccessState, TeamMemberRepository};

async fn current_identity<M, S>(
    state: &AppState<M, S>,
    headers: &HeaderMap,
) -> Result<Identity, AppError>
where
    M: TeamMemberRepository + Clone + 'static,
    S: SessionRepository + Clone + 'static,
{
    let principal = state.principal_source().principal(headers).await?;
    Ok(state.resolver().resolve(principal).await)
}

/// Role and permissions of the signed-in principal.
///
/// GET /me/access
pub async fn my_access<M, S>(
    State(state): State<AppState<M, S>>,
    headers: HeaderMap,
) -> Result<Json<AccessResponse>, AppError>
where
    M: TeamMemberRepository + Clone + 'static,
    S: SessionRepository + Clone + 'static,
{
    let identity = current_identity(&state, &headers).await?;

    match identity {
        Identity::Anonymous => Err(AppError(AccessError::Unauthenticated)),
        Identity::LookupFailed { .. } => Err(AppError(AccessError::LookupFailed(
            "team member lookup failed".to_owned(),
        ))),
        identity => Ok(Json(AccessResponse::from(&identity))),
    }
}

/// Evaluates a requirement for the signed-in principal.
///
/// POST /me/access/check
pub async fn check_access<M, S>(
    State(state): State<AppState<M, S>>,
    headers: HeaderMap,
    Json(body): Json<RequirementInput>,
) -> Result<Json<CheckAccessResponse>, AppError>
where
    M: TeamMemberRepository + Clone + 'static,
    S: SessionRepository + Clone + 'static,
{
    let identity = current_identity(&state, &headers).await?;
    let requirement = AccessRequirement::from(body);
    let decision = evaluate(&requirement, &AccessState::Resolved(identity));

    Ok(Json(CheckAccessResponse {
        decision,
        allowed: decision.is_allowed(),
        requirement: requirement.to_string(),
    }))
}

/// Destroys the session and clears the cookie.
///
/// POST /session/logout
pub async fn logout<M, S>(
    State(state): State<AppState<M, S>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError>
where
    M: TeamMemberRepository + Clone + 'static,
    S: SessionRepository + Clone + 'static,
{
    if let Some(value) = state.principal_source().cookie_value(&headers) {
        let action = SignOutAction::new(
            state.sessions.clone(),
            state.config.session.secret_key.clone(),
        );
        action.execute(&value).await?;
    }

    let cookie = removal_cookie(&state.config.session);

    Ok((
        [(SET_COOKIE, cookie.to_string())],
        Json(MessageResponse {
            message: "Signed out".to_owned(),
        }),
    ))
}

/// GET /team-members
pub async fn list_team_members<M, S>(
    State(state): State<AppState<M, S>>,
) -> Result<Json<Vec<TeamMemberResponse>>, AppError>
where
    M: TeamMemberRepository + Clone + 'static,
    S: SessionRepository + Clone + 'static,
{
    let members = state.members.list().await?;
    Ok(Json(
        members.into_iter().map(TeamMemberResponse::from).collect(),
    ))
}

/// POST /team-members
pub async fn create_team_member<M, S>(
    State(state): State<AppState<M, S>>,
    CurrentIdentity(actor): CurrentIdentity,
    Json(body): Json<CreateTeamMemberRequest>,
) -> Result<impl IntoResponse, AppError>
where
    M: TeamMemberRepository + Clone + 'static,
    S: SessionRepository + Clone + 'static,
{
    let action = CreateTeamMemberAction::new(state.members.clone());
    let member = action.execute(body.into()).await?;

    log::info!(
        target: "dashgate",
        "msg=\"team member added\" member_id={} by=\"{}\"",
        member.id,
        actor.principal().map_or("-", |p| p.id.as_str())
    );

    Ok((StatusCode::CREATED, Json(TeamMemberResponse::from(member))))
}

/// GET /team-members/{id}
pub async fn get_team_member<M, S>(
    State(state): State<AppState<M, S>>,
    Path(id): Path<u64>,
) -> Result<Json<TeamMemberResponse>, AppError>
where
    M: TeamMemberRepository + Clone + 'static,
    S: SessionRepository + Clone + 'static,
{
    let member = state
        .members
        .find_by_id(id)
        .await?
        .ok_or(AppError(AccessError::NotFound))?;

    Ok(Json(TeamMemberResponse::from(member)))
}

/// PATCH /team-members/{id}
pub async fn update_team_member<M, S>(
    State(state): State<AppState<M, S>>,
    Path(id): Path<u64>,
    Json(body): Json<UpdateTeamMemberRequest>,
) -> Result<Json<TeamMemberResponse>, AppError>
where
    M: TeamMemberRepository + Clone + 'static,
    S: SessionRepository + Clone + 'static,
{
    let action = UpdateTeamMemberAction::new(state.members.clone());
    let member = action.execute(id, body.into()).await?;

    Ok(Json(TeamMemberResponse::from(member)))
}

/// DELETE /team-members/{id}
pub async fn delete_team_member<M, S>(
    State(state): State<AppState<M, S>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError>
where
    M: TeamMemberRepository + Clone + 'static,
    S: SessionRepository + Clone + 'static,
{
    let action = DeleteTeamMemberAction::new(state.members.clone());
    action.execute(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
