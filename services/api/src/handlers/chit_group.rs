use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ActorContext, ChitGroup, ChitGroupPatch};
use crate::error::ChitServiceError;
use crate::state::AppState;
use crate::usecase::chit_group::{
    CreateChitGroupInput, CreateChitGroupUseCase, GetChitGroupUseCase, ListChitGroupsUseCase,
    UpdateChitGroupUseCase,
};
use crate::usecase::member::{
    AddMemberInput, AddMemberUseCase, ListMembersUseCase, MemberWithUser, RemoveMemberUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ChitGroupResponse {
    pub id: i32,
    pub name: String,
    pub value: i64,
    pub duration_months: i32,
    pub members_count: i32,
    pub start_date: NaiveDate,
    pub is_active: bool,
    pub created_by: i32,
    #[serde(serialize_with = "chitfund_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ChitGroup> for ChitGroupResponse {
    fn from(group: ChitGroup) -> Self {
        Self {
            id: group.id,
            name: group.name,
            value: group.value,
            duration_months: group.duration_months,
            members_count: group.members_count,
            start_date: group.start_date,
            is_active: group.is_active,
            created_by: group.created_by,
            created_at: group.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct MemberUserSummary {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub phone: String,
}

#[derive(Serialize)]
pub struct MemberResponse {
    pub id: i32,
    pub chit_group_id: i32,
    pub user_id: i32,
    pub join_date: NaiveDate,
    #[serde(serialize_with = "chitfund_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Absent when the user row no longer resolves.
    pub user: Option<MemberUserSummary>,
}

impl From<MemberWithUser> for MemberResponse {
    fn from(row: MemberWithUser) -> Self {
        Self {
            id: row.member.id,
            chit_group_id: row.member.chit_group_id,
            user_id: row.member.user_id,
            join_date: row.member.join_date,
            created_at: row.member.created_at,
            user: row.user.map(|u| MemberUserSummary {
                id: u.id,
                username: u.username,
                name: u.name,
                phone: u.phone,
            }),
        }
    }
}

// ── GET /chitgroups ──────────────────────────────────────────────────────────

pub async fn list_chit_groups(
    actor: ActorContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<ChitGroupResponse>>, ChitServiceError> {
    let uc = ListChitGroupsUseCase {
        groups: state.store(),
    };
    let groups = uc.execute(&actor).await?;
    Ok(Json(groups.into_iter().map(ChitGroupResponse::from).collect()))
}

// ── POST /chitgroups ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateChitGroupRequest {
    pub name: String,
    pub value: i64,
    pub duration_months: i32,
    pub members_count: i32,
    pub start_date: NaiveDate,
}

pub async fn create_chit_group(
    actor: ActorContext,
    State(state): State<AppState>,
    Json(body): Json<CreateChitGroupRequest>,
) -> Result<(StatusCode, Json<ChitGroupResponse>), ChitServiceError> {
    let uc = CreateChitGroupUseCase {
        groups: state.store(),
    };
    let group = uc
        .execute(
            &actor,
            CreateChitGroupInput {
                name: body.name,
                value: body.value,
                duration_months: body.duration_months,
                members_count: body.members_count,
                start_date: body.start_date,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(group.into())))
}

// ── GET /chitgroups/{id} ─────────────────────────────────────────────────────

pub async fn get_chit_group(
    actor: ActorContext,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ChitGroupResponse>, ChitServiceError> {
    let uc = GetChitGroupUseCase {
        groups: state.store(),
        members: state.store(),
    };
    let group = uc.execute(&actor, id).await?;
    Ok(Json(group.into()))
}

// ── PUT /chitgroups/{id} ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateChitGroupRequest {
    pub name: Option<String>,
    pub value: Option<i64>,
    pub duration_months: Option<i32>,
    pub members_count: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

pub async fn update_chit_group(
    actor: ActorContext,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateChitGroupRequest>,
) -> Result<Json<ChitGroupResponse>, ChitServiceError> {
    let uc = UpdateChitGroupUseCase {
        groups: state.store(),
    };
    let patch = ChitGroupPatch {
        name: body.name,
        value: body.value,
        duration_months: body.duration_months,
        members_count: body.members_count,
        start_date: body.start_date,
        is_active: body.is_active,
    };
    let group = uc.execute(&actor, id, patch).await?;
    Ok(Json(group.into()))
}

// ── GET /chitgroups/{id}/members ─────────────────────────────────────────────

pub async fn list_members(
    actor: ActorContext,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<MemberResponse>>, ChitServiceError> {
    let uc = ListMembersUseCase {
        groups: state.store(),
        members: state.store(),
        users: state.store(),
    };
    let rows = uc.execute(&actor, id).await?;
    Ok(Json(rows.into_iter().map(MemberResponse::from).collect()))
}

// ── POST /chitgroups/{id}/members ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddMemberRequest {
    pub user_id: i32,
    pub join_date: Option<NaiveDate>,
}

pub async fn add_member(
    actor: ActorContext,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ChitServiceError> {
    let uc = AddMemberUseCase {
        groups: state.store(),
        members: state.store(),
        users: state.store(),
    };
    let member = uc
        .execute(
            &actor,
            id,
            AddMemberInput {
                user_id: body.user_id,
                join_date: body.join_date,
            },
        )
        .await?;
    let user = crate::domain::repository::UserStore::user(&state.store, member.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(MemberResponse::from(MemberWithUser { member, user })),
    ))
}

// ── DELETE /chitgroups/{gid}/members/{uid} ───────────────────────────────────

pub async fn remove_member(
    actor: ActorContext,
    State(state): State<AppState>,
    Path((chit_group_id, user_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ChitServiceError> {
    let uc = RemoveMemberUseCase {
        groups: state.store(),
        members: state.store(),
        users: state.store(),
    };
    uc.execute(&actor, chit_group_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
