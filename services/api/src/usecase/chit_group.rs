use chrono::NaiveDate;

use chitfund_domain::role::UserRole;

use crate::domain::guard;
use crate::domain::repository::{ChitGroupStore, MemberStore};
use crate::domain::types::{ActorContext, ChitGroup, ChitGroupPatch, NewChitGroup};
use crate::domain::validate::{validate_group_patch, validate_new_group};
use crate::error::ChitServiceError;

// ── CreateChitGroup ──────────────────────────────────────────────────────────

pub struct CreateChitGroupInput {
    pub name: String,
    pub value: i64,
    pub duration_months: i32,
    pub members_count: i32,
    pub start_date: NaiveDate,
}

pub struct CreateChitGroupUseCase<G: ChitGroupStore> {
    pub groups: G,
}

impl<G: ChitGroupStore> CreateChitGroupUseCase<G> {
    pub async fn execute(
        &self,
        actor: &ActorContext,
        input: CreateChitGroupInput,
    ) -> Result<ChitGroup, ChitServiceError> {
        guard::require_manager(actor)?;
        let group = NewChitGroup {
            name: input.name,
            value: input.value,
            duration_months: input.duration_months,
            members_count: input.members_count,
            start_date: input.start_date,
            is_active: true,
            created_by: actor.user_id,
        };
        validate_new_group(&group)?;
        self.groups.create_chit_group(group).await
    }
}

// ── GetChitGroup ─────────────────────────────────────────────────────────────

pub struct GetChitGroupUseCase<G: ChitGroupStore, M: MemberStore> {
    pub groups: G,
    pub members: M,
}

impl<G: ChitGroupStore, M: MemberStore> GetChitGroupUseCase<G, M> {
    pub async fn execute(
        &self,
        actor: &ActorContext,
        id: i32,
    ) -> Result<ChitGroup, ChitServiceError> {
        let group = self
            .groups
            .chit_group(id)
            .await?
            .ok_or(ChitServiceError::GroupNotFound)?;
        let membership = self.members.membership(id, actor.user_id).await?;
        guard::require_group_access(actor, &group, membership.as_ref())?;
        Ok(group)
    }
}

// ── ListChitGroups ───────────────────────────────────────────────────────────

pub struct ListChitGroupsUseCase<G: ChitGroupStore> {
    pub groups: G,
}

impl<G: ChitGroupStore> ListChitGroupsUseCase<G> {
    /// Managers see the groups they created; customers see exactly the groups
    /// a membership row ties them to.
    pub async fn execute(&self, actor: &ActorContext) -> Result<Vec<ChitGroup>, ChitServiceError> {
        match actor.role {
            UserRole::Manager => self.groups.chit_groups_by_creator(actor.user_id).await,
            UserRole::Customer => self.groups.chit_groups_for_member(actor.user_id).await,
        }
    }
}

// ── UpdateChitGroup ──────────────────────────────────────────────────────────

pub struct UpdateChitGroupUseCase<G: ChitGroupStore> {
    pub groups: G,
}

impl<G: ChitGroupStore> UpdateChitGroupUseCase<G> {
    pub async fn execute(
        &self,
        actor: &ActorContext,
        id: i32,
        patch: ChitGroupPatch,
    ) -> Result<ChitGroup, ChitServiceError> {
        let group = self
            .groups
            .chit_group(id)
            .await?
            .ok_or(ChitServiceError::GroupNotFound)?;
        guard::require_group_owner(actor, &group)?;
        validate_group_patch(&patch)?;
        self.groups
            .update_chit_group(id, patch)
            .await?
            .ok_or(ChitServiceError::GroupNotFound)
    }
}
