use chrono::{NaiveDate, Utc};

use crate::domain::guard;
use crate::domain::repository::{ChitGroupStore, MemberStore, UserStore};
use crate::domain::types::{ActorContext, ChitGroupMember, NewChitGroupMember, User};
use crate::error::ChitServiceError;

// ── AddMember ────────────────────────────────────────────────────────────────

pub struct AddMemberInput {
    pub user_id: i32,
    pub join_date: Option<NaiveDate>,
}

pub struct AddMemberUseCase<G: ChitGroupStore, M: MemberStore, U: UserStore> {
    pub groups: G,
    pub members: M,
    pub users: U,
}

impl<G: ChitGroupStore, M: MemberStore, U: UserStore> AddMemberUseCase<G, M, U> {
    pub async fn execute(
        &self,
        actor: &ActorContext,
        chit_group_id: i32,
        input: AddMemberInput,
    ) -> Result<ChitGroupMember, ChitServiceError> {
        let group = self
            .groups
            .chit_group(chit_group_id)
            .await?
            .ok_or(ChitServiceError::GroupNotFound)?;
        guard::require_group_owner(actor, &group)?;

        let target = self
            .users
            .user(input.user_id)
            .await?
            .ok_or(ChitServiceError::UserNotFound)?;
        guard::require_managed_customer(actor, &target)?;

        let member = NewChitGroupMember {
            chit_group_id,
            user_id: target.id,
            join_date: input.join_date.unwrap_or_else(|| Utc::now().date_naive()),
        };
        self.members
            .add_member(member)
            .await?
            .ok_or(ChitServiceError::DuplicateMember)
    }
}

// ── RemoveMember ─────────────────────────────────────────────────────────────

pub struct RemoveMemberUseCase<G: ChitGroupStore, M: MemberStore, U: UserStore> {
    pub groups: G,
    pub members: M,
    pub users: U,
}

impl<G: ChitGroupStore, M: MemberStore, U: UserStore> RemoveMemberUseCase<G, M, U> {
    pub async fn execute(
        &self,
        actor: &ActorContext,
        chit_group_id: i32,
        user_id: i32,
    ) -> Result<(), ChitServiceError> {
        let group = self
            .groups
            .chit_group(chit_group_id)
            .await?
            .ok_or(ChitServiceError::GroupNotFound)?;
        guard::require_group_owner(actor, &group)?;

        let target = self
            .users
            .user(user_id)
            .await?
            .ok_or(ChitServiceError::UserNotFound)?;
        guard::require_managed_customer(actor, &target)?;

        if !self.members.remove_member(chit_group_id, user_id).await? {
            return Err(ChitServiceError::MemberNotFound);
        }
        Ok(())
    }
}

// ── ListMembers ──────────────────────────────────────────────────────────────

/// Membership row paired with its resolved user, when the user still exists.
pub struct MemberWithUser {
    pub member: ChitGroupMember,
    pub user: Option<User>,
}

pub struct ListMembersUseCase<G: ChitGroupStore, M: MemberStore, U: UserStore> {
    pub groups: G,
    pub members: M,
    pub users: U,
}

impl<G: ChitGroupStore, M: MemberStore, U: UserStore> ListMembersUseCase<G, M, U> {
    pub async fn execute(
        &self,
        actor: &ActorContext,
        chit_group_id: i32,
    ) -> Result<Vec<MemberWithUser>, ChitServiceError> {
        let group = self
            .groups
            .chit_group(chit_group_id)
            .await?
            .ok_or(ChitServiceError::GroupNotFound)?;
        let membership = self.members.membership(chit_group_id, actor.user_id).await?;
        guard::require_group_access(actor, &group, membership.as_ref())?;

        let rows = self.members.members_of_group(chit_group_id).await?;
        let mut out = Vec::with_capacity(rows.len());
        for member in rows {
            let user = self.users.user(member.user_id).await?;
            out.push(MemberWithUser { member, user });
        }
        Ok(out)
    }
}
