//! Authorization guards: pure predicates over (actor, record, parent record).
//!
//! Every data path composes these instead of inlining role checks. Denials are
//! logged with actor and target ids for audit.

use chitfund_domain::role::UserRole;

use crate::domain::types::{ActorContext, ChitGroup, ChitGroupMember, User};
use crate::error::ChitServiceError;

/// The actor must hold the manager role.
pub fn require_manager(actor: &ActorContext) -> Result<(), ChitServiceError> {
    if actor.role.is_manager() {
        Ok(())
    } else {
        tracing::warn!(actor_id = actor.user_id, "manager role required");
        Err(ChitServiceError::Forbidden)
    }
}

/// The actor must be the manager who created the group.
pub fn require_group_owner(
    actor: &ActorContext,
    group: &ChitGroup,
) -> Result<(), ChitServiceError> {
    if actor.role.is_manager() && group.created_by == actor.user_id {
        Ok(())
    } else {
        tracing::warn!(
            actor_id = actor.user_id,
            chit_group_id = group.id,
            owner_id = group.created_by,
            "not the owning manager of chit group"
        );
        Err(ChitServiceError::Forbidden)
    }
}

/// Read access to a group and its dependents: the owning manager, or a
/// customer holding a membership row in the group.
pub fn require_group_access(
    actor: &ActorContext,
    group: &ChitGroup,
    membership: Option<&ChitGroupMember>,
) -> Result<(), ChitServiceError> {
    match actor.role {
        UserRole::Manager if group.created_by == actor.user_id => Ok(()),
        UserRole::Customer
            if membership.is_some_and(|m| {
                m.chit_group_id == group.id && m.user_id == actor.user_id
            }) =>
        {
            Ok(())
        }
        _ => {
            tracing::warn!(
                actor_id = actor.user_id,
                chit_group_id = group.id,
                "no access to chit group"
            );
            Err(ChitServiceError::Forbidden)
        }
    }
}

/// The target must be a customer managed by the acting manager. Managers can
/// never enroll or act on another manager's customers.
pub fn require_managed_customer(
    actor: &ActorContext,
    target: &User,
) -> Result<(), ChitServiceError> {
    if actor.role.is_manager()
        && target.role.is_customer()
        && target.manager_id == Some(actor.user_id)
    {
        Ok(())
    } else {
        tracing::warn!(
            actor_id = actor.user_id,
            target_user_id = target.id,
            "target is not a customer of the acting manager"
        );
        Err(ChitServiceError::Forbidden)
    }
}

/// The actor must be the named user.
pub fn require_self(actor: &ActorContext, user_id: i32) -> Result<(), ChitServiceError> {
    if actor.user_id == user_id {
        Ok(())
    } else {
        tracing::warn!(
            actor_id = actor.user_id,
            target_user_id = user_id,
            "self-only operation attempted on another user"
        );
        Err(ChitServiceError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn manager(id: i32) -> ActorContext {
        ActorContext {
            user_id: id,
            role: UserRole::Manager,
        }
    }

    fn customer(id: i32) -> ActorContext {
        ActorContext {
            user_id: id,
            role: UserRole::Customer,
        }
    }

    fn group(id: i32, created_by: i32) -> ChitGroup {
        ChitGroup {
            id,
            name: "Gold Savers".to_owned(),
            value: 100_000,
            duration_months: 10,
            members_count: 5,
            start_date: "2024-01-01".parse().unwrap(),
            is_active: true,
            created_by,
            created_at: Utc::now(),
        }
    }

    fn membership(chit_group_id: i32, user_id: i32) -> ChitGroupMember {
        ChitGroupMember {
            id: 1,
            chit_group_id,
            user_id,
            join_date: "2024-01-01".parse().unwrap(),
            created_at: Utc::now(),
        }
    }

    fn customer_user(id: i32, manager_id: i32) -> User {
        User {
            id,
            username: format!("user{id}"),
            password: String::new(),
            name: "Test".to_owned(),
            phone: "555-0100".to_owned(),
            email: None,
            role: UserRole::Customer,
            is_first_login: true,
            manager_id: Some(manager_id),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn should_allow_manager_role() {
        assert!(require_manager(&manager(1)).is_ok());
    }

    #[test]
    fn should_reject_customer_as_manager() {
        assert!(matches!(
            require_manager(&customer(2)),
            Err(ChitServiceError::Forbidden)
        ));
    }

    #[test]
    fn should_allow_owner_on_own_group() {
        assert!(require_group_owner(&manager(1), &group(10, 1)).is_ok());
    }

    #[test]
    fn should_reject_other_manager_on_group() {
        assert!(matches!(
            require_group_owner(&manager(2), &group(10, 1)),
            Err(ChitServiceError::Forbidden)
        ));
    }

    #[test]
    fn should_reject_customer_as_group_owner_even_if_member() {
        assert!(matches!(
            require_group_owner(&customer(3), &group(10, 3)),
            Err(ChitServiceError::Forbidden)
        ));
    }

    #[test]
    fn should_grant_group_access_to_owner_without_membership() {
        assert!(require_group_access(&manager(1), &group(10, 1), None).is_ok());
    }

    #[test]
    fn should_grant_group_access_to_member_customer() {
        let m = membership(10, 3);
        assert!(require_group_access(&customer(3), &group(10, 1), Some(&m)).is_ok());
    }

    #[test]
    fn should_deny_group_access_to_non_member_customer() {
        assert!(matches!(
            require_group_access(&customer(3), &group(10, 1), None),
            Err(ChitServiceError::Forbidden)
        ));
    }

    #[test]
    fn should_deny_group_access_with_mismatched_membership_row() {
        // Membership row for a different group must not grant access.
        let m = membership(99, 3);
        assert!(matches!(
            require_group_access(&customer(3), &group(10, 1), Some(&m)),
            Err(ChitServiceError::Forbidden)
        ));
    }

    #[test]
    fn should_deny_group_access_to_non_owner_manager_with_membership_row() {
        let m = membership(10, 2);
        assert!(matches!(
            require_group_access(&manager(2), &group(10, 1), Some(&m)),
            Err(ChitServiceError::Forbidden)
        ));
    }

    #[test]
    fn should_allow_managed_customer() {
        assert!(require_managed_customer(&manager(1), &customer_user(3, 1)).is_ok());
    }

    #[test]
    fn should_reject_another_managers_customer() {
        assert!(matches!(
            require_managed_customer(&manager(2), &customer_user(3, 1)),
            Err(ChitServiceError::Forbidden)
        ));
    }

    #[test]
    fn should_reject_manager_as_enrollment_target() {
        let mut target = customer_user(3, 1);
        target.role = UserRole::Manager;
        target.manager_id = None;
        assert!(matches!(
            require_managed_customer(&manager(1), &target),
            Err(ChitServiceError::Forbidden)
        ));
    }

    #[test]
    fn should_allow_self_operation() {
        assert!(require_self(&customer(3), 3).is_ok());
    }

    #[test]
    fn should_reject_operation_on_other_user() {
        assert!(matches!(
            require_self(&customer(3), 4),
            Err(ChitServiceError::Forbidden)
        ));
    }
}
