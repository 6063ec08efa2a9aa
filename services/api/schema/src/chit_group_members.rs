use sea_orm::entity::prelude::*;

/// Membership join row tying a customer to a chit group.
///
/// (chit_group_id, user_id) carries a unique index; the insert path relies on
/// it to reject duplicate enrollment.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "chit_group_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub chit_group_id: i32,
    pub user_id: i32,
    pub join_date: chrono::NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chit_groups::Entity",
        from = "Column::ChitGroupId",
        to = "super::chit_groups::Column::Id"
    )]
    ChitGroup,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::chit_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChitGroup.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
