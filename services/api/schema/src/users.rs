use sea_orm::entity::prelude::*;

/// Account record: managers and the customers they manage.
///
/// `manager_id` is set iff `role = "customer"`; `password` holds the argon2
/// PHC string, never cleartext.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub role: String,
    pub is_first_login: bool,
    pub manager_id: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::chit_groups::Entity")]
    ChitGroups,
    #[sea_orm(has_many = "super::chit_group_members::Entity")]
    ChitGroupMembers,
    #[sea_orm(has_many = "super::bids::Entity")]
    Bids,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::chit_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChitGroups.def()
    }
}

impl Related<super::chit_group_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChitGroupMembers.def()
    }
}

impl Related<super::bids::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bids.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
