use sea_orm::entity::prelude::*;

/// Monthly auction for a chit group.
///
/// `winner_user_id` and `winning_bid` are set together, only when
/// `status = "completed"`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "auctions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub chit_group_id: i32,
    pub auction_date: chrono::NaiveDate,
    pub month_number: i32,
    pub status: String,
    pub winner_user_id: Option<i32>,
    pub winning_bid: Option<i64>,
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
    #[sea_orm(has_many = "super::bids::Entity")]
    Bids,
}

impl Related<super::chit_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChitGroup.def()
    }
}

impl Related<super::bids::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bids.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
