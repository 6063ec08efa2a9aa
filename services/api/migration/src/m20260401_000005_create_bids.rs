use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bids::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bids::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bids::AuctionId).integer().not_null())
                    .col(ColumnDef::new(Bids::UserId).integer().not_null())
                    .col(ColumnDef::new(Bids::BidAmount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Bids::BidTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bids::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Bids::Table, Bids::AuctionId)
                            .to(Auctions::Table, Auctions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Bids::Table, Bids::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bids_auction_id")
                    .table(Bids::Table)
                    .col(Bids::AuctionId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bids::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Bids {
    Table,
    Id,
    AuctionId,
    UserId,
    BidAmount,
    BidTime,
    CreatedAt,
}

#[derive(Iden)]
enum Auctions {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
