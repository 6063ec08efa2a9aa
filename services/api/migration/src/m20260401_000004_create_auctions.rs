use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Auctions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Auctions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Auctions::ChitGroupId).integer().not_null())
                    .col(ColumnDef::new(Auctions::AuctionDate).date().not_null())
                    .col(ColumnDef::new(Auctions::MonthNumber).integer().not_null())
                    .col(
                        ColumnDef::new(Auctions::Status)
                            .string()
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(ColumnDef::new(Auctions::WinnerUserId).integer())
                    .col(ColumnDef::new(Auctions::WinningBid).big_integer())
                    .col(
                        ColumnDef::new(Auctions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Auctions::Table, Auctions::ChitGroupId)
                            .to(ChitGroups::Table, ChitGroups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Auctions::Table, Auctions::WinnerUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_auctions_chit_group_id")
                    .table(Auctions::Table)
                    .col(Auctions::ChitGroupId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Auctions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Auctions {
    Table,
    Id,
    ChitGroupId,
    AuctionDate,
    MonthNumber,
    Status,
    WinnerUserId,
    WinningBid,
    CreatedAt,
}

#[derive(Iden)]
enum ChitGroups {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
