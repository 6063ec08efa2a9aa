use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChitGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChitGroups::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ChitGroups::Name).string().not_null())
                    .col(ColumnDef::new(ChitGroups::Value).big_integer().not_null())
                    .col(
                        ColumnDef::new(ChitGroups::DurationMonths)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChitGroups::MembersCount)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ChitGroups::StartDate).date().not_null())
                    .col(
                        ColumnDef::new(ChitGroups::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(ChitGroups::CreatedBy).integer().not_null())
                    .col(
                        ColumnDef::new(ChitGroups::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ChitGroups::Table, ChitGroups::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_chit_groups_created_by")
                    .table(ChitGroups::Table)
                    .col(ChitGroups::CreatedBy)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChitGroups::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ChitGroups {
    Table,
    Id,
    Name,
    Value,
    DurationMonths,
    MembersCount,
    StartDate,
    IsActive,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
