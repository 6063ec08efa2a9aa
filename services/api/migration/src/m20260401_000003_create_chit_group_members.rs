use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChitGroupMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChitGroupMembers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ChitGroupMembers::ChitGroupId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChitGroupMembers::UserId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChitGroupMembers::JoinDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChitGroupMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ChitGroupMembers::Table, ChitGroupMembers::ChitGroupId)
                            .to(ChitGroups::Table, ChitGroups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ChitGroupMembers::Table, ChitGroupMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Uniqueness is load-bearing: duplicate enrollment is rejected here, not
        // by a check-then-act sequence in application code.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_chit_group_members_group_user")
                    .table(ChitGroupMembers::Table)
                    .col(ChitGroupMembers::ChitGroupId)
                    .col(ChitGroupMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChitGroupMembers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ChitGroupMembers {
    Table,
    Id,
    ChitGroupId,
    UserId,
    JoinDate,
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
