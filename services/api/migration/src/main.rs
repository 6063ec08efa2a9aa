use sea_orm_migration::prelude::*;

mod m20260401_000001_create_users;
mod m20260401_000002_create_chit_groups;
mod m20260401_000003_create_chit_group_members;
mod m20260401_000004_create_auctions;
mod m20260401_000005_create_bids;
mod m20260401_000006_create_payments;
mod m20260401_000007_create_notifications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_users::Migration),
            Box::new(m20260401_000002_create_chit_groups::Migration),
            Box::new(m20260401_000003_create_chit_group_members::Migration),
            Box::new(m20260401_000004_create_auctions::Migration),
            Box::new(m20260401_000005_create_bids::Migration),
            Box::new(m20260401_000006_create_payments::Migration),
            Box::new(m20260401_000007_create_notifications::Migration),
        ]
    }
}

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
