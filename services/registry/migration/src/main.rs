use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(tss_registry_migration::Migrator).await;
}
