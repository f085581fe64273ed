use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthorityCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuthorityCodes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuthorityCodes::Code).string().not_null())
                    .col(
                        ColumnDef::new(AuthorityCodes::Used)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AuthorityCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AuthorityCodes::UsedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(AuthorityCodes::UsedBy).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .from(AuthorityCodes::Table, AuthorityCodes::UsedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Equality lookup on redemption; the unique constraint also backs collision detection.
        manager
            .create_index(
                Index::create()
                    .table(AuthorityCodes::Table)
                    .col(AuthorityCodes::Code)
                    .unique()
                    .name("idx_authority_codes_code")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(AuthorityCodes::Table)
                    .col(AuthorityCodes::Used)
                    .name("idx_authority_codes_used")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuthorityCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AuthorityCodes {
    Table,
    Id,
    Code,
    Used,
    CreatedAt,
    UsedAt,
    UsedBy,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
