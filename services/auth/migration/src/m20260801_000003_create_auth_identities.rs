use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthIdentities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuthIdentities::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuthIdentities::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(AuthIdentities::Provider)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AuthIdentities::Identifier)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AuthIdentities::IdentifierNormalized)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AuthIdentities::PasswordHash).string())
                    .col(
                        ColumnDef::new(AuthIdentities::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AuthIdentities::IsPrimary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AuthIdentities::Table, AuthIdentities::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(AuthIdentities::Table)
                    .col(AuthIdentities::UserId)
                    .name("idx_auth_identities_user_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(AuthIdentities::Table)
                    .col(AuthIdentities::Provider)
                    .col(AuthIdentities::IdentifierNormalized)
                    .name("idx_auth_identities_provider_identifier")
                    .to_owned(),
            )
            .await?;

        // Uniqueness of (provider, identifier_normalized) holds among ACTIVE
        // identities only; deactivated rows may keep their old identifier.
        // Partial indexes are not expressible through sea-query's builder.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX uq_auth_identities_provider_identifier_active \
                 ON auth_identities (provider, identifier_normalized) \
                 WHERE is_active",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuthIdentities::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AuthIdentities {
    Table,
    Id,
    UserId,
    Provider,
    Identifier,
    IdentifierNormalized,
    PasswordHash,
    IsActive,
    IsPrimary,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
