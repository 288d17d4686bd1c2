//! Create dislike table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dislike::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Dislike::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Dislike::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Dislike::MovieId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Dislike::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dislike_user")
                            .from(Dislike::Table, Dislike::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dislike_movie")
                            .from(Dislike::Table, Dislike::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Non-unique: the vote engine may insert duplicate same-direction rows
        manager
            .create_index(
                Index::create()
                    .name("idx_dislike_user_movie")
                    .table(Dislike::Table)
                    .col(Dislike::UserId)
                    .col(Dislike::MovieId)
                    .to_owned(),
            )
            .await?;

        // Index: movie_id (for tally verification)
        manager
            .create_index(
                Index::create()
                    .name("idx_dislike_movie_id")
                    .table(Dislike::Table)
                    .col(Dislike::MovieId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Dislike::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Dislike {
    Table,
    Id,
    UserId,
    MovieId,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Movie {
    Table,
    Id,
}
