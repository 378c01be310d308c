use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `users`: serial id, unique email, optional age.
///
/// The unique key on `email` is what keeps two concurrent creates with the
/// same address from both succeeding.
fn users_table() -> TableCreateStatement {
    Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(pk_auto(Users::Id))
        .col(string(Users::Email).unique_key())
        .col(string(Users::Name))
        .col(integer_null(Users::Age))
        .col(timestamp_with_time_zone(Users::CreatedAt).default(Expr::current_timestamp()))
        .col(timestamp_with_time_zone(Users::UpdatedAt).default(Expr::current_timestamp()))
        .to_owned()
}

fn created_at_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_users_created_at")
        .table(Users::Table)
        .col(Users::CreatedAt)
        .if_not_exists()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(users_table()).await?;
        manager.create_index(created_at_index()).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Name,
    Age,
    CreatedAt,
    UpdatedAt,
}
