use super::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(pk(Customers::Id))
                    .col(
                        ColumnDef::new(Customers::AccountId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Customers::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Customers::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Customers::Phone).string_len(20).unique_key())
                    .col(ColumnDef::new(Customers::Gender).string_len(10))
                    .col(
                        ColumnDef::new(Customers::LoyaltyPoints)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(&mut reference(
                        "fk_customers_account",
                        Customers::Table,
                        Customers::AccountId,
                        Accounts::Table,
                        Accounts::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Favorites::Table)
                    .if_not_exists()
                    .col(pk(Favorites::Id))
                    .col(ColumnDef::new(Favorites::CustomerId).big_integer().not_null())
                    .col(ColumnDef::new(Favorites::ProductId).big_integer().not_null())
                    .col(timestamp(Favorites::AddedAt))
                    .foreign_key(&mut reference(
                        "fk_favorites_customer",
                        Favorites::Table,
                        Favorites::CustomerId,
                        Customers::Table,
                        Customers::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut reference(
                        "fk_favorites_product",
                        Favorites::Table,
                        Favorites::ProductId,
                        Products::Table,
                        Products::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "ux_favorites_customer_product",
                Favorites::Table,
                [Favorites::CustomerId, Favorites::ProductId],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(pk(Reviews::Id))
                    .col(ColumnDef::new(Reviews::CustomerId).big_integer().not_null())
                    .col(ColumnDef::new(Reviews::ProductId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Reviews::Rating)
                            .integer()
                            .not_null()
                            .check(Expr::col(Reviews::Rating).between(1, 5)),
                    )
                    .col(ColumnDef::new(Reviews::Comment).text())
                    .col(timestamp(Reviews::CreatedAt))
                    .foreign_key(&mut reference(
                        "fk_reviews_customer",
                        Reviews::Table,
                        Reviews::CustomerId,
                        Customers::Table,
                        Customers::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut reference(
                        "fk_reviews_product",
                        Reviews::Table,
                        Reviews::ProductId,
                        Products::Table,
                        Products::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "ux_reviews_customer_product",
                Reviews::Table,
                [Reviews::CustomerId, Reviews::ProductId],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Favorites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
    AccountId,
    LastName,
    FirstName,
    Phone,
    Gender,
    LoyaltyPoints,
}

#[derive(DeriveIden)]
enum Favorites {
    Table,
    Id,
    CustomerId,
    ProductId,
    AddedAt,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    CustomerId,
    ProductId,
    Rating,
    Comment,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
}
