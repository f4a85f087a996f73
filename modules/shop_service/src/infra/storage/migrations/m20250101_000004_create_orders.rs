use super::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderStatuses::Table)
                    .if_not_exists()
                    .col(pk(OrderStatuses::Id))
                    .col(ColumnDef::new(OrderStatuses::Label).string_len(50).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(pk(Orders::Id))
                    .col(ColumnDef::new(Orders::CustomerId).big_integer().not_null())
                    .col(ColumnDef::new(Orders::OrderDate).date().not_null())
                    .col(ColumnDef::new(Orders::Address).text())
                    .col(ColumnDef::new(Orders::Region).string_len(100))
                    .col(ColumnDef::new(Orders::StatusId).big_integer())
                    .col(timestamp(Orders::CreatedAt))
                    .col(timestamp(Orders::UpdatedAt))
                    .foreign_key(&mut reference(
                        "fk_orders_customer",
                        Orders::Table,
                        Orders::CustomerId,
                        Customers::Table,
                        Customers::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut reference(
                        "fk_orders_status",
                        Orders::Table,
                        Orders::StatusId,
                        OrderStatuses::Table,
                        OrderStatuses::Id,
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_customer")
                    .table(Orders::Table)
                    .col(Orders::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderLines::Table)
                    .if_not_exists()
                    .col(pk(OrderLines::Id))
                    .col(ColumnDef::new(OrderLines::OrderId).big_integer().not_null())
                    .col(ColumnDef::new(OrderLines::ProductId).big_integer().not_null())
                    .col(ColumnDef::new(OrderLines::ArticleId).big_integer())
                    .col(
                        ColumnDef::new(OrderLines::Quantity)
                            .integer()
                            .not_null()
                            .check(Expr::col(OrderLines::Quantity).gte(1)),
                    )
                    .col(
                        ColumnDef::new(OrderLines::UnitPrice)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .foreign_key(&mut reference(
                        "fk_order_lines_order",
                        OrderLines::Table,
                        OrderLines::OrderId,
                        Orders::Table,
                        Orders::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut reference(
                        "fk_order_lines_product",
                        OrderLines::Table,
                        OrderLines::ProductId,
                        Products::Table,
                        Products::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut reference(
                        "fk_order_lines_article",
                        OrderLines::Table,
                        OrderLines::ArticleId,
                        Articles::Table,
                        Articles::Id,
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CartEntries::Table)
                    .if_not_exists()
                    .col(pk(CartEntries::Id))
                    .col(ColumnDef::new(CartEntries::CustomerId).big_integer().not_null())
                    .col(ColumnDef::new(CartEntries::ProductId).big_integer().not_null())
                    .col(
                        ColumnDef::new(CartEntries::Quantity)
                            .integer()
                            .not_null()
                            .default(1)
                            .check(Expr::col(CartEntries::Quantity).gte(1)),
                    )
                    .col(timestamp(CartEntries::AddedAt))
                    .foreign_key(&mut reference(
                        "fk_cart_entries_customer",
                        CartEntries::Table,
                        CartEntries::CustomerId,
                        Customers::Table,
                        Customers::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut reference(
                        "fk_cart_entries_product",
                        CartEntries::Table,
                        CartEntries::ProductId,
                        Products::Table,
                        Products::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "ux_cart_entries_customer_product",
                CartEntries::Table,
                [CartEntries::CustomerId, CartEntries::ProductId],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Discounts::Table)
                    .if_not_exists()
                    .col(pk(Discounts::Id))
                    .col(ColumnDef::new(Discounts::OrderId).big_integer().not_null())
                    .col(ColumnDef::new(Discounts::Rate).decimal_len(5, 2).not_null())
                    .col(timestamp(Discounts::CreatedAt))
                    .foreign_key(&mut reference(
                        "fk_discounts_order",
                        Discounts::Table,
                        Discounts::OrderId,
                        Orders::Table,
                        Orders::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PromoCodes::Table)
                    .if_not_exists()
                    .col(pk(PromoCodes::Id))
                    .col(
                        ColumnDef::new(PromoCodes::Code)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PromoCodes::Rate).decimal_len(5, 2).not_null())
                    .col(ColumnDef::new(PromoCodes::OrderId).big_integer().unique_key())
                    .col(ColumnDef::new(PromoCodes::StartDate).date())
                    .col(ColumnDef::new(PromoCodes::EndDate).date())
                    .col(
                        ColumnDef::new(PromoCodes::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(&mut reference(
                        "fk_promo_codes_order",
                        PromoCodes::Table,
                        PromoCodes::OrderId,
                        Orders::Table,
                        Orders::Id,
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Returns::Table)
                    .if_not_exists()
                    .col(pk(Returns::Id))
                    .col(ColumnDef::new(Returns::OrderId).big_integer().not_null())
                    .col(ColumnDef::new(Returns::Reason).text())
                    .col(ColumnDef::new(Returns::ReturnDate).date().not_null())
                    .col(timestamp(Returns::CreatedAt))
                    .foreign_key(&mut reference(
                        "fk_returns_order",
                        Returns::Table,
                        Returns::OrderId,
                        Orders::Table,
                        Orders::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Returns::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PromoCodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Discounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CartEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrderLines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrderStatuses::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum OrderStatuses {
    Table,
    Id,
    Label,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    CustomerId,
    OrderDate,
    Address,
    Region,
    StatusId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OrderLines {
    Table,
    Id,
    OrderId,
    ProductId,
    ArticleId,
    Quantity,
    UnitPrice,
}

#[derive(DeriveIden)]
enum CartEntries {
    Table,
    Id,
    CustomerId,
    ProductId,
    Quantity,
    AddedAt,
}

#[derive(DeriveIden)]
enum Discounts {
    Table,
    Id,
    OrderId,
    Rate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PromoCodes {
    Table,
    Id,
    Code,
    Rate,
    OrderId,
    StartDate,
    EndDate,
    Active,
}

#[derive(DeriveIden)]
enum Returns {
    Table,
    Id,
    OrderId,
    Reason,
    ReturnDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Articles {
    Table,
    Id,
}
