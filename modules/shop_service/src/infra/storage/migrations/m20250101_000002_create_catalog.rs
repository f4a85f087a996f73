use super::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk(Categories::Id))
                    .col(ColumnDef::new(Categories::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Categories::Description).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SubCategories::Table)
                    .if_not_exists()
                    .col(pk(SubCategories::Id))
                    .col(ColumnDef::new(SubCategories::Name).string_len(100).not_null())
                    .col(ColumnDef::new(SubCategories::Description).text())
                    .col(ColumnDef::new(SubCategories::CategoryId).big_integer().not_null())
                    .foreign_key(&mut reference(
                        "fk_sub_categories_category",
                        SubCategories::Table,
                        SubCategories::CategoryId,
                        Categories::Table,
                        Categories::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk(Products::Id))
                    .col(ColumnDef::new(Products::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Products::Price).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Products::Description).text())
                    .col(ColumnDef::new(Products::SoleType).string_len(100))
                    .col(ColumnDef::new(Products::RawMaterials).json())
                    .col(ColumnDef::new(Products::Origin).string_len(100))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductCategories::Table)
                    .if_not_exists()
                    .col(pk(ProductCategories::Id))
                    .col(
                        ColumnDef::new(ProductCategories::ProductId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductCategories::CategoryId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut reference(
                        "fk_product_categories_product",
                        ProductCategories::Table,
                        ProductCategories::ProductId,
                        Products::Table,
                        Products::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut reference(
                        "fk_product_categories_category",
                        ProductCategories::Table,
                        ProductCategories::CategoryId,
                        Categories::Table,
                        Categories::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "ux_product_categories_pair",
                ProductCategories::Table,
                [ProductCategories::ProductId, ProductCategories::CategoryId],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Articles::Table)
                    .if_not_exists()
                    .col(pk(Articles::Id))
                    .col(ColumnDef::new(Articles::ProductId).big_integer().not_null())
                    .col(ColumnDef::new(Articles::Color).string_len(50))
                    .col(ColumnDef::new(Articles::Size).string_len(20))
                    .col(
                        ColumnDef::new(Articles::Barcode)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Articles::PurchaseDate).date())
                    .foreign_key(&mut reference(
                        "fk_articles_product",
                        Articles::Table,
                        Articles::ProductId,
                        Products::Table,
                        Products::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Media::Table)
                    .if_not_exists()
                    .col(pk(Media::Id))
                    .col(ColumnDef::new(Media::ProductId).big_integer().not_null())
                    .col(ColumnDef::new(Media::MediaType).string_len(50))
                    .col(ColumnDef::new(Media::Url).string_len(500).not_null())
                    .foreign_key(&mut reference(
                        "fk_media_product",
                        Media::Table,
                        Media::ProductId,
                        Products::Table,
                        Products::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Promotions::Table)
                    .if_not_exists()
                    .col(pk(Promotions::Id))
                    .col(ColumnDef::new(Promotions::ProductId).big_integer().not_null())
                    .col(ColumnDef::new(Promotions::PromoType).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Promotions::Reduction)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Promotions::StartDate).date().not_null())
                    .col(ColumnDef::new(Promotions::EndDate).date().not_null())
                    .foreign_key(&mut reference(
                        "fk_promotions_product",
                        Promotions::Table,
                        Promotions::ProductId,
                        Products::Table,
                        Products::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Catalogues::Table)
                    .if_not_exists()
                    .col(pk(Catalogues::Id))
                    .col(ColumnDef::new(Catalogues::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Catalogues::Description).text())
                    .col(ColumnDef::new(Catalogues::CreatedOn).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductCatalogues::Table)
                    .if_not_exists()
                    .col(pk(ProductCatalogues::Id))
                    .col(
                        ColumnDef::new(ProductCatalogues::ProductId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductCatalogues::CatalogueId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(&mut reference(
                        "fk_product_catalogues_product",
                        ProductCatalogues::Table,
                        ProductCatalogues::ProductId,
                        Products::Table,
                        Products::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut reference(
                        "fk_product_catalogues_catalogue",
                        ProductCatalogues::Table,
                        ProductCatalogues::CatalogueId,
                        Catalogues::Table,
                        Catalogues::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "ux_product_catalogues_pair",
                ProductCatalogues::Table,
                [ProductCatalogues::ProductId, ProductCatalogues::CatalogueId],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductCatalogues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Catalogues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Promotions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Media::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Articles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum SubCategories {
    Table,
    Id,
    Name,
    Description,
    CategoryId,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Price,
    Description,
    SoleType,
    RawMaterials,
    Origin,
}

#[derive(DeriveIden)]
enum ProductCategories {
    Table,
    Id,
    ProductId,
    CategoryId,
}

#[derive(DeriveIden)]
enum Articles {
    Table,
    Id,
    ProductId,
    Color,
    Size,
    Barcode,
    PurchaseDate,
}

#[derive(DeriveIden)]
enum Media {
    Table,
    Id,
    ProductId,
    MediaType,
    Url,
}

#[derive(DeriveIden)]
enum Promotions {
    Table,
    Id,
    ProductId,
    PromoType,
    Reduction,
    StartDate,
    EndDate,
}

#[derive(DeriveIden)]
enum Catalogues {
    Table,
    Id,
    Name,
    Description,
    CreatedOn,
}

#[derive(DeriveIden)]
enum ProductCatalogues {
    Table,
    Id,
    ProductId,
    CatalogueId,
}
