//! Database migrations for shop service

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_accounts;
mod m20250101_000002_create_catalog;
mod m20250101_000003_create_customers;
mod m20250101_000004_create_orders;
mod m20250101_000005_create_organization;
mod m20250101_000006_create_staff_profiles;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_accounts::Migration),
            Box::new(m20250101_000002_create_catalog::Migration),
            Box::new(m20250101_000003_create_customers::Migration),
            Box::new(m20250101_000004_create_orders::Migration),
            Box::new(m20250101_000005_create_organization::Migration),
            Box::new(m20250101_000006_create_staff_profiles::Migration),
        ]
    }
}

/// Auto-increment 64-bit primary key
fn pk<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// Non-null timestamp defaulting to now
fn timestamp<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

/// Foreign key from `table.col` to `target.id`
fn reference<F, C, R, I>(
    name: &str,
    table: F,
    col: C,
    target: R,
    target_id: I,
    on_delete: ForeignKeyAction,
) -> ForeignKeyCreateStatement
where
    F: IntoTableRef,
    C: IntoIden,
    R: IntoTableRef,
    I: IntoIden,
{
    ForeignKey::create()
        .name(name)
        .from(table, col)
        .to(target, target_id)
        .on_delete(on_delete)
        .on_update(ForeignKeyAction::Cascade)
        .to_owned()
}

/// Unique index over the given columns
fn unique_index<T, C>(name: &str, table: T, cols: impl IntoIterator<Item = C>) -> IndexCreateStatement
where
    T: IntoTableRef,
    C: IntoIden,
{
    let mut index = Index::create();
    index.name(name).table(table).unique();
    for col in cols {
        index.col(col);
    }
    index.to_owned()
}
