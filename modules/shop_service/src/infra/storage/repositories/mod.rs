//! SeaORM repository implementations

mod accounts;
mod catalog;
mod customers;
mod orders;
mod organization;

pub use accounts::SeaOrmAccountRepository;
pub use catalog::SeaOrmCatalogRepository;
pub use customers::SeaOrmCustomerRepository;
pub use orders::SeaOrmOrderRepository;
pub use organization::SeaOrmOrganizationRepository;

use crate::contract::{Page, PageRequest};
use anyhow::Result;
use sea_orm::{
    sea_query::{Expr, Func, IntoIden, SimpleExpr},
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, PaginatorTrait, PrimaryKeyTrait,
    QueryFilter, Select, SelectTwo,
};

/// Run a paginated select
async fn fetch_page<E, C>(db: &C, select: Select<E>, page: PageRequest) -> Result<Page<E::Model>>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync + 'static,
    C: ConnectionTrait,
{
    let paginator = select.paginate(db, page.page_size);
    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(page.index()).await?;
    Ok(Page::new(rows, total, page))
}

/// Run a paginated select over two joined entities
async fn fetch_page_two<E, F, C>(
    db: &C,
    select: SelectTwo<E, F>,
    page: PageRequest,
) -> Result<Page<(E::Model, Option<F::Model>)>>
where
    E: EntityTrait,
    F: EntityTrait,
    E::Model: FromQueryResult + Send + Sync + 'static,
    F::Model: FromQueryResult + Send + Sync + 'static,
    C: ConnectionTrait,
{
    let paginator = select.paginate(db, page.page_size);
    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(page.index()).await?;
    Ok(Page::new(rows, total, page))
}

/// Delete by primary key; `false` when nothing matched
async fn delete_row<E, C>(db: &C, id: i64) -> Result<bool>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i64>,
    C: ConnectionTrait,
{
    let result = E::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Whether a (customer, product) row exists, ignoring row `except`
async fn pair_exists<E, C>(
    db: &C,
    customer_col: E::Column,
    product_col: E::Column,
    id_col: E::Column,
    customer_id: i64,
    product_id: i64,
    except: Option<i64>,
) -> Result<bool>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
    C: ConnectionTrait,
{
    let mut select = E::find()
        .filter(customer_col.eq(customer_id))
        .filter(product_col.eq(product_id));
    if let Some(id) = except {
        select = select.filter(id_col.ne(id));
    }
    Ok(select.count(db).await? > 0)
}

/// Case-insensitive substring match on a table-qualified column
fn icontains<T, C>(table: T, col: C, needle: &str) -> SimpleExpr
where
    T: IntoIden + 'static,
    C: IntoIden + 'static,
{
    Expr::expr(Func::lower(Expr::col((table, col)))).like(format!("%{}%", needle.to_lowercase()))
}
