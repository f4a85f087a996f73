use super::{delete_row, fetch_page, icontains};
use crate::contract::{
    Article, ArticleDraft, ArticleFilter, Catalogue, CatalogueDraft, Category, CategoryDraft,
    Media, MediaDraft, Page, PageRequest, Product, ProductDetail, ProductDraft, ProductFilter,
    ProductSortField, Promotion, PromotionDraft, SubCategory, SubCategoryDraft,
};
use crate::domain::repository::CatalogRepository;
use crate::infra::storage::{
    entity::catalog::{
        article, catalogue, category, media, product, product_catalogue, product_category,
        promotion, sub_category,
    },
    mapper,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Query, ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition,
    ConnectionTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder,
    TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;

pub struct SeaOrmCatalogRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Category ids per product, for the given products
async fn category_links<C: ConnectionTrait>(
    db: &C,
    product_ids: &[i64],
) -> Result<HashMap<i64, Vec<i64>>> {
    let links = product_category::Entity::find()
        .filter(product_category::Column::ProductId.is_in(product_ids.iter().copied()))
        .order_by_asc(product_category::Column::CategoryId)
        .all(db)
        .await?;

    let mut by_product: HashMap<i64, Vec<i64>> = HashMap::new();
    for link in links {
        by_product
            .entry(link.product_id)
            .or_default()
            .push(link.category_id);
    }
    Ok(by_product)
}

async fn replace_category_links<C: ConnectionTrait>(
    db: &C,
    product_id: i64,
    category_ids: &[i64],
) -> Result<()> {
    product_category::Entity::delete_many()
        .filter(product_category::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;

    let mut seen = Vec::with_capacity(category_ids.len());
    for &category_id in category_ids {
        if seen.contains(&category_id) {
            continue;
        }
        seen.push(category_id);
        product_category::ActiveModel {
            product_id: Set(product_id),
            category_id: Set(category_id),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

async fn catalogue_products<C: ConnectionTrait>(db: &C, catalogue_id: i64) -> Result<Vec<i64>> {
    let links = product_catalogue::Entity::find()
        .filter(product_catalogue::Column::CatalogueId.eq(catalogue_id))
        .order_by_asc(product_catalogue::Column::ProductId)
        .all(db)
        .await?;
    Ok(links.into_iter().map(|link| link.product_id).collect())
}

async fn replace_catalogue_products<C: ConnectionTrait>(
    db: &C,
    catalogue_id: i64,
    product_ids: &[i64],
) -> Result<()> {
    product_catalogue::Entity::delete_many()
        .filter(product_catalogue::Column::CatalogueId.eq(catalogue_id))
        .exec(db)
        .await?;

    let mut seen = Vec::with_capacity(product_ids.len());
    for &product_id in product_ids {
        if seen.contains(&product_id) {
            continue;
        }
        seen.push(product_id);
        product_catalogue::ActiveModel {
            product_id: Set(product_id),
            catalogue_id: Set(catalogue_id),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

fn apply_product_fields(active: &mut product::ActiveModel, draft: &ProductDraft) {
    active.name = Set(draft.name.clone());
    active.price = Set(draft.price);
    active.description = Set(draft.description.clone());
    active.sole_type = Set(draft.sole_type.clone());
    active.raw_materials = Set(draft.raw_materials.clone());
    active.origin = Set(draft.origin.clone());
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    // ===== Categories =====

    async fn list_categories(&self, page: PageRequest) -> Result<Page<Category>> {
        let select = category::Entity::find().order_by_asc(category::Column::Name);
        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>> {
        let row = category::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create_category(&self, draft: &CategoryDraft) -> Result<Category> {
        let active = category::ActiveModel {
            name: Set(draft.name.clone()),
            description: Set(draft.description.clone()),
            ..Default::default()
        };
        let row = category::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(row.into())
    }

    async fn update_category(&self, id: i64, draft: &CategoryDraft) -> Result<Option<Category>> {
        let Some(row) = category::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: category::ActiveModel = row.into();
        active.name = Set(draft.name.clone());
        active.description = Set(draft.description.clone());
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete_category(&self, id: i64) -> Result<bool> {
        delete_row::<category::Entity, _>(&*self.db, id).await
    }

    // ===== Sub-categories =====

    async fn list_sub_categories(
        &self,
        category: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<SubCategory>> {
        let mut select = sub_category::Entity::find().order_by_asc(sub_category::Column::Name);
        if let Some(category_id) = category {
            select = select.filter(sub_category::Column::CategoryId.eq(category_id));
        }
        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn find_sub_category(&self, id: i64) -> Result<Option<SubCategory>> {
        let row = sub_category::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create_sub_category(&self, draft: &SubCategoryDraft) -> Result<SubCategory> {
        let active = sub_category::ActiveModel {
            name: Set(draft.name.clone()),
            description: Set(draft.description.clone()),
            category_id: Set(draft.category_id),
            ..Default::default()
        };
        let row = sub_category::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(row.into())
    }

    async fn update_sub_category(
        &self,
        id: i64,
        draft: &SubCategoryDraft,
    ) -> Result<Option<SubCategory>> {
        let Some(row) = sub_category::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: sub_category::ActiveModel = row.into();
        active.name = Set(draft.name.clone());
        active.description = Set(draft.description.clone());
        active.category_id = Set(draft.category_id);
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete_sub_category(&self, id: i64) -> Result<bool> {
        delete_row::<sub_category::Entity, _>(&*self.db, id).await
    }

    // ===== Products =====

    async fn list_products(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>> {
        let mut select = product::Entity::find();

        if let Some(category_id) = filter.category {
            select = select.filter(
                product::Column::Id.in_subquery(
                    Query::select()
                        .column(product_category::Column::ProductId)
                        .from(product_category::Entity)
                        .and_where(product_category::Column::CategoryId.eq(category_id))
                        .to_owned(),
                ),
            );
        }
        if let Some(origin) = &filter.origin {
            select = select.filter(product::Column::Origin.eq(origin.as_str()));
        }
        if let Some(sole_type) = &filter.sole_type {
            select = select.filter(product::Column::SoleType.eq(sole_type.as_str()));
        }
        if let Some(search) = &filter.search {
            select = select.filter(
                Condition::any()
                    .add(icontains(product::Entity, product::Column::Name, search))
                    .add(icontains(product::Entity, product::Column::Description, search)),
            );
        }

        select = match filter.sort {
            Some(sort) => {
                let column = match sort.field {
                    ProductSortField::Price => product::Column::Price,
                    ProductSortField::Name => product::Column::Name,
                };
                let order = if sort.descending { Order::Desc } else { Order::Asc };
                select.order_by(column, order)
            }
            None => select,
        }
        .order_by_asc(product::Column::Id);

        let rows = fetch_page(&*self.db, select, page).await?;
        let ids: Vec<i64> = rows.items.iter().map(|row| row.id).collect();
        let mut links = category_links(&*self.db, &ids).await?;
        Ok(rows.map(|row| {
            let category_ids = links.remove(&row.id).unwrap_or_default();
            mapper::product(row, category_ids)
        }))
    }

    async fn find_product(&self, id: i64) -> Result<Option<Product>> {
        let Some(row) = product::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut links = category_links(&*self.db, &[id]).await?;
        Ok(Some(mapper::product(
            row,
            links.remove(&id).unwrap_or_default(),
        )))
    }

    async fn product_detail(&self, id: i64) -> Result<Option<ProductDetail>> {
        let Some(product) = self.find_product(id).await? else {
            return Ok(None);
        };

        let articles = article::Entity::find()
            .filter(article::Column::ProductId.eq(id))
            .order_by_asc(article::Column::Id)
            .all(&*self.db)
            .await?;
        let media = media::Entity::find()
            .filter(media::Column::ProductId.eq(id))
            .order_by_asc(media::Column::Id)
            .all(&*self.db)
            .await?;
        let promotions = promotion::Entity::find()
            .filter(promotion::Column::ProductId.eq(id))
            .order_by_asc(promotion::Column::StartDate)
            .all(&*self.db)
            .await?;

        Ok(Some(ProductDetail {
            product,
            articles: articles.into_iter().map(Into::into).collect(),
            media: media.into_iter().map(Into::into).collect(),
            promotions: promotions.into_iter().map(Into::into).collect(),
        }))
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product> {
        let txn = self.db.begin().await?;

        let mut active = <product::ActiveModel as Default>::default();
        apply_product_fields(&mut active, draft);
        let row = active.insert(&txn).await?;
        replace_category_links(&txn, row.id, &draft.category_ids).await?;
        let mut links = category_links(&txn, &[row.id]).await?;

        txn.commit().await?;
        let category_ids = links.remove(&row.id).unwrap_or_default();
        Ok(mapper::product(row, category_ids))
    }

    async fn update_product(&self, id: i64, draft: &ProductDraft) -> Result<Option<Product>> {
        let txn = self.db.begin().await?;

        let Some(row) = product::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };
        let mut active: product::ActiveModel = row.into();
        apply_product_fields(&mut active, draft);
        let row = active.update(&txn).await?;
        replace_category_links(&txn, id, &draft.category_ids).await?;
        let mut links = category_links(&txn, &[id]).await?;

        txn.commit().await?;
        Ok(Some(mapper::product(
            row,
            links.remove(&id).unwrap_or_default(),
        )))
    }

    async fn delete_product(&self, id: i64) -> Result<bool> {
        delete_row::<product::Entity, _>(&*self.db, id).await
    }

    // ===== Articles =====

    async fn list_articles(
        &self,
        filter: &ArticleFilter,
        page: PageRequest,
    ) -> Result<Page<Article>> {
        let mut select = article::Entity::find().order_by_asc(article::Column::Id);
        if let Some(product_id) = filter.product {
            select = select.filter(article::Column::ProductId.eq(product_id));
        }
        if let Some(color) = &filter.color {
            select = select.filter(article::Column::Color.eq(color.as_str()));
        }
        if let Some(size) = &filter.size {
            select = select.filter(article::Column::Size.eq(size.as_str()));
        }
        if let Some(search) = &filter.search {
            select = select.filter(icontains(article::Entity, article::Column::Barcode, search));
        }
        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn find_article(&self, id: i64) -> Result<Option<Article>> {
        let row = article::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create_article(&self, draft: &ArticleDraft) -> Result<Article> {
        let active = article::ActiveModel {
            product_id: Set(draft.product_id),
            color: Set(draft.color.clone()),
            size: Set(draft.size.clone()),
            barcode: Set(draft.barcode.clone()),
            purchase_date: Set(draft.purchase_date),
            ..Default::default()
        };
        let row = article::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(row.into())
    }

    async fn update_article(&self, id: i64, draft: &ArticleDraft) -> Result<Option<Article>> {
        let Some(row) = article::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: article::ActiveModel = row.into();
        active.product_id = Set(draft.product_id);
        active.color = Set(draft.color.clone());
        active.size = Set(draft.size.clone());
        active.barcode = Set(draft.barcode.clone());
        active.purchase_date = Set(draft.purchase_date);
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete_article(&self, id: i64) -> Result<bool> {
        delete_row::<article::Entity, _>(&*self.db, id).await
    }

    // ===== Media =====

    async fn list_media(&self, product: Option<i64>, page: PageRequest) -> Result<Page<Media>> {
        let mut select = media::Entity::find().order_by_asc(media::Column::Id);
        if let Some(product_id) = product {
            select = select.filter(media::Column::ProductId.eq(product_id));
        }
        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn find_media(&self, id: i64) -> Result<Option<Media>> {
        let row = media::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create_media(&self, draft: &MediaDraft) -> Result<Media> {
        let active = media::ActiveModel {
            product_id: Set(draft.product_id),
            media_type: Set(draft.media_type.clone()),
            url: Set(draft.url.clone()),
            ..Default::default()
        };
        let row = media::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(row.into())
    }

    async fn update_media(&self, id: i64, draft: &MediaDraft) -> Result<Option<Media>> {
        let Some(row) = media::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: media::ActiveModel = row.into();
        active.product_id = Set(draft.product_id);
        active.media_type = Set(draft.media_type.clone());
        active.url = Set(draft.url.clone());
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete_media(&self, id: i64) -> Result<bool> {
        delete_row::<media::Entity, _>(&*self.db, id).await
    }

    // ===== Promotions =====

    async fn list_promotions(
        &self,
        product: Option<i64>,
        page: PageRequest,
    ) -> Result<Page<Promotion>> {
        let mut select = promotion::Entity::find()
            .order_by_desc(promotion::Column::StartDate)
            .order_by_asc(promotion::Column::Id);
        if let Some(product_id) = product {
            select = select.filter(promotion::Column::ProductId.eq(product_id));
        }
        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn find_promotion(&self, id: i64) -> Result<Option<Promotion>> {
        let row = promotion::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn create_promotion(&self, draft: &PromotionDraft) -> Result<Promotion> {
        let active = promotion::ActiveModel {
            product_id: Set(draft.product_id),
            promo_type: Set(draft.promo_type.clone()),
            reduction: Set(draft.reduction),
            start_date: Set(draft.start_date),
            end_date: Set(draft.end_date),
            ..Default::default()
        };
        let row = promotion::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(row.into())
    }

    async fn update_promotion(
        &self,
        id: i64,
        draft: &PromotionDraft,
    ) -> Result<Option<Promotion>> {
        let Some(row) = promotion::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: promotion::ActiveModel = row.into();
        active.product_id = Set(draft.product_id);
        active.promo_type = Set(draft.promo_type.clone());
        active.reduction = Set(draft.reduction);
        active.start_date = Set(draft.start_date);
        active.end_date = Set(draft.end_date);
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete_promotion(&self, id: i64) -> Result<bool> {
        delete_row::<promotion::Entity, _>(&*self.db, id).await
    }

    // ===== Catalogues =====

    async fn list_catalogues(&self, page: PageRequest) -> Result<Page<Catalogue>> {
        let select = catalogue::Entity::find()
            .order_by_desc(catalogue::Column::CreatedOn)
            .order_by_asc(catalogue::Column::Id);
        let rows = fetch_page(&*self.db, select, page).await?;

        let mut items = Vec::with_capacity(rows.items.len());
        for row in rows.items {
            let product_ids = catalogue_products(&*self.db, row.id).await?;
            items.push(mapper::catalogue(row, product_ids));
        }
        Ok(Page {
            items,
            total: rows.total,
            page: rows.page,
            page_size: rows.page_size,
        })
    }

    async fn find_catalogue(&self, id: i64) -> Result<Option<Catalogue>> {
        let Some(row) = catalogue::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let product_ids = catalogue_products(&*self.db, id).await?;
        Ok(Some(mapper::catalogue(row, product_ids)))
    }

    async fn create_catalogue(&self, draft: &CatalogueDraft) -> Result<Catalogue> {
        let txn = self.db.begin().await?;

        let row = catalogue::ActiveModel {
            name: Set(draft.name.clone()),
            description: Set(draft.description.clone()),
            created_on: Set(Utc::now().date_naive()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        replace_catalogue_products(&txn, row.id, &draft.product_ids).await?;
        let product_ids = catalogue_products(&txn, row.id).await?;

        txn.commit().await?;
        Ok(mapper::catalogue(row, product_ids))
    }

    async fn update_catalogue(
        &self,
        id: i64,
        draft: &CatalogueDraft,
    ) -> Result<Option<Catalogue>> {
        let txn = self.db.begin().await?;

        let Some(row) = catalogue::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };
        let mut active: catalogue::ActiveModel = row.into();
        active.name = Set(draft.name.clone());
        active.description = Set(draft.description.clone());
        let row = active.update(&txn).await?;
        replace_catalogue_products(&txn, id, &draft.product_ids).await?;
        let product_ids = catalogue_products(&txn, id).await?;

        txn.commit().await?;
        Ok(Some(mapper::catalogue(row, product_ids)))
    }

    async fn delete_catalogue(&self, id: i64) -> Result<bool> {
        delete_row::<catalogue::Entity, _>(&*self.db, id).await
    }
}
