use super::{
    accounts::new_account_row, delete_row, fetch_page, fetch_page_two, icontains, pair_exists,
};
use crate::contract::{
    Customer, CustomerFilter, CustomerUpdate, Favorite, NewAccount, NewCustomer, OwnedFilter,
    Page, PageRequest, Review, ReviewDraft, ReviewFilter, ReviewSortField, StaffProfileChanges,
};
use crate::domain::repository::CustomerRepository;
use crate::infra::storage::{
    entity::{
        account,
        customer::{customer, favorite, review},
    },
    mapper,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder,
    TransactionTrait,
};
use std::sync::Arc;

pub struct SeaOrmCustomerRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn joined(row: (customer::Model, Option<account::Model>)) -> Result<Customer> {
    let (profile, account) = row;
    let account = account.ok_or_else(|| anyhow!("customer {} has no account", profile.id))?;
    Ok(mapper::customer(profile, account))
}

async fn load_customer<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Customer>> {
    customer::Entity::find_by_id(id)
        .find_also_related(account::Entity)
        .one(db)
        .await?
        .map(joined)
        .transpose()
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    // ===== Profiles =====

    async fn register(&self, new: &NewCustomer, password_hash: &str) -> Result<Customer> {
        let txn = self.db.begin().await?;

        let account = NewAccount {
            username: new.username.clone(),
            email: new.email.clone(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            password: String::new(),
            is_staff: false,
            is_superuser: false,
            profile: StaffProfileChanges::default(),
        };
        let account_row = new_account_row(&account, password_hash).insert(&txn).await?;

        let profile = customer::ActiveModel {
            account_id: Set(account_row.id),
            last_name: Set(new.last_name.clone()),
            first_name: Set(new.first_name.clone()),
            phone: Set(new.phone.clone()),
            gender: Set(new.gender.clone()),
            loyalty_points: Set(0),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(mapper::customer(profile, account_row))
    }

    async fn list(&self, filter: &CustomerFilter, page: PageRequest) -> Result<Page<Customer>> {
        let mut select = customer::Entity::find()
            .find_also_related(account::Entity)
            .order_by_asc(customer::Column::LastName)
            .order_by_asc(customer::Column::Id);

        if let Some(gender) = &filter.gender {
            select = select.filter(customer::Column::Gender.eq(gender.as_str()));
        }
        if let Some(search) = &filter.search {
            select = select.filter(
                Condition::any()
                    .add(icontains(customer::Entity, customer::Column::LastName, search))
                    .add(icontains(customer::Entity, customer::Column::FirstName, search))
                    .add(icontains(customer::Entity, customer::Column::Phone, search)),
            );
        }

        fetch_page_two(&*self.db, select, page).await?.try_map(joined)
    }

    async fn find(&self, id: i64) -> Result<Option<Customer>> {
        load_customer(&*self.db, id).await
    }

    async fn find_by_account(&self, account_id: i64) -> Result<Option<Customer>> {
        customer::Entity::find()
            .filter(customer::Column::AccountId.eq(account_id))
            .find_also_related(account::Entity)
            .one(&*self.db)
            .await?
            .map(joined)
            .transpose()
    }

    async fn update(&self, id: i64, update: &CustomerUpdate) -> Result<Option<Customer>> {
        let Some(row) = customer::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: customer::ActiveModel = row.into();
        active.last_name = Set(update.last_name.clone());
        active.first_name = Set(update.first_name.clone());
        active.phone = Set(update.phone.clone());
        active.gender = Set(update.gender.clone());
        active.update(&*self.db).await?;

        load_customer(&*self.db, id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let Some(row) = customer::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(false);
        };
        // the profile goes with the account through the cascade
        delete_row::<account::Entity, _>(&*self.db, row.account_id).await
    }

    // ===== Favorites =====

    async fn list_favorites(
        &self,
        filter: &OwnedFilter,
        page: PageRequest,
    ) -> Result<Page<Favorite>> {
        let mut select = favorite::Entity::find()
            .order_by_desc(favorite::Column::AddedAt)
            .order_by_desc(favorite::Column::Id);
        if let Some(customer_id) = filter.customer {
            select = select.filter(favorite::Column::CustomerId.eq(customer_id));
        }
        if let Some(product_id) = filter.product {
            select = select.filter(favorite::Column::ProductId.eq(product_id));
        }
        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn find_favorite(&self, id: i64) -> Result<Option<Favorite>> {
        let row = favorite::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn favorite_exists(
        &self,
        customer_id: i64,
        product_id: i64,
        except: Option<i64>,
    ) -> Result<bool> {
        pair_exists::<favorite::Entity, _>(
            &*self.db,
            favorite::Column::CustomerId,
            favorite::Column::ProductId,
            favorite::Column::Id,
            customer_id,
            product_id,
            except,
        )
        .await
    }

    async fn create_favorite(&self, customer_id: i64, product_id: i64) -> Result<Favorite> {
        let active = favorite::ActiveModel {
            customer_id: Set(customer_id),
            product_id: Set(product_id),
            added_at: Set(Utc::now()),
            ..Default::default()
        };
        let row = favorite::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(row.into())
    }

    async fn update_favorite(
        &self,
        id: i64,
        customer_id: i64,
        product_id: i64,
    ) -> Result<Option<Favorite>> {
        let Some(row) = favorite::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: favorite::ActiveModel = row.into();
        active.customer_id = Set(customer_id);
        active.product_id = Set(product_id);
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete_favorite(&self, id: i64) -> Result<bool> {
        delete_row::<favorite::Entity, _>(&*self.db, id).await
    }

    // ===== Reviews =====

    async fn list_reviews(&self, filter: &ReviewFilter, page: PageRequest) -> Result<Page<Review>> {
        let mut select = review::Entity::find();
        if let Some(customer_id) = filter.customer {
            select = select.filter(review::Column::CustomerId.eq(customer_id));
        }
        if let Some(product_id) = filter.product {
            select = select.filter(review::Column::ProductId.eq(product_id));
        }
        if let Some(rating) = filter.rating {
            select = select.filter(review::Column::Rating.eq(rating));
        }
        if let Some(search) = &filter.search {
            select = select.filter(icontains(review::Entity, review::Column::Comment, search));
        }

        select = match filter.sort {
            Some(sort) => {
                let column = match sort.field {
                    ReviewSortField::CreatedAt => review::Column::CreatedAt,
                    ReviewSortField::Rating => review::Column::Rating,
                };
                let order = if sort.descending { Order::Desc } else { Order::Asc };
                select.order_by(column, order)
            }
            None => select.order_by_desc(review::Column::CreatedAt),
        }
        .order_by_asc(review::Column::Id);

        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn find_review(&self, id: i64) -> Result<Option<Review>> {
        let row = review::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn review_exists(
        &self,
        customer_id: i64,
        product_id: i64,
        except: Option<i64>,
    ) -> Result<bool> {
        pair_exists::<review::Entity, _>(
            &*self.db,
            review::Column::CustomerId,
            review::Column::ProductId,
            review::Column::Id,
            customer_id,
            product_id,
            except,
        )
        .await
    }

    async fn create_review(&self, customer_id: i64, draft: &ReviewDraft) -> Result<Review> {
        let active = review::ActiveModel {
            customer_id: Set(customer_id),
            product_id: Set(draft.product_id),
            rating: Set(draft.rating),
            comment: Set(draft.comment.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let row = review::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(row.into())
    }

    async fn update_review(
        &self,
        id: i64,
        customer_id: i64,
        draft: &ReviewDraft,
    ) -> Result<Option<Review>> {
        let Some(row) = review::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut active: review::ActiveModel = row.into();
        active.customer_id = Set(customer_id);
        active.product_id = Set(draft.product_id);
        active.rating = Set(draft.rating);
        active.comment = Set(draft.comment.clone());
        Ok(Some(active.update(&*self.db).await?.into()))
    }

    async fn delete_review(&self, id: i64) -> Result<bool> {
        delete_row::<review::Entity, _>(&*self.db, id).await
    }
}
