use super::{delete_row, fetch_page};
use crate::contract::{
    Account, AccountDetail, AccountUpdate, NewAccount, Page, PageRequest, StaffProfileChanges,
    StoredAccount,
};
use crate::domain::repository::AccountRepository;
use crate::infra::storage::{
    entity::{account, staff_profile},
    mapper,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::sync::Arc;

pub struct SeaOrmAccountRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmAccountRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Active model for a fresh account row
pub(super) fn new_account_row(account: &NewAccount, password_hash: &str) -> account::ActiveModel {
    account::ActiveModel {
        username: Set(account.username.clone()),
        email: Set(account.email.clone()),
        first_name: Set(account.first_name.clone()),
        last_name: Set(account.last_name.clone()),
        password_hash: Set(password_hash.to_string()),
        is_staff: Set(account.is_staff),
        is_superuser: Set(account.is_superuser),
        is_active: Set(true),
        date_joined: Set(Utc::now()),
        last_login: Set(None),
        ..Default::default()
    }
}

/// Apply `changes` to the account's staff profile, creating it with the
/// `MAT{account_id}` matricule when missing
async fn save_profile<C: ConnectionTrait>(
    db: &C,
    account_id: i64,
    changes: &StaffProfileChanges,
) -> Result<staff_profile::Model> {
    let now = Utc::now();
    let existing = staff_profile::Entity::find()
        .filter(staff_profile::Column::AccountId.eq(account_id))
        .one(db)
        .await?;
    let is_new = existing.is_none();
    let mut active = match existing {
        Some(row) => row.into(),
        None => staff_profile::ActiveModel {
            account_id: Set(account_id),
            matricule: Set(format!("MAT{account_id}")),
            photo: Set(None),
            phone: Set(String::new()),
            address: Set(String::new()),
            hire_date: Set(None),
            job_title: Set(String::new()),
            bio: Set(String::new()),
            skills: Set(serde_json::Value::Array(Vec::new())),
            created_at: Set(now),
            ..Default::default()
        },
    };

    if let Some(matricule) = &changes.matricule {
        active.matricule = Set(matricule.clone());
    }
    if let Some(photo) = &changes.photo {
        active.photo = Set(Some(photo.clone()));
    }
    if let Some(phone) = &changes.phone {
        active.phone = Set(phone.clone());
    }
    if let Some(address) = &changes.address {
        active.address = Set(address.clone());
    }
    if let Some(hire_date) = changes.hire_date {
        active.hire_date = Set(Some(hire_date));
    }
    if let Some(job_title) = &changes.job_title {
        active.job_title = Set(job_title.clone());
    }
    if let Some(bio) = &changes.bio {
        active.bio = Set(bio.clone());
    }
    if let Some(skills) = &changes.skills {
        active.skills = Set(serde_json::Value::from(skills.clone()));
    }
    active.updated_at = Set(now);

    let row = if is_new {
        active.insert(db).await?
    } else {
        active.update(db).await?
    };
    Ok(row)
}

async fn load_profile<C: ConnectionTrait>(
    db: &C,
    account_id: i64,
) -> Result<Option<staff_profile::Model>> {
    Ok(staff_profile::Entity::find()
        .filter(staff_profile::Column::AccountId.eq(account_id))
        .one(db)
        .await?)
}

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn create(&self, account: &NewAccount, password_hash: &str) -> Result<AccountDetail> {
        let txn = self.db.begin().await?;

        let row = new_account_row(account, password_hash).insert(&txn).await?;
        let profile = save_profile(&txn, row.id, &account.profile).await?;

        txn.commit().await?;
        Ok(mapper::account_detail(row, Some(profile)))
    }

    async fn find(&self, id: i64) -> Result<Option<Account>> {
        let row = account::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn find_detail(&self, id: i64) -> Result<Option<AccountDetail>> {
        let row = account::Entity::find_by_id(id)
            .find_also_related(staff_profile::Entity)
            .one(&*self.db)
            .await?;
        Ok(row.map(|(account, profile)| mapper::account_detail(account, profile)))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<StoredAccount>> {
        let row = account::Entity::find()
            .filter(account::Column::Username.eq(username))
            .one(&*self.db)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Account>> {
        let select = account::Entity::find().order_by_asc(account::Column::Username);
        Ok(fetch_page(&*self.db, select, page).await?.map(Into::into))
    }

    async fn update(
        &self,
        id: i64,
        update: &AccountUpdate,
        password_hash: Option<&str>,
    ) -> Result<Option<AccountDetail>> {
        let txn = self.db.begin().await?;
        let Some(row) = account::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: account::ActiveModel = row.clone().into();
        if let Some(email) = &update.email {
            active.email = Set(email.clone());
        }
        if let Some(first_name) = &update.first_name {
            active.first_name = Set(first_name.clone());
        }
        if let Some(last_name) = &update.last_name {
            active.last_name = Set(last_name.clone());
        }
        if let Some(is_staff) = update.is_staff {
            active.is_staff = Set(is_staff);
        }
        if let Some(is_superuser) = update.is_superuser {
            active.is_superuser = Set(is_superuser);
        }
        if let Some(is_active) = update.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(hash) = password_hash {
            active.password_hash = Set(hash.to_string());
        }
        let row = if active.is_changed() {
            active.update(&txn).await?
        } else {
            row
        };

        let profile = match &update.profile {
            Some(changes) => Some(save_profile(&txn, id, changes).await?),
            None => load_profile(&txn, id).await?,
        };

        txn.commit().await?;
        Ok(Some(mapper::account_detail(row, profile)))
    }

    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> Result<()> {
        let active = account::ActiveModel {
            id: Set(id),
            last_login: Set(Some(at)),
            ..Default::default()
        };
        account::Entity::update(active).exec(&*self.db).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        delete_row::<account::Entity, _>(&*self.db, id).await
    }
}
