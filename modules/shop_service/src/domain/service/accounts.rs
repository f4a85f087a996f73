//! Login, token lifecycle and staff account administration

use super::Service;
use crate::contract::{
    Account, AccountDetail, AccountUpdate, AuthContext, NewAccount, Page, PageRequest, ShopError,
    StaffProfileChanges, TokenKind, TokenPair,
};
use crate::domain::access::{require_authenticated, require_staff, require_superuser};
use crate::domain::errors::map_storage_error;
use crate::domain::validation::FieldErrors;
use chrono::Utc;

const BAD_CREDENTIALS: &str = "no active account found with the given credentials";
const BAD_TOKEN: &str = "token is invalid or expired";

fn check_new_account(account: &NewAccount) -> Result<(), ShopError> {
    let mut errors = FieldErrors::new();
    errors.require_text("username", &account.username);
    errors.require_text("password", &account.password);
    check_email(&mut errors, &account.email);
    check_profile(&mut errors, &account.profile);
    errors.into_result()
}

fn check_profile(errors: &mut FieldErrors, profile: &StaffProfileChanges) {
    if let Some(matricule) = &profile.matricule {
        errors.require_text("profile.matricule", matricule);
    }
    if let Some(skills) = &profile.skills {
        if skills.iter().any(|skill| skill.trim().is_empty()) {
            errors.add("profile.skills", "skills may not be blank");
        }
    }
}

pub(super) fn check_email(errors: &mut FieldErrors, email: &str) {
    if !email.contains('@') {
        errors.add("email", "enter a valid email address");
    }
}

impl Service {
    // ===== Tokens =====

    /// Exchange credentials for an access/refresh pair
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ShopError> {
        let stored = self
            .accounts
            .find_by_username(username)
            .await
            .map_err(map_storage_error)?;

        let Some(stored) = stored else {
            tracing::debug!(username, "Login for unknown username");
            return Err(ShopError::unauthorized(BAD_CREDENTIALS));
        };
        if !stored.account.is_active || !self.passwords.verify(password, &stored.password_hash) {
            tracing::debug!(account_id = stored.account.id, "Login rejected");
            return Err(ShopError::unauthorized(BAD_CREDENTIALS));
        }

        self.accounts
            .record_login(stored.account.id, Utc::now())
            .await
            .map_err(map_storage_error)?;

        let pair = TokenPair {
            access: self.sign(&stored.account, TokenKind::Access)?,
            refresh: self.sign(&stored.account, TokenKind::Refresh)?,
        };
        tracing::info!(account_id = stored.account.id, "Account logged in");
        Ok(pair)
    }

    /// New access token from a refresh token
    pub async fn refresh_token(&self, refresh: &str) -> Result<String, ShopError> {
        let verified = self
            .tokens
            .verify(refresh, TokenKind::Refresh)
            .map_err(|_| ShopError::unauthorized(BAD_TOKEN))?;
        let account = self.active_account(verified.account_id).await?;
        self.sign(&account, TokenKind::Access)
    }

    /// Accept any token this service issued and that has not expired
    pub fn verify_token(&self, token: &str) -> Result<(), ShopError> {
        let valid = self.tokens.verify(token, TokenKind::Access).is_ok()
            || self.tokens.verify(token, TokenKind::Refresh).is_ok();
        if valid {
            Ok(())
        } else {
            Err(ShopError::unauthorized(BAD_TOKEN))
        }
    }

    /// Caller identity from a bearer access token
    ///
    /// Privileges come from the stored account, not from the token claims,
    /// so demoted or deactivated accounts lose access immediately.
    pub async fn authenticate(&self, access: &str) -> Result<AuthContext, ShopError> {
        let verified = self
            .tokens
            .verify(access, TokenKind::Access)
            .map_err(|_| ShopError::unauthorized(BAD_TOKEN))?;
        let account = self.active_account(verified.account_id).await?;

        Ok(AuthContext {
            account_id: Some(account.id),
            is_staff: account.is_staff,
            is_superuser: account.is_superuser,
        })
    }

    pub async fn current_account(&self, ctx: &AuthContext) -> Result<Account, ShopError> {
        let account_id = require_authenticated(ctx)?;
        self.accounts
            .find(account_id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("account", account_id))
    }

    async fn active_account(&self, account_id: i64) -> Result<Account, ShopError> {
        let account = self
            .accounts
            .find(account_id)
            .await
            .map_err(map_storage_error)?;
        match account {
            Some(account) if account.is_active => Ok(account),
            _ => Err(ShopError::unauthorized("account is missing or inactive")),
        }
    }

    fn sign(&self, account: &Account, kind: TokenKind) -> Result<String, ShopError> {
        self.tokens.issue(account, kind).map_err(|e| {
            tracing::error!(error = ?e, account_id = account.id, "Failed to sign token");
            ShopError::Internal
        })
    }

    // ===== Account administration =====

    pub async fn list_accounts(
        &self,
        ctx: &AuthContext,
        page: PageRequest,
    ) -> Result<Page<Account>, ShopError> {
        require_staff(ctx)?;
        self.accounts.list(page).await.map_err(map_storage_error)
    }

    /// Account with its staff profile
    pub async fn get_account(
        &self,
        ctx: &AuthContext,
        id: i64,
    ) -> Result<AccountDetail, ShopError> {
        require_staff(ctx)?;
        self.accounts
            .find_detail(id)
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("account", id))
    }

    /// Create an account together with its staff profile
    pub async fn create_account(
        &self,
        ctx: &AuthContext,
        account: NewAccount,
    ) -> Result<AccountDetail, ShopError> {
        require_staff(ctx)?;
        if account.is_superuser {
            require_superuser(ctx)?;
        }
        check_new_account(&account)?;

        let hash = self.hash_password(&account.password)?;
        let created = self
            .accounts
            .create(&account, &hash)
            .await
            .map_err(map_storage_error)?;
        tracing::info!(
            account_id = created.account.id,
            is_staff = created.account.is_staff,
            matricule = created.profile.as_ref().map(|p| p.matricule.as_str()),
            "Account created"
        );
        Ok(created)
    }

    pub async fn update_account(
        &self,
        ctx: &AuthContext,
        id: i64,
        update: AccountUpdate,
    ) -> Result<AccountDetail, ShopError> {
        require_staff(ctx)?;
        if update.is_superuser.is_some() {
            require_superuser(ctx)?;
        }

        let mut errors = FieldErrors::new();
        if let Some(email) = &update.email {
            check_email(&mut errors, email);
        }
        if let Some(password) = &update.password {
            errors.require_text("password", password);
        }
        if let Some(profile) = &update.profile {
            check_profile(&mut errors, profile);
        }
        errors.into_result()?;

        let hash = update
            .password
            .as_deref()
            .map(|password| self.hash_password(password))
            .transpose()?;
        self.accounts
            .update(id, &update, hash.as_deref())
            .await
            .map_err(map_storage_error)?
            .ok_or_else(|| ShopError::not_found("account", id))
    }

    pub async fn delete_account(&self, ctx: &AuthContext, id: i64) -> Result<(), ShopError> {
        let caller = require_superuser(ctx)?;
        if caller == id {
            return Err(ShopError::conflict("cannot delete your own account"));
        }

        let deleted = self.accounts.delete(id).await.map_err(map_storage_error)?;
        if !deleted {
            return Err(ShopError::not_found("account", id));
        }
        tracing::info!(account_id = id, "Account deleted");
        Ok(())
    }

    pub(super) fn hash_password(&self, password: &str) -> Result<String, ShopError> {
        self.passwords.hash(password).map_err(|e| {
            tracing::error!(error = ?e, "Failed to hash password");
            ShopError::Internal
        })
    }
}
