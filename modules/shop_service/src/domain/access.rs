//! Caller checks shared by every store

use crate::contract::{AuthContext, ShopError};

/// Account id of an authenticated caller
pub fn require_authenticated(ctx: &AuthContext) -> Result<i64, ShopError> {
    ctx.account_id
        .ok_or_else(|| ShopError::unauthorized("authentication required"))
}

pub fn require_staff(ctx: &AuthContext) -> Result<i64, ShopError> {
    let account_id = require_authenticated(ctx)?;
    if !ctx.is_staff {
        return Err(ShopError::forbidden("staff access required"));
    }
    Ok(account_id)
}

pub fn require_superuser(ctx: &AuthContext) -> Result<i64, ShopError> {
    let account_id = require_authenticated(ctx)?;
    if !ctx.is_superuser {
        return Err(ShopError::forbidden("superuser access required"));
    }
    Ok(account_id)
}

/// Customer rows a caller may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Staff see every customer's rows
    All,
    /// Rows of this customer only
    Own(i64),
    /// Authenticated account without a customer profile
    Nothing,
}

impl Scope {
    /// Customer filter for a list query, `None` when the caller sees nothing
    pub fn narrow(self, requested: Option<i64>) -> Option<Option<i64>> {
        match self {
            Scope::All => Some(requested),
            Scope::Own(own) => match requested {
                Some(other) if other != own => None,
                _ => Some(Some(own)),
            },
            Scope::Nothing => None,
        }
    }

    pub fn can_see(self, customer_id: i64) -> bool {
        match self {
            Scope::All => true,
            Scope::Own(own) => own == customer_id,
            Scope::Nothing => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_callers_are_unauthorized() {
        let ctx = AuthContext::anonymous();
        assert!(matches!(
            require_authenticated(&ctx),
            Err(ShopError::Unauthorized { .. })
        ));
        assert!(matches!(require_staff(&ctx), Err(ShopError::Unauthorized { .. })));
    }

    #[test]
    fn customers_are_forbidden_staff_actions() {
        let ctx = AuthContext::account(3);
        assert!(matches!(require_staff(&ctx), Err(ShopError::Forbidden { .. })));
        assert_eq!(require_staff(&AuthContext::staff(3)), Ok(3));
        assert!(matches!(
            require_superuser(&AuthContext::staff(3)),
            Err(ShopError::Forbidden { .. })
        ));
    }

    #[test]
    fn own_scope_overrides_requested_customer() {
        assert_eq!(Scope::Own(4).narrow(None), Some(Some(4)));
        assert_eq!(Scope::Own(4).narrow(Some(4)), Some(Some(4)));
        assert_eq!(Scope::Own(4).narrow(Some(5)), None);
        assert_eq!(Scope::All.narrow(Some(5)), Some(Some(5)));
        assert_eq!(Scope::Nothing.narrow(None), None);
    }

    #[test]
    fn visibility_follows_scope() {
        assert!(Scope::All.can_see(1));
        assert!(Scope::Own(1).can_see(1));
        assert!(!Scope::Own(1).can_see(2));
        assert!(!Scope::Nothing.can_see(1));
    }
}
