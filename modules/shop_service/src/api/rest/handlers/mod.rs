//! HTTP request handlers - thin layer that delegates to domain service

pub mod auth;
pub mod catalog;
pub mod customers;
pub mod orders;
pub mod organization;

use super::error::{invalid_parameter, Problem};
use crate::contract::Sort;

/// Parse an `ordering` query value (`field` or `-field`)
pub(crate) fn ordering<F>(
    raw: Option<&str>,
    field: impl Fn(&str) -> Option<F>,
) -> Result<Option<Sort<F>>, Problem> {
    match raw {
        None | Some("") => Ok(None),
        Some(raw) => Sort::parse(raw, field)
            .map(Some)
            .ok_or_else(|| invalid_parameter("ordering", format!("unknown ordering '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ProductSortField;

    #[test]
    fn ordering_accepts_known_fields_only() {
        let sort = ordering(Some("-price"), ProductSortField::parse).unwrap().unwrap();
        assert_eq!(sort.field, ProductSortField::Price);
        assert!(sort.descending);
        assert!(ordering(None, ProductSortField::parse).unwrap().is_none());
        assert!(ordering(Some("color"), ProductSortField::parse).is_err());
    }
}
