//! Shared contract types: pagination, sorting and caller identity

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Zero-based page index for the storage layer
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 20)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        Ok(Page {
            items: self.items.into_iter().map(f).collect::<Result<_, _>>()?,
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        })
    }
}

/// Sort key with direction, parsed from `field` / `-field`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    pub field: F,
    pub descending: bool,
}

impl<F> Sort<F> {
    pub fn parse(raw: &str, field: impl Fn(&str) -> Option<F>) -> Option<Self> {
        let (name, descending) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        field(name).map(|field| Self { field, descending })
    }
}

/// Authentication context for privilege-aware operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    /// Authenticated account, `None` for anonymous callers
    pub account_id: Option<i64>,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn account(account_id: i64) -> Self {
        Self {
            account_id: Some(account_id),
            is_staff: false,
            is_superuser: false,
        }
    }

    pub fn staff(account_id: i64) -> Self {
        Self {
            account_id: Some(account_id),
            is_staff: true,
            is_superuser: false,
        }
    }

    pub fn superuser(account_id: i64) -> Self {
        Self {
            account_id: Some(account_id),
            is_staff: true,
            is_superuser: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.account_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Field {
        Price,
    }

    fn field(name: &str) -> Option<Field> {
        (name == "price").then_some(Field::Price)
    }

    #[test]
    fn sort_parses_direction_prefix() {
        assert_eq!(
            Sort::parse("-price", field),
            Some(Sort {
                field: Field::Price,
                descending: true
            })
        );
        assert_eq!(Sort::parse("price", field).map(|s| s.descending), Some(false));
        assert!(Sort::parse("color", field).is_none());
    }

    #[test]
    fn page_request_clamps_to_first_page() {
        let page = PageRequest::new(0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.index(), 0);
    }
}
