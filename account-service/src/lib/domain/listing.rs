//! Listing glue shared by the users and banks collections: pagination,
//! `field:pattern` search filters, and fixed sort orders.

use regex::Regex;
use thiserror::Error;

/// Error for listing query validation failures
#[derive(Debug, Clone, Error)]
pub enum ListingError {
    #[error("page_number must be at least 1")]
    InvalidPageNumber,

    #[error("page_size must be at least 1")]
    InvalidPageSize,

    #[error("Search filter must have the form field:pattern")]
    MalformedSearchFilter,

    #[error("Unknown search field: {0} (expected name or email)")]
    UnknownSearchField(String),

    #[error("Invalid search pattern: {0}")]
    InvalidSearchPattern(String),
}

/// Field a search filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Email,
}

/// Parsed `field:pattern` search filter with a compiled regex.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    pub field: SearchField,
    pub pattern: Regex,
}

impl SearchFilter {
    /// Parse a raw `field:pattern` query value.
    ///
    /// # Errors
    /// * `MalformedSearchFilter` - No `:` separator
    /// * `UnknownSearchField` - Field is neither `name` nor `email`
    /// * `InvalidSearchPattern` - Pattern is not a valid regex
    pub fn parse(raw: &str) -> Result<Self, ListingError> {
        let (field, pattern) = raw
            .split_once(':')
            .ok_or(ListingError::MalformedSearchFilter)?;

        let field = match field {
            "name" => SearchField::Name,
            "email" => SearchField::Email,
            other => return Err(ListingError::UnknownSearchField(other.to_string())),
        };

        let pattern =
            Regex::new(pattern).map_err(|e| ListingError::InvalidSearchPattern(e.to_string()))?;

        Ok(Self { field, pattern })
    }

    fn matches<T: Listed>(&self, item: &T) -> bool {
        let value = match self.field {
            SearchField::Name => item.name(),
            SearchField::Email => item.email(),
        };
        self.pattern.is_match(value)
    }
}

/// Sort order for listings. Anything other than the two descending
/// keywords falls back to ascending by email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    EmailAsc,
    EmailDesc,
    NameDesc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "email_desc" => SortOrder::EmailDesc,
            "name_desc" => SortOrder::NameDesc,
            _ => SortOrder::EmailAsc,
        }
    }
}

/// Validated listing query.
///
/// `sort: None` leaves items in repository order (newest first); a present
/// sort parameter always produces an explicit order.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub page_number: u32,
    pub page_size: u32,
    pub sort: Option<SortOrder>,
    pub search: Option<SearchFilter>,
}

impl ListQuery {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Build a query from raw request parameters, applying defaults.
    ///
    /// # Errors
    /// * `InvalidPageNumber` / `InvalidPageSize` - Zero values
    /// * Search filter parse errors (see [`SearchFilter::parse`])
    pub fn new(
        page_number: Option<u32>,
        page_size: Option<u32>,
        sort: Option<&str>,
        search: Option<&str>,
    ) -> Result<Self, ListingError> {
        let page_number = page_number.unwrap_or(1);
        if page_number == 0 {
            return Err(ListingError::InvalidPageNumber);
        }

        let page_size = page_size.unwrap_or(Self::DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ListingError::InvalidPageSize);
        }

        Ok(Self {
            page_number,
            page_size,
            sort: sort.map(SortOrder::parse),
            search: search.map(SearchFilter::parse).transpose()?,
        })
    }
}

/// Access to the two searchable/sortable fields of a listed resource.
pub trait Listed {
    fn name(&self) -> &str;
    fn email(&self) -> &str;
}

/// One page of a listing, with the counters the API reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub page_number: u32,
    pub page_size: u32,
    pub count: usize,
    pub total_pages: usize,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Map the page contents while keeping the counters.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            page_number: self.page_number,
            page_size: self.page_size,
            count: self.count,
            total_pages: self.total_pages,
            has_previous_page: self.has_previous_page,
            has_next_page: self.has_next_page,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// Apply search, sort, and pagination to a full collection.
///
/// The counters describe the collection after filtering: `count` is the
/// number of matching items, `has_next_page` whether a later page would be
/// non-empty.
pub fn paginate<T: Listed>(items: Vec<T>, query: &ListQuery) -> Page<T> {
    let mut items: Vec<T> = match &query.search {
        Some(filter) => items.into_iter().filter(|i| filter.matches(i)).collect(),
        None => items,
    };

    match query.sort {
        Some(SortOrder::EmailAsc) => items.sort_by(|a, b| a.email().cmp(b.email())),
        Some(SortOrder::EmailDesc) => items.sort_by(|a, b| b.email().cmp(a.email())),
        Some(SortOrder::NameDesc) => items.sort_by(|a, b| b.name().cmp(a.name())),
        None => {}
    }

    let count = items.len();
    let page_size = query.page_size as usize;
    let total_pages = count.div_ceil(page_size);

    let start = (query.page_number as usize - 1) * page_size;
    let end = (start + page_size).min(count);

    let results = if start < count {
        items.drain(start..end).collect()
    } else {
        Vec::new()
    };

    Page {
        page_number: query.page_number,
        page_size: query.page_size,
        count,
        total_pages,
        has_previous_page: start > 0,
        has_next_page: end < count,
        results,
    }
}
