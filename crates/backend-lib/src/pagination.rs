//! Page/limit normalization shared by every list endpoint.
use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use blog_common::Pagination;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Raw `?page=&limit=` values. Kept as strings so an unparsable value
/// falls back to its own default without affecting the other.
#[derive(Debug, Default)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    /// Pick the first `page` and `limit` out of decoded query pairs.
    /// Repeated and unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" if query.page.is_none() => query.page = Some(value),
                "limit" if query.limit.is_none() => query.limit = Some(value),
                _ => {},
            }
        }
        query
    }
}

/// A normalized page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    /// `page <= 0` becomes 1; `limit <= 0` or `limit > 100` becomes 10
    pub fn normalize(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p > 0 => p,
            _ => DEFAULT_PAGE,
        };
        let limit = match limit {
            Some(l) if l > 0 && l <= MAX_LIMIT => l,
            _ => DEFAULT_LIMIT,
        };
        Self { page, limit }
    }

    /// Rows to skip
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Metadata for a result set of `total` rows
    pub fn pagination(&self, total: i64) -> Pagination {
        Pagination::new(self.page, self.limit, total)
    }
}

impl From<PageQuery> for PageParams {
    fn from(query: PageQuery) -> Self {
        let parse = |raw: Option<String>| raw.and_then(|v| v.trim().parse::<i64>().ok());
        Self::normalize(parse(query.page), parse(query.limit))
    }
}

/// Never rejects: a malformed query string reads as an empty one
impl<S> FromRequestParts<S> for PageParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        Ok(PageQuery::from_pairs(pairs).into())
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::normalize(None, None)
    }
}
