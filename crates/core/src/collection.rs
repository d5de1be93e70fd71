//! Paged result sets.

use serde::Serialize;

/// Requested page window (`?limit=&offset=`).
///
/// The window only applies when both values are present and non-negative;
/// anything else means "return every row".
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageRequest {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self { limit, offset }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Lenient parse of raw query values; non-numeric input counts as absent.
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<i64>().ok());
        Self::new(parse(limit), parse(offset))
    }

    /// `(limit, offset)` to apply, or `None` for the unbounded set.
    pub fn window(&self) -> Option<(i64, i64)> {
        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) if limit >= 0 && offset >= 0 => Some((limit, offset)),
            _ => None,
        }
    }
}

/// Page metadata.
///
/// `total` counts the rows in *this* page, not the table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub limit: i64,
    pub offset: i64,
    pub total: usize,
}

/// `{ edges, pageInfo }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection<T> {
    pub edges: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Collection<T> {
    pub fn new(edges: Vec<T>, request: PageRequest) -> Self {
        let page_info = PageInfo {
            limit: request.limit.unwrap_or(0),
            offset: request.offset.unwrap_or(0),
            total: edges.len(),
        };
        Self { edges, page_info }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Collection<U> {
        Collection {
            edges: self.edges.into_iter().map(f).collect(),
            page_info: self.page_info,
        }
    }
}
