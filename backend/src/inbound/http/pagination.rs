//! Page/limit pagination envelope for listing endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::PageWindow;

/// Default page size when the client does not ask for one.
const DEFAULT_LIMIT: u32 = 20;
/// Ceiling on the page size a client may request.
const MAX_LIMIT: u32 = 100;

/// Query parameters accepted by paginated endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// 1-based page number; defaults to the first page.
    pub page: Option<u32>,
    /// Page size; defaults to 20, capped at 100.
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Clamp the raw query into an effective `(page, limit)` pair.
    pub fn effective(self) -> (u32, u32) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        (page, limit)
    }

    /// The repository window for this query.
    ///
    /// The window over-fetches one row so the caller can detect whether a
    /// further page exists without a count query.
    pub fn window(self) -> PageWindow {
        let (page, limit) = self.effective();
        PageWindow {
            offset: i64::from(page - 1) * i64::from(limit),
            limit: i64::from(limit) + 1,
        }
    }
}

/// JSON envelope wrapping one page of results.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// Always `true`.
    pub success: bool,
    /// The page of results, newest first.
    pub items: Vec<T>,
    /// 1-based page number served.
    pub page: u32,
    /// Effective page size.
    pub limit: u32,
    /// Whether a further page exists.
    pub has_more: bool,
}

impl<T> Paginated<T> {
    /// Build the envelope from an over-fetched row set.
    ///
    /// `rows` must come from a query windowed by [`PageQuery::window`]; any
    /// row beyond the requested limit is dropped and flips `has_more`.
    pub fn from_overfetch(rows: Vec<T>, query: PageQuery) -> Self {
        let (page, limit) = query.effective();
        let mut items = rows;
        let has_more = items.len() > limit as usize;
        items.truncate(limit as usize);
        Self {
            success: true,
            items,
            page,
            limit,
            has_more,
        }
    }
}
