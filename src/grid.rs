//! Paginated grid contract shared by every list page
//!
//! The console grid is 1-based (`current`, `pageSize`); backend pages are
//! 0-based. A fetch resolves to `{data, total, success}` plus the footer label.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::client::PageData;
use crate::error::AppResult;

const MAX_PAGE_SIZE: u64 = 100;
/// Highest page number whose record range still fits in a `u64`
const MAX_CURRENT: u64 = u64::MAX / MAX_PAGE_SIZE;

/// Grid request parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridParams {
    #[serde(default = "default_current")]
    pub current: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_current() -> u64 {
    1
}

fn default_page_size() -> u64 {
    10
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            current: default_current(),
            page_size: default_page_size(),
        }
    }
}

impl GridParams {
    pub fn new(current: u64, page_size: u64) -> Self {
        Self { current, page_size }
    }

    /// 1-based page number
    pub fn current(&self) -> u64 {
        self.current.clamp(1, MAX_CURRENT)
    }

    pub fn size(&self) -> u64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// 0-based page index for the backend
    pub fn backend_page(&self) -> u64 {
        self.current() - 1
    }

    /// Parameters of the last page when this one lies past `total`
    pub fn past_end(&self, total: u64) -> Option<GridParams> {
        if total == 0 {
            return None;
        }
        let last = total.div_ceil(self.size());
        (self.current() > last).then(|| GridParams::new(last, self.size()))
    }
}

/// One page of records
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Convert a backend page, mapping each record
    pub fn from_data<U: Into<T>>(data: PageData<U>) -> Self {
        Self {
            items: data.content.into_iter().map(Into::into).collect(),
            total: data.total_elements,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Grid response
#[derive(Debug, Clone, Serialize)]
pub struct GridResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub current: u64,
    #[serde(rename = "pageSize")]
    pub page_size: u64,
    pub pagination: String,
}

impl<T> GridResponse<T> {
    pub fn ok(params: &GridParams, page: Page<T>) -> Self {
        Self {
            pagination: pagination_label(params, page.total),
            data: page.items,
            total: page.total,
            success: true,
            message: None,
            current: params.current(),
            page_size: params.size(),
        }
    }

    /// Failed fetch: empty collection plus the operator message
    pub fn failed(params: &GridParams, message: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            success: false,
            message: Some(message.into()),
            current: params.current(),
            page_size: params.size(),
            pagination: pagination_label(params, 0),
        }
    }

    /// Load one page through `load`
    ///
    /// A page past the end (its last rows were just deleted) is loaded again
    /// as the last page, so the reload never shows an empty range.
    pub async fn fetch<F, Fut>(params: GridParams, load: F) -> AppResult<Self>
    where
        F: Fn(GridParams) -> Fut,
        Fut: Future<Output = AppResult<Page<T>>>,
    {
        let mut params = params;
        let mut result = load(params).await;
        if let Some(last) = result.as_ref().ok().and_then(|page| params.past_end(page.total)) {
            tracing::debug!(
                "Grid page {} is past the end, loading page {}",
                params.current(),
                last.current()
            );
            params = last;
            result = load(params).await;
        }
        Self::from_result(&params, result)
    }

    /// Fold a service result into a grid response
    ///
    /// Session expiry still propagates so the caller can redirect to login.
    pub fn from_result(params: &GridParams, result: AppResult<Page<T>>) -> AppResult<Self> {
        match result {
            Ok(page) => Ok(Self::ok(params, page)),
            Err(e) if e.is_session_expired() => Err(e),
            Err(e) => {
                tracing::warn!("Grid fetch failed: {}", e);
                Ok(Self::failed(params, e.to_string()))
            }
        }
    }
}

/// Footer label, `第 {start}-{end} 条，共 {total} 条`
pub fn pagination_label(params: &GridParams, total: u64) -> String {
    let params = params.past_end(total).unwrap_or(*params);
    let size = params.size();
    let start = if total == 0 {
        0
    } else {
        (params.current() - 1).saturating_mul(size).saturating_add(1)
    };
    let end = params.current().saturating_mul(size).min(total);
    format!("第 {}-{} 条，共 {} 条", start, end, total)
}
