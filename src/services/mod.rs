//! Entity services
//!
//! Each function maps console arguments onto one backend call and the
//! response back onto console types. No retries, caching or batching.

pub mod admin;
pub mod audit;
pub mod auth;
pub mod s3;
pub mod user;

use crate::client::Query;
use crate::grid::GridParams;

/// `page` (0-based) and `size` of a backend list call
pub(crate) fn page_query(params: &GridParams) -> Query {
    Query::new()
        .set("page", params.backend_page())
        .set("size", params.size())
}

/// Single-id query used by the details and remove calls
pub(crate) fn id_query(id: i64) -> Query {
    Query::new().set("id", id)
}
