//! Per-operation query parameters.

use crate::token::QueryParams;

/// Paging parameters accepted by every list operation.
///
/// Maps to the gateway's `offset` and `limit` query parameters; omitted
/// fields are left off the wire (and out of the signed material) entirely.
///
/// # Examples
///
/// ```
/// use xpay_client::client::PageParams;
///
/// let page = PageParams { offset: Some(0), limit: Some(25) };
/// let first_page = PageParams { limit: Some(25), ..Default::default() };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    /// Page number offset.
    pub offset: Option<u64>,
    /// Page size, i.e. number of records.
    pub limit: Option<u64>,
}

impl PageParams {
    /// Inserts the present fields into a query parameter set.
    pub(crate) fn apply(&self, query: &mut QueryParams) {
        if let Some(offset) = self.offset {
            query.insert("offset", offset);
        }
        if let Some(limit) = self.limit {
            query.insert("limit", limit);
        }
    }
}
