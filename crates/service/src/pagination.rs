//! Pagination utilities for service layer
//!
//! Converts caller-supplied page numbers into a LIMIT/OFFSET window.

use crate::errors::ServiceError;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 0-based page index
    pub page_num: u64,
    /// items per page; 0 yields an empty window
    pub per_page: u64,
}

impl Pagination {
    /// Reject negative inputs coming from the transport.
    pub fn from_request(page_num: i64, per_page: i64) -> Result<Self, ServiceError> {
        let page_num = u64::try_from(page_num)
            .map_err(|_| ServiceError::InvalidArgument(format!("page number must be >= 0, got {page_num}")))?;
        let per_page = u64::try_from(per_page)
            .map_err(|_| ServiceError::InvalidArgument(format!("records per page must be >= 0, got {per_page}")))?;
        Ok(Self { page_num, per_page })
    }

    /// `(limit, offset)` where `offset = page_num * per_page`.
    pub fn window(self) -> Result<(u64, u64), ServiceError> {
        let offset = self
            .page_num
            .checked_mul(self.per_page)
            .filter(|o| i64::try_from(*o).is_ok())
            .ok_or_else(|| ServiceError::InvalidArgument("page window is out of range".into()))?;
        Ok((self.per_page, offset))
    }
}
