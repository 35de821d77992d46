//! Request/response data transfer objects
//!
//! Every success response travels in the same envelope:
//! `{"status": "success", "data": ..., "pagination"?: ...}`.

pub mod customer;
pub mod document;
pub mod filing;
pub mod invoice;
pub mod order;
pub mod packing_list;
pub mod product;
pub mod purchase_order;

use serde::{Deserialize, Serialize};

/// The standard success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: "success",
            data,
            pagination: None,
        }
    }

    pub fn paginated(data: T, pagination: Pagination) -> Self {
        Self {
            status: "success",
            data,
            pagination: Some(pagination),
        }
    }
}

/// Pagination block attached to list responses
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Page selection query parameters, `?page=2&per_page=50`
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl PageQuery {
    /// Clamps the page size to something sane and returns (limit, offset)
    pub fn limit_offset(&self) -> (i64, i64) {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, 100);
        (per_page as i64, ((page - 1) * per_page) as i64)
    }

    pub fn pagination(&self, total: i64) -> Pagination {
        Pagination {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, 100),
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_clamps() {
        let q = PageQuery { page: 0, per_page: 1000 };
        assert_eq!(q.limit_offset(), (100, 0));

        let q = PageQuery { page: 3, per_page: 25 };
        assert_eq!(q.limit_offset(), (25, 50));
    }

    #[test]
    fn test_envelope_omits_absent_pagination() {
        let body = serde_json::to_string(&ApiResponse::ok(1)).unwrap();
        assert_eq!(body, r#"{"status":"success","data":1}"#);
    }
}
