// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Offset pagination shared by list endpoints.
//!
//! Pages are 1-based. A request carries a [`PageParam`]; the response wraps
//! the current slice in a [`Page`] together with the total item count and
//! the derived page count.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page index used when the client does not send one.
pub const DEFAULT_PAGE_INDEX: u32 = 1;

/// Page size used when the client does not send one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("Invalid page parameters: pageIndex={page_index}, pageSize={page_size} (pageIndex >= 1, pageSize 1-100)")]
    InvalidPageParam { page_index: u32, page_size: u32 },
}

/// Requested page (1-based index, bounded size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageParam {
    pub page_index: u32,
    pub page_size: u32,
}

impl PageParam {
    /// Build a validated page parameter.
    pub fn try_new(page_index: u32, page_size: u32) -> Result<Self, PaginationError> {
        let param = Self {
            page_index,
            page_size,
        };
        if is_valid_page_param(&param) {
            Ok(param)
        } else {
            Err(PaginationError::InvalidPageParam {
                page_index,
                page_size,
            })
        }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        calculate_offset(self.page_index, self.page_size)
    }
}

impl Default for PageParam {
    fn default() -> Self {
        Self {
            page_index: DEFAULT_PAGE_INDEX,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the metadata needed to render a pager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page_index: u32,
    pub page_size: u32,
    pub page_count: u64,
    pub data_count: u64,
    pub data: Vec<T>,
}

/// `(page_index - 1) * page_size`.
///
/// Callers validate `page_index >= 1`; index 0 saturates to offset 0.
pub fn calculate_offset(page_index: u32, page_size: u32) -> u64 {
    u64::from(page_index.saturating_sub(1)) * u64::from(page_size)
}

/// Wrap `data` in a [`Page`], deriving `page_count` from `data_count`.
///
/// An empty result has zero pages, not one.
pub fn create_page<T>(param: &PageParam, data_count: u64, data: Vec<T>) -> Page<T> {
    let page_count = if param.page_size == 0 {
        0
    } else {
        data_count.div_ceil(u64::from(param.page_size))
    };

    Page {
        page_index: param.page_index,
        page_size: param.page_size,
        page_count,
        data_count,
        data,
    }
}

pub fn is_valid_page_param(param: &PageParam) -> bool {
    param.page_index > 0 && (1..=MAX_PAGE_SIZE).contains(&param.page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(page_index: u32, page_size: u32) -> PageParam {
        PageParam {
            page_index,
            page_size,
        }
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(calculate_offset(1, 10), 0);
        assert_eq!(calculate_offset(3, 10), 20);
        assert_eq!(calculate_offset(2, 25), 25);
        assert_eq!(param(5, 100).offset(), 400);
    }

    #[test]
    fn offset_saturates_for_index_zero() {
        assert_eq!(calculate_offset(0, 10), 0);
    }

    #[test]
    fn page_count_rounds_up() {
        for page_size in 1..=MAX_PAGE_SIZE {
            for data_count in [0u64, 1, 7, 99, 100, 101, 1_000] {
                let page = create_page(&param(1, page_size), data_count, Vec::<u32>::new());
                let expected = data_count.div_ceil(u64::from(page_size));
                assert_eq!(page.page_count, expected, "size={page_size} count={data_count}");
            }
        }
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page = create_page(&param(1, 20), 0, Vec::<u32>::new());
        assert_eq!(page.page_count, 0);
        assert_eq!(page.data_count, 0);
        assert!(page.data.is_empty());
    }

    #[test]
    fn page_echoes_request_and_data() {
        let page = create_page(&param(2, 10), 25, vec![11, 12, 13]);
        assert_eq!(page.page_index, 2);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.data_count, 25);
        assert_eq!(page.data, vec![11, 12, 13]);
    }

    #[test]
    fn validates_bounds() {
        assert!(!is_valid_page_param(&param(0, 20)));
        assert!(!is_valid_page_param(&param(1, 0)));
        assert!(!is_valid_page_param(&param(1, 101)));
        assert!(is_valid_page_param(&param(1, 100)));
        assert!(is_valid_page_param(&param(1, 1)));
    }

    #[test]
    fn try_new_rejects_invalid() {
        assert_eq!(
            PageParam::try_new(0, 20),
            Err(PaginationError::InvalidPageParam {
                page_index: 0,
                page_size: 20
            })
        );
        assert_eq!(PageParam::try_new(3, 50), Ok(param(3, 50)));
    }

    #[test]
    fn default_is_first_page_of_twenty() {
        let mut first = PageParam::default();
        first.page_index = 9;
        assert_ne!(first, PageParam::default());
        assert_eq!(PageParam::default(), param(1, 20));
    }

    #[test]
    fn page_serializes_camel_case() {
        let page = create_page(&param(1, 2), 3, vec!["a", "b"]);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "pageIndex": 1,
                "pageSize": 2,
                "pageCount": 2,
                "dataCount": 3,
                "data": ["a", "b"]
            })
        );
    }
}
