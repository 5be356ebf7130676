use serde::{Deserialize, Serialize};

/// Fixed admin listing page size.
pub const PAGE_SIZE: u32 = 15;

/// Admin listing filter: optional sender-name search plus a 1-based page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentFilter {
    pub search: Option<String>,
    pub page: Option<u32>,
}

impl DocumentFilter {
    /// Search term with surrounding whitespace removed; blank means no filter.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Requested page, with absent or zero treated as the first page.
    pub fn page(&self) -> u32 {
        self.page.filter(|p| *p > 0).unwrap_or(1)
    }
}

/// One page of a listing plus paginator metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
    /// 1-based position of the first item on this page, `None` when empty.
    pub from: Option<u64>,
    pub to: Option<u64>,
    pub search: String,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, filter: &DocumentFilter, total: u64) -> Self {
        let current_page = filter.page();
        let per_page = PAGE_SIZE;
        let last_page = (total.div_ceil(u64::from(per_page)).max(1)) as u32;
        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            let first = u64::from(current_page - 1) * u64::from(per_page) + 1;
            (Some(first), Some(first + data.len() as u64 - 1))
        };

        Self {
            data,
            current_page,
            per_page,
            total,
            last_page,
            from,
            to,
            search: filter.search_term().unwrap_or_default().to_string(),
        }
    }

    /// Row offset of the requested page.
    pub fn offset(filter: &DocumentFilter) -> u64 {
        u64::from(filter.page() - 1) * u64::from(PAGE_SIZE)
    }
}
