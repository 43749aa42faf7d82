use crate::api_client::ListQuery;
use crate::models::page::Page;

pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// 1-based pagination state for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.max(1),
            total_elements: 0,
            total_pages: 0,
        }
    }

    pub fn query(&self, filter: Option<String>, sort: &str) -> ListQuery {
        ListQuery {
            page: self.page,
            size: self.size,
            filter,
            sort: Some(sort.to_string()),
        }
    }

    /// Takes the totals from a fetched page.
    pub fn update<T>(&mut self, page: &Page<T>) {
        self.total_elements = page.total_elements;
        self.total_pages = page.total_pages;
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Inclusive 1-based item range shown on this page, `None` when empty.
    pub fn item_range(&self) -> Option<(u64, u64)> {
        if self.total_elements == 0 {
            return None;
        }
        let start = u64::from(self.page - 1) * u64::from(self.size) + 1;
        if start > self.total_elements {
            return None;
        }
        let end = (start + u64::from(self.size) - 1).min(self.total_elements);
        Some((start, end))
    }

    pub fn summary(&self) -> String {
        match self.item_range() {
            Some((start, end)) => format!(
                "Hiển thị {start}-{end} / {} kết quả · Trang {}/{}",
                self.total_elements, self.page, self.total_pages
            ),
            None => "Không có kết quả".to_string(),
        }
    }

    /// Hint for reaching the neighbouring pages, if any.
    pub fn navigation(&self) -> Option<String> {
        let mut hints = Vec::new();
        if self.has_prev() {
            hints.push(format!("--page {} trang trước", self.page - 1));
        }
        if self.has_next() {
            hints.push(format!("--page {} trang sau", self.page + 1));
        }
        (!hints.is_empty()).then(|| hints.join(" · "))
    }
}
