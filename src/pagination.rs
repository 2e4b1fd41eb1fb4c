//! In-memory pagination of filtered company lists.

use serde::Serialize;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;
pub const MAX_ITEMS_PER_PAGE: usize = 200;

/// Requested page window, normalized to sane bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Page numbers start at 1; `per_page` is clamped to `1..=MAX_ITEMS_PER_PAGE`.
    pub fn new(page: Option<usize>, per_page: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
                .clamp(1, MAX_ITEMS_PER_PAGE),
        }
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Page links for the table footer: the first and last pages, a window around
/// the current page, and `None` where a gap is elided.
fn page_links(total_pages: usize, current: usize, around: usize) -> Vec<Option<usize>> {
    let mut links = Vec::new();
    let mut previous = 0;

    for page in 1..=total_pages {
        let near_edge = page == 1 || page == total_pages;
        let near_current = page + around >= current && page <= current + around;
        if !(near_edge || near_current) {
            continue;
        }
        if page > previous + 1 {
            links.push(None);
        }
        links.push(Some(page));
        previous = page;
    }

    links
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub pages: Vec<Option<usize>>,
}

impl<T> Paginated<T> {
    /// Cuts one page out of the full, already ordered result set.
    pub fn from_items(items: Vec<T>, pagination: Pagination) -> Self {
        let total = items.len();
        let total_pages = total.div_ceil(pagination.per_page);
        let items = items
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.per_page)
            .collect();

        Self {
            items,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
            total_pages,
            pages: page_links(total_pages, pagination.page, 2),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
            pages: self.pages,
        }
    }
}
