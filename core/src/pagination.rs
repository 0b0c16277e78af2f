use serde::Serialize;

/// One page of a larger ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page >= 1 && self.page < self.total_pages
    }
}

/// Slices `items` into 1-based pages of `page_size`.
///
/// Page 0, a zero page size, or a page past the end all yield an empty slice;
/// the totals are still reported. A zero page size reports zero pages.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let total_items = items.len();
    let total_pages = if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    };

    let slice = match page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(page_size))
    {
        Some(start) if page_size > 0 && start < total_items => {
            let end = start.saturating_add(page_size).min(total_items);
            &items[start..end]
        }
        _ => &items[..0],
    };

    Page {
        items: slice,
        page,
        page_size,
        total_pages,
        total_items,
    }
}
