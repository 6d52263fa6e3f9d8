//! Pagination: page slicing and the page-number window shown under tables.

use serde::{Serialize, Serializer};

/// Siblings shown on each side of the current page.
pub const DEFAULT_SIBLING_COUNT: usize = 1;

/// Page sizes offered by list views.
pub const DEFAULT_PAGE_SIZES: [usize; 3] = [10, 20, 50];

/// One entry of a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A clickable page number (1-based).
    Page(usize),
    /// A run of hidden page numbers.
    Ellipsis,
}

/// Serialized as the page number, or the string `"..."`.
impl Serialize for PageItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageItem::Page(n) => serializer.serialize_u64(*n as u64),
            PageItem::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Compute the labels for a pagination control.
///
/// Page 1 and `total_pages` are always shown. Around `current_page` a window
/// of `2 * sibling_count + 1` pages is shown; at the edges the window slides
/// inward instead of shrinking, so `(1, 20)` shows pages 2 and 3. An ellipsis
/// follows page 1 when the window starts after page 2, and precedes the last
/// page when it ends before `total_pages - 1`. Out-of-range `current_page`
/// values are clamped.
pub fn page_numbers(current_page: usize, total_pages: usize, sibling_count: usize) -> Vec<PageItem> {
    if total_pages <= 1 {
        return vec![PageItem::Page(1)];
    }

    let total_numbers = sibling_count.saturating_mul(2).saturating_add(5);
    if total_pages <= total_numbers {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    // total_pages > 2 * sibling_count + 5 here, so the window always fits.
    let window = sibling_count * 2;
    let left_sibling = current_page
        .saturating_sub(sibling_count)
        .clamp(1, total_pages - window);
    let right_sibling = (left_sibling + window).min(total_pages);

    let show_left_ellipsis = left_sibling > 2;
    let show_right_ellipsis = right_sibling < total_pages - 1;

    let mut pages = vec![PageItem::Page(1)];

    if show_left_ellipsis {
        pages.push(PageItem::Ellipsis);
    }

    let start = if show_left_ellipsis { left_sibling } else { 2 };
    let end = if show_right_ellipsis {
        right_sibling
    } else {
        total_pages - 1
    };
    pages.extend((start..=end).map(PageItem::Page));

    if show_right_ellipsis {
        pages.push(PageItem::Ellipsis);
    }

    pages.push(PageItem::Page(total_pages));
    pages
}

/// Number of pages needed for `item_count` items. Zero items need zero pages.
pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    item_count.div_ceil(page_size)
}

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// 1-based page number actually served
    pub page: usize,
    pub page_size: usize,
    /// Items across all pages
    pub total_items: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    /// Pagination control labels for this page
    pub page_numbers: Vec<PageItem>,
}

/// Cut one page out of `items`.
///
/// `page` is 1-based and clamped into `1..=max(total_pages, 1)`. A
/// `page_size` of zero is treated as one.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let pages = total_pages(total_items, page_size);
    let page = page.clamp(1, pages.max(1));

    let start = (page - 1) * page_size;
    let items: Vec<T> = items.into_iter().skip(start).take(page_size).collect();

    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages: pages,
        has_previous: page > 1,
        has_next: page < pages,
        page_numbers: page_numbers(page, pages, DEFAULT_SIBLING_COUNT),
    }
}
