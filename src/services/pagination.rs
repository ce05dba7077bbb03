//! Page-window and total-page derivation for the listing controls.
//!
//! Pure over already-fetched data; the handlers feed it the current page,
//! the fetched item count, and the optional running total the API reports.

use serde::Serialize;

/// Grid size of the home page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// At most this many numbered buttons are shown at once.
pub const MAX_PAGE_BUTTONS: usize = 5;

/// Guards against absurd `?page=` values in the query string.
pub const MAX_PAGE: usize = 10000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageItem {
    Page { number: usize, current: bool },
    Ellipsis,
}

pub fn clamp_page(page: usize) -> usize {
    page.clamp(1, MAX_PAGE)
}

/// The numbered buttons (plus ellipsis placeholders) to render around the
/// current page. At most [`MAX_PAGE_BUTTONS`] numbers; the first and last
/// page are always reachable when they fall outside the window.
pub fn window_items(page: usize, total_pages: usize) -> Vec<PageItem> {
    let total_pages = total_pages.max(1);
    let page = page.clamp(1, total_pages);

    let mut start = page.saturating_sub(2).max(1);
    let end = (start + MAX_PAGE_BUTTONS - 1).min(total_pages);
    if end - start < MAX_PAGE_BUTTONS - 1 {
        start = end.saturating_sub(MAX_PAGE_BUTTONS - 1).max(1);
    }

    let mut items = Vec::new();

    if start > 1 {
        items.push(PageItem::Page {
            number: 1,
            current: page == 1,
        });
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }

    for number in start..=end {
        items.push(PageItem::Page {
            number,
            current: page == number,
        });
    }

    if end < total_pages {
        if end < total_pages - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page {
            number: total_pages,
            current: page == total_pages,
        });
    }

    items
}

/// Update the page-count estimate after a listing fetch.
///
/// The API does not always report a total. When it does, the count is exact
/// (less one when the hero post is deduplicated out of the grid). Without
/// one, a short page marks the end of the listing and a full page tells us
/// nothing new, so the previous estimate stands until a short page is seen.
pub fn derive_total_pages(
    previous: usize,
    page: usize,
    returned: usize,
    total: Option<u64>,
    page_size: usize,
    hero_deduped: bool,
) -> usize {
    if let Some(total) = total {
        let adjusted = if hero_deduped {
            total.saturating_sub(1)
        } else {
            total
        };
        return ((adjusted as usize).div_ceil(page_size)).max(1);
    }

    if returned < page_size {
        if page == 1 {
            1
        } else {
            page
        }
    } else {
        previous.max(1)
    }
}
