//! Pagination control tokens and the "showing" summary line.

/// Width of the page-number window around the current page.
pub const MAX_VISIBLE_PAGES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Previous { target: u32, enabled: bool },
    Page { number: u32, active: bool },
    Ellipsis,
    Next { target: u32, enabled: bool },
}

impl PageToken {
    /// Page a click on this token navigates to, if it is clickable at all.
    pub fn target(&self) -> Option<u32> {
        match *self {
            PageToken::Previous { target, enabled } | PageToken::Next { target, enabled } => {
                enabled.then_some(target)
            }
            PageToken::Page { number, .. } => Some(number),
            PageToken::Ellipsis => None,
        }
    }
}

/// Inclusive window of page numbers shown around `current_page`.
///
/// Returns `None` when there are no pages.
pub fn page_window(current_page: u32, total_pages: u32) -> Option<(u32, u32)> {
    if total_pages == 0 {
        return None;
    }
    let current = current_page.clamp(1, total_pages);
    let mut start = current.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
    let end = start.saturating_add(MAX_VISIBLE_PAGES - 1).min(total_pages);
    if end - start + 1 < MAX_VISIBLE_PAGES {
        start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
    }
    Some((start, end))
}

/// Builds the clickable tokens for the pagination control.
///
/// With no pages both arrows are disabled, whatever the current page.
pub fn pagination_tokens(current_page: u32, total_pages: u32) -> Vec<PageToken> {
    let mut tokens = vec![PageToken::Previous {
        target: current_page.saturating_sub(1),
        enabled: current_page > 1 && total_pages > 0,
    }];

    if let Some((start, end)) = page_window(current_page, total_pages) {
        if start > 1 {
            tokens.push(PageToken::Page {
                number: 1,
                active: current_page == 1,
            });
            if start > 2 {
                tokens.push(PageToken::Ellipsis);
            }
        }

        tokens.extend((start..=end).map(|number| PageToken::Page {
            number,
            active: number == current_page,
        }));

        if end < total_pages {
            if end < total_pages - 1 {
                tokens.push(PageToken::Ellipsis);
            }
            tokens.push(PageToken::Page {
                number: total_pages,
                active: current_page == total_pages,
            });
        }
    }

    tokens.push(PageToken::Next {
        target: current_page.saturating_add(1),
        enabled: current_page < total_pages,
    });
    tokens
}

/// `Showing <start> - <end> of <total>`, with `end` clamped to the total.
pub fn showing_info(current_page: u32, page_size: u32, total_items: u64) -> String {
    if total_items == 0 {
        return "Showing 0 - 0 of 0".to_string();
    }
    let page = u64::from(current_page.max(1));
    let size = u64::from(page_size);
    let start = (page - 1) * size + 1;
    let end = (page * size).min(total_items);
    format!("Showing {start} - {end} of {total_items}")
}
