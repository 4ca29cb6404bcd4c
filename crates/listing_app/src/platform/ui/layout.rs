//! Fixed row layout of the rendered page.

use listing_core::{GridView, ItemId, ListingViewModel};

pub const HEADER_ROWS: u32 = 2;
pub const BANNER_ROWS: u32 = 3;
pub const CONTROL_ROWS: u32 = 2;
pub const STATUS_ROWS: u32 = 1;
pub const CARD_ROWS: u32 = 4;

/// First row of the card grid.
pub const GRID_TOP: u32 = HEADER_ROWS + BANNER_ROWS + CONTROL_ROWS + STATUS_ROWS;

/// Cards intersecting the viewport `[scroll_y, scroll_y + viewport_rows)`.
pub fn visible_items(view: &ListingViewModel, viewport_rows: u32) -> Vec<ItemId> {
    let GridView::Cards(cards) = &view.grid else {
        return Vec::new();
    };
    let top = view.scroll_y;
    let bottom = top.saturating_add(viewport_rows);

    cards
        .iter()
        .enumerate()
        .filter(|(index, _)| {
            let start = GRID_TOP + *index as u32 * CARD_ROWS;
            let end = start + CARD_ROWS;
            start < bottom && end > top
        })
        .map(|(_, card)| card.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_core::{update, AppState, ListingItem, ListingResult, Msg};

    fn loaded_view(count: u64, scroll_y: u32) -> ListingViewModel {
        let (state, effects) = update(
            AppState::new(),
            Msg::Init {
                location: "/ideas".to_string(),
            },
        );
        let request_id = match &effects[0] {
            listing_core::Effect::FetchListing { request_id, .. } => *request_id,
            other => panic!("unexpected effect {other:?}"),
        };
        let items = (1..=count)
            .map(|id| ListingItem {
                id,
                title: format!("Idea {id}"),
                published_at: "2024-01-01T00:00:00Z".to_string(),
                image_url: None,
            })
            .collect();
        let (state, _) = update(
            state,
            Msg::ListingLoaded {
                request_id,
                result: Ok(ListingResult {
                    items,
                    total_items: count,
                    total_pages: 1,
                }),
            },
        );
        let (state, _) = update(state, Msg::Scrolled { y: scroll_y });
        state.view()
    }

    #[test]
    fn top_of_page_shows_first_cards() {
        let view = loaded_view(10, 0);
        // Rows 0..24 cover the grid rows 8..24, i.e. four cards.
        assert_eq!(visible_items(&view, 24), vec![1, 2, 3, 4]);
    }

    #[test]
    fn scrolling_moves_the_visible_window() {
        let view = loaded_view(10, 20);
        // Rows 20..30: card 3 spans 16..20 and is out, cards 4..6 are in.
        assert_eq!(visible_items(&view, 10), vec![4, 5, 6]);
    }

    #[test]
    fn no_cards_means_nothing_visible() {
        let view = AppState::new().view();
        assert!(visible_items(&view, 24).is_empty());
    }
}
