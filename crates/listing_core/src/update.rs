use listing_logging::{listing_debug, listing_info, listing_warn};

use crate::query::is_allowed_page_size;
use crate::{AppState, Effect, ListingResult, Msg, RequestId, SortKey};

/// Pure update function: applies a message to state and returns any effects.
///
/// At most one listing request is outstanding. Any action that would change
/// the query while it is in flight is dropped, not queued.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Init { location } => {
            if dropped_while_loading(&state, "init") {
                return (state, Vec::new());
            }
            state.load_location(&location);
            state.mark_dirty();
            vec![fetch(&mut state)]
        }
        Msg::PageSizeSelected(size) => {
            if dropped_while_loading(&state, "page size change") {
                return (state, Vec::new());
            }
            if !is_allowed_page_size(size) {
                listing_warn!("Ignoring unsupported page size {}", size);
                return (state, Vec::new());
            }
            state.query_mut().set_page_size(size);
            state.query_mut().set_page(1);
            state.mark_dirty();
            vec![Effect::PushLocation(state.location()), fetch(&mut state)]
        }
        Msg::SortSelected(raw) => {
            if dropped_while_loading(&state, "sort change") {
                return (state, Vec::new());
            }
            let Some(sort) = SortKey::parse(&raw) else {
                listing_warn!("Ignoring malformed sort key {:?}", raw);
                return (state, Vec::new());
            };
            state.query_mut().set_sort(sort);
            state.query_mut().set_page(1);
            state.mark_dirty();
            vec![Effect::PushLocation(state.location()), fetch(&mut state)]
        }
        Msg::PageClicked(page) => go_to_page(&mut state, page),
        Msg::HistoryNavigated { location } => {
            if dropped_while_loading(&state, "history navigation") {
                return (state, Vec::new());
            }
            state.load_location(&location);
            state.mark_dirty();
            vec![fetch(&mut state)]
        }
        Msg::ListingLoaded { request_id, result } => {
            listing_loaded(&mut state, request_id, result)
        }
        Msg::Scrolled { y } => {
            state.scroll_mut().apply(y);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ItemsVisible(ids) => {
            let revealed = state.images_mut().reveal(&ids);
            if !revealed.is_empty() {
                listing_debug!("Revealed images {:?}", revealed);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ImageFailed(id) => {
            if state.images_mut().mark_broken(id) {
                listing_warn!("Image for item {} failed to load", id);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NavSelected(index) => {
            if state.select_nav(index) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn go_to_page(state: &mut AppState, page: u32) -> Vec<Effect> {
    let total_pages = state.total_pages();
    if page < 1 || page > total_pages || page == state.query().page() {
        listing_debug!(
            "Ignoring page click {} (current {}, total {})",
            page,
            state.query().page(),
            total_pages
        );
        return Vec::new();
    }
    if dropped_while_loading(state, "page click") {
        return Vec::new();
    }
    state.query_mut().set_page(page);
    state.mark_dirty();
    vec![
        Effect::PushLocation(state.location()),
        fetch(state),
        Effect::ScrollToTop,
    ]
}

fn listing_loaded(
    state: &mut AppState,
    request_id: RequestId,
    result: Result<ListingResult, String>,
) -> Vec<Effect> {
    if !state.finish_request(request_id) {
        listing_warn!(
            "Discarding stale listing response {} (outstanding {:?})",
            request_id,
            state.load_state()
        );
        return Vec::new();
    }
    state.mark_dirty();

    match result {
        Ok(listing) => {
            let total_pages = listing.total_pages;
            listing_info!(
                "Listing {} loaded: {} items, {} total, {} pages",
                request_id,
                listing.items.len(),
                listing.total_items,
                total_pages
            );
            state.apply_listing(listing);
            if total_pages > 0 && state.query().page() > total_pages {
                listing_info!(
                    "Clamping page {} to last page {}",
                    state.query().page(),
                    total_pages
                );
                state.query_mut().set_page(total_pages);
                return vec![Effect::ReplaceLocation(state.location()), fetch(state)];
            }
            Vec::new()
        }
        Err(message) => {
            listing_warn!("Listing {} failed: {}", request_id, message);
            state.apply_error(message);
            Vec::new()
        }
    }
}

fn fetch(state: &mut AppState) -> Effect {
    let request_id = state.begin_request();
    Effect::FetchListing {
        request_id,
        query: state.query().clone(),
    }
}

fn dropped_while_loading(state: &AppState, action: &str) -> bool {
    if state.is_loading() {
        listing_info!("Dropping {} while a listing request is in flight", action);
        true
    } else {
        false
    }
}
